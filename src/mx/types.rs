use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// One answer as handed over by the resolver, before interpretation.
///
/// Structured fields are filled when the resolver decoded an MX payload; the
/// textual form is the presentation format (`"10 mx.example.com."`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MxRdata {
    pub preference: Option<u16>,
    pub exchange: Option<String>,
    pub text: Option<String>,
}

impl MxRdata {
    pub fn structured(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference: Some(preference),
            exchange: Some(exchange.into()),
            text: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            preference: None,
            exchange: None,
            text: Some(text.into()),
        }
    }
}

/// Outcome of an MX lookup. Records are sorted by preference, so the primary
/// host is the first one; an empty list means the lookup failed and `notes`
/// says why.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MxReport {
    pub records: Vec<MxRecord>,
    pub notes: Vec<String>,
}

impl MxReport {
    pub fn found(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn primary_host(&self) -> Option<&str> {
        self.records.first().map(|r| r.exchange.as_str())
    }
}
