use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    #[default]
    Strict,
    Relaxed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub ok: bool,
    pub reasons: Vec<String>,
}

/// Address split into its parts, with the canonical forms computed even when
/// the address is invalid (what could be normalized is normalized).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedEmail {
    pub original: String,
    pub local: String,
    pub domain: String,
    pub ascii_domain: String,
    pub mode: ValidationMode,
    pub valid: bool,
    pub reasons: Vec<String>,
}

impl NormalizedEmail {
    /// Canonical `local@domain`, only for valid addresses.
    pub fn address(&self) -> Option<String> {
        self.valid.then(|| format!("{}@{}", self.local, self.domain))
    }

    /// Domain to hand to DNS: the IDNA form when available.
    pub fn lookup_domain(&self) -> &str {
        if self.ascii_domain.is_empty() {
            &self.domain
        } else {
            &self.ascii_domain
        }
    }
}

/// Outcome of the static syntax check: never an error, defects are notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxCheck {
    pub valid: bool,
    pub normalized: Option<String>,
    pub domain: Option<String>,
    pub ascii_domain: Option<String>,
    pub notes: Vec<String>,
}
