//! Shared result shapes produced by every signal source.
//!
//! A [`VerificationSignal`] answers "does this address deliver?", a
//! [`DiscoverySignal`] answers "was an address found for this person?". Both
//! carry an optional confidence that is always expressed on the `[0, 1]` scale.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Tri-state deliverability outcome reported by a signal source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Deliverability {
    Deliverable,
    Undeliverable,
    Unknown,
}

impl Deliverability {
    pub fn is_definitive(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Deliverability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deliverable => f.write_str("deliverable"),
            Self::Undeliverable => f.write_str("undeliverable"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Result of asking one source whether an address delivers.
///
/// Built through [`VerificationSignal::consulted`] or
/// [`VerificationSignal::not_consulted`]; a source that was not consulted
/// always reports [`Deliverability::Unknown`] without confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationSignal {
    pub source: &'static str,
    pub consulted: bool,
    pub outcome: Deliverability,
    pub confidence: Option<f64>,
    pub detail: String,
}

impl VerificationSignal {
    pub fn consulted(
        source: &'static str,
        outcome: Deliverability,
        confidence: Option<f64>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            source,
            consulted: true,
            outcome,
            confidence: confidence.and_then(normalize_confidence),
            detail: detail.into(),
        }
    }

    pub fn not_consulted(source: &'static str, detail: impl Into<String>) -> Self {
        Self {
            source,
            consulted: false,
            outcome: Deliverability::Unknown,
            confidence: None,
            detail: detail.into(),
        }
    }

    /// Consulted, but nothing usable came back (transport failure, anomaly).
    pub fn inconclusive(source: &'static str, detail: impl Into<String>) -> Self {
        Self::consulted(source, Deliverability::Unknown, None, detail)
    }

    pub fn is_definitive(&self) -> bool {
        self.consulted && self.outcome.is_definitive()
    }
}

/// Result of asking a discovery source for a person's address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoverySignal {
    pub source: &'static str,
    pub consulted: bool,
    pub found: bool,
    pub address: Option<String>,
    pub confidence: Option<f64>,
    pub evidence: Vec<String>,
    pub detail: String,
}

impl DiscoverySignal {
    pub fn found(
        source: &'static str,
        address: impl Into<String>,
        confidence: Option<f64>,
        evidence: Vec<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            source,
            consulted: true,
            found: true,
            address: Some(address.into()),
            confidence: confidence.and_then(normalize_confidence),
            evidence,
            detail: detail.into(),
        }
    }

    pub fn not_found(source: &'static str, detail: impl Into<String>) -> Self {
        Self {
            source,
            consulted: true,
            found: false,
            address: None,
            confidence: None,
            evidence: Vec::new(),
            detail: detail.into(),
        }
    }

    pub fn not_consulted(source: &'static str, detail: impl Into<String>) -> Self {
        Self {
            consulted: false,
            ..Self::not_found(source, detail)
        }
    }
}

/// Bring a vendor score onto the `[0, 1]` scale.
///
/// Values above 1 are read as percentages. The result is clamped, and
/// non-finite input yields `None`.
pub fn normalize_confidence(raw: f64) -> Option<f64> {
    if !raw.is_finite() {
        return None;
    }
    let scaled = if raw > 1.0 { raw / 100.0 } else { raw };
    Some(scaled.clamp(0.0, 1.0))
}

/// Read a score that vendors send either as a JSON number or a numeric string.
pub(crate) fn score_from_json(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
