//! Final three-way recommendation for an address.

use std::fmt;

use serde::Serialize;

use crate::signal::{Deliverability, VerificationSignal};
use crate::verify::BasicChecks;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    DoNotSend,
    LikelyOkToSend,
    RiskyUnknown,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Self::DoNotSend => "DO NOT SEND",
            Self::LikelyOkToSend => "LIKELY OK TO SEND",
            Self::RiskyUnknown => "RISKY / UNKNOWN",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub verdict: Verdict,
    pub rationale: &'static str,
}

impl Decision {
    fn new(verdict: Verdict, rationale: &'static str) -> Self {
        Self { verdict, rationale }
    }
}

/// First matching rule wins: syntax, MX, any undeliverable report, any
/// deliverable report, otherwise unknown. Signals that were not consulted
/// are ignored.
pub fn resolve_verdict(
    basic: &BasicChecks,
    primary: &VerificationSignal,
    secondary: &VerificationSignal,
) -> Decision {
    if !basic.syntax_valid {
        return Decision::new(Verdict::DoNotSend, "Invalid syntax.");
    }
    if !basic.mx_present {
        return Decision::new(Verdict::DoNotSend, "Domain has no valid MX records.");
    }

    let reported = |outcome: Deliverability| {
        [primary, secondary]
            .iter()
            .any(|signal| signal.consulted && signal.outcome == outcome)
    };

    if reported(Deliverability::Undeliverable) {
        return Decision::new(Verdict::DoNotSend, "An API reported undeliverable.");
    }
    if reported(Deliverability::Deliverable) {
        return Decision::new(
            Verdict::LikelyOkToSend,
            "At least one API reported deliverable; basics passed.",
        );
    }
    Decision::new(
        Verdict::RiskyUnknown,
        "Basics passed, but API confidence is unavailable or inconclusive.",
    )
}
