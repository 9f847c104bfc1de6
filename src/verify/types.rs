use serde::Serialize;

use crate::mx::{MxRecord, MxReport};
use crate::signal::VerificationSignal;
use crate::validator::SyntaxCheck;
use crate::verdict::Decision;

/// Local checks that run before any vendor is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicChecks {
    pub syntax_valid: bool,
    pub normalized_address: Option<String>,
    pub domain: Option<String>,
    pub mx_present: bool,
    pub primary_mx_host: Option<String>,
    pub mx_records: Vec<MxRecord>,
    pub notes: Vec<String>,
}

impl BasicChecks {
    pub(crate) fn from_syntax(syntax: &SyntaxCheck) -> Self {
        Self {
            syntax_valid: syntax.valid,
            normalized_address: syntax.normalized.clone(),
            domain: syntax.domain.clone(),
            mx_present: false,
            primary_mx_host: None,
            mx_records: Vec::new(),
            notes: syntax.notes.clone(),
        }
    }

    pub(crate) fn apply_mx(&mut self, report: MxReport) {
        self.mx_present = report.found();
        self.primary_mx_host = report.primary_host().map(str::to_string);
        self.notes.extend(report.notes);
        self.mx_records = report.records;
    }
}

/// Everything one verification run produced.
///
/// `signals` lists every vendor in precedence order, including skipped and
/// superseded ones; `primary` and `secondary` are the two handed to the
/// verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationReport {
    pub input: String,
    pub basic: BasicChecks,
    pub signals: Vec<VerificationSignal>,
    pub primary: VerificationSignal,
    pub secondary: VerificationSignal,
    pub decision: Decision,
}
