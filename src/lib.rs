#![forbid(unsafe_code)]
//! mailverdict — décision d'envoi pour une adresse e-mail (syntaxe, MX,
//! vérificateurs tiers)

pub mod discover;
mod error;
pub mod mx;
pub mod signal;
pub mod validator;
pub mod vendors;
pub mod verdict;
pub mod verify;

pub use discover::{DiscoveryQuery, DiscoveryReport, discover_email, discover_email_with};
pub use error::Error;
pub use mx::{Error as MxError, MxRecord, MxReport, SystemResolver, resolve_mx};
pub use signal::{Deliverability, DiscoverySignal, VerificationSignal, normalize_confidence};
pub use validator::{
    NormalizedEmail, SyntaxCheck, ValidationMode, ValidationReport, check_syntax,
    normalize_email, validate_email,
};
pub use vendors::{ApiKeys, HttpClient, PRECEDENCE, Vendor};
pub use verdict::{Decision, Verdict, resolve_verdict};
pub use verify::{BasicChecks, VerificationReport, VerifyOptions, verify_email, verify_email_with};
