//! Verification pipeline: syntax, then MX, then the vendor chain, then the
//! verdict.
//!
//! Vendors are consulted in [`PRECEDENCE`] order and the chain stops at the
//! first definitive answer; later vendors are reported as superseded. A run
//! never fails once the HTTP client exists: DNS and vendor problems degrade
//! to notes and inconclusive signals.

mod options;
mod types;

pub use options::VerifyOptions;
pub use types::{BasicChecks, VerificationReport};

use crate::mx::{LookupMx, SystemResolver, resolve_mx};
use crate::signal::VerificationSignal;
use crate::validator::check_syntax;
use crate::vendors::{ApiKeys, BlockingClient, HttpClient, PRECEDENCE};
use crate::verdict::resolve_verdict;

/// Verify `address` with the system resolver and a blocking HTTP client.
pub fn verify_email(address: &str, options: &VerifyOptions) -> Result<VerificationReport, crate::Error> {
    let client = BlockingClient::new()?;
    Ok(verify_email_with(address, options, &SystemResolver, &client))
}

/// Same pipeline as [`verify_email`] with caller-supplied DNS and HTTP seams.
pub fn verify_email_with<R, C>(
    address: &str,
    options: &VerifyOptions,
    resolver: &R,
    client: &C,
) -> VerificationReport
where
    R: LookupMx + ?Sized,
    C: HttpClient + ?Sized,
{
    let syntax = check_syntax(address, options.validation_mode);
    tracing::debug!(valid = syntax.valid, "syntax checked");
    let mut basic = BasicChecks::from_syntax(&syntax);

    if let Some(domain) = syntax.ascii_domain.as_deref() {
        basic.apply_mx(resolve_mx(resolver, domain, options.mx_timeout));
    }

    let signals = match basic.normalized_address.as_deref() {
        Some(normalized) if !options.skip_apis => {
            gather_signals(client, normalized, &options.api_keys)
        }
        _ => skipped_signals("Skipped"),
    };

    let (primary, secondary) = forwarded_pair(&signals);
    let decision = resolve_verdict(&basic, &primary, &secondary);
    tracing::info!(verdict = %decision.verdict, rationale = decision.rationale, "verification finished");

    VerificationReport {
        input: address.to_string(),
        basic,
        signals,
        primary,
        secondary,
        decision,
    }
}

/// Consult vendors in precedence order until one answers definitively.
pub(crate) fn gather_signals<C>(client: &C, address: &str, keys: &ApiKeys) -> Vec<VerificationSignal>
where
    C: HttpClient + ?Sized,
{
    let mut signals = Vec::with_capacity(PRECEDENCE.len());
    let mut settled_by: Option<&'static str> = None;

    for vendor in PRECEDENCE {
        if let Some(winner) = settled_by {
            signals.push(VerificationSignal::not_consulted(
                vendor.name(),
                format!("Skipped ({winner} succeeded)"),
            ));
            continue;
        }

        let signal = vendor.verify(client, address, vendor.api_key(keys));
        if signal.is_definitive() {
            tracing::debug!(vendor = vendor.name(), outcome = %signal.outcome, "definitive answer, remaining vendors superseded");
            settled_by = Some(vendor.name());
        }
        signals.push(signal);
    }
    signals
}

fn skipped_signals(detail: &str) -> Vec<VerificationSignal> {
    PRECEDENCE
        .iter()
        .map(|vendor| VerificationSignal::not_consulted(vendor.name(), detail))
        .collect()
}

/// The two signals handed to the verdict: the first definitive answer (or the
/// second-to-last vendor when there is none), paired with the last vendor.
fn forwarded_pair(signals: &[VerificationSignal]) -> (VerificationSignal, VerificationSignal) {
    let [.., before_last, last] = signals else {
        return (
            VerificationSignal::not_consulted("none", "Skipped"),
            VerificationSignal::not_consulted("none", "Skipped"),
        );
    };
    let primary = signals[..signals.len() - 1]
        .iter()
        .find(|signal| signal.is_definitive())
        .unwrap_or(before_last);
    (primary.clone(), last.clone())
}
