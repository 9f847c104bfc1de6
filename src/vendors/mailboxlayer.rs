//! MailboxLayer (apilayer) e-mail check API.
//!
//! The header-authenticated endpoint is tried first; any failure there falls
//! back to the legacy `access_key` endpoint before giving up.

use std::time::Duration;

use serde_json::Value;

use super::{ApiRequest, HttpClient, NO_API_KEY, transport_failure};
use crate::signal::{Deliverability, VerificationSignal, score_from_json};

pub const NAME: &str = "MailboxLayer";
pub const TIMEOUT: Duration = Duration::from_secs(12);
pub(crate) const PRIMARY_ENDPOINT: &str = "https://api.apilayer.com/email_verification/check";
pub(crate) const LEGACY_ENDPOINT: &str = "https://apilayer.net/api/check";

pub fn verify<C>(client: &C, address: &str, api_key: Option<&str>) -> VerificationSignal
where
    C: HttpClient + ?Sized,
{
    let Some(api_key) = api_key else {
        return VerificationSignal::not_consulted(NAME, NO_API_KEY);
    };

    let primary = ApiRequest::get(PRIMARY_ENDPOINT)
        .query("email", address)
        .query("smtp", "1")
        .query("format", "1")
        .header("apikey", api_key)
        .timeout(TIMEOUT);
    match client.get_json(&primary) {
        Ok(payload) => return parse_payload(&payload),
        Err(err) => {
            tracing::debug!(vendor = NAME, error = %err, "primary endpoint failed, trying legacy endpoint");
        }
    }

    let legacy = ApiRequest::get(LEGACY_ENDPOINT)
        .query("access_key", api_key)
        .query("email", address)
        .query("smtp", "1")
        .query("format", "1")
        .timeout(TIMEOUT);
    match client.get_json(&legacy) {
        Ok(payload) => parse_payload(&payload),
        Err(err) => transport_failure(NAME, &err),
    }
}

pub(crate) fn parse_payload(payload: &Value) -> VerificationSignal {
    // legacy endpoint answers 200 with an error object on bad keys/quota
    if payload.get("success").and_then(Value::as_bool) == Some(false) {
        let info = payload
            .pointer("/error/info")
            .or_else(|| payload.pointer("/error/type"))
            .and_then(Value::as_str)
            .unwrap_or("unspecified error");
        tracing::warn!(vendor = NAME, info, "vendor reported an API error");
        return VerificationSignal::inconclusive(NAME, format!("API error: {info}"));
    }

    let format_valid = flag(payload, "format_valid").unwrap_or(false);
    let mx_found = flag(payload, "mx_found").unwrap_or(false);
    let smtp_check = flag(payload, "smtp_check");
    let confidence = score_from_json(payload.get("score"));

    let (outcome, detail) = match (format_valid, mx_found, smtp_check) {
        (true, true, Some(true)) => (Deliverability::Deliverable, "Deliverable (SMTP ok)"),
        (true, true, Some(false)) => (Deliverability::Undeliverable, "Undeliverable (SMTP)"),
        (_, false, _) => (Deliverability::Undeliverable, "No MX"),
        _ => (Deliverability::Unknown, "Unknown/Risky"),
    };

    VerificationSignal::consulted(NAME, outcome, confidence, detail)
}

fn flag(payload: &Value, field: &str) -> Option<bool> {
    payload.get(field).and_then(Value::as_bool)
}
