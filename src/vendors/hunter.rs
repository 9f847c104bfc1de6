//! Hunter.io: e-mail verifier and e-mail finder.

use std::time::Duration;

use phf::phf_map;
use serde_json::Value;

use super::{ApiRequest, HttpClient, NO_API_KEY, transport_failure};
use crate::signal::{
    Deliverability, DiscoverySignal, VerificationSignal, normalize_confidence, score_from_json,
};

pub const NAME: &str = "Hunter";
pub const TIMEOUT: Duration = Duration::from_secs(15);
pub(crate) const VERIFIER_ENDPOINT: &str = "https://api.hunter.io/v2/email-verifier";
pub(crate) const FINDER_ENDPOINT: &str = "https://api.hunter.io/v2/email-finder";

static STATUS: phf::Map<&'static str, (Deliverability, &'static str)> = phf_map! {
    "valid" => (Deliverability::Deliverable, "Valid"),
    "invalid" => (Deliverability::Undeliverable, "Invalid"),
    "accept_all" => (Deliverability::Unknown, "Accept all (risky)"),
    "webmail" => (Deliverability::Deliverable, "Webmail"),
    "disposable" => (Deliverability::Undeliverable, "Disposable"),
};

pub fn verify<C>(client: &C, address: &str, api_key: Option<&str>) -> VerificationSignal
where
    C: HttpClient + ?Sized,
{
    let Some(api_key) = api_key else {
        return VerificationSignal::not_consulted(NAME, NO_API_KEY);
    };

    let request = ApiRequest::get(VERIFIER_ENDPOINT)
        .query("api_key", api_key)
        .query("email", address)
        .timeout(TIMEOUT);

    match client.get_json(&request) {
        Ok(payload) => parse_verifier_payload(&payload),
        Err(err) => transport_failure(NAME, &err),
    }
}

pub(crate) fn parse_verifier_payload(payload: &Value) -> VerificationSignal {
    let Some(data) = payload.get("data").filter(|d| d.is_object()) else {
        tracing::warn!(vendor = NAME, "verifier payload has no data object");
        return VerificationSignal::inconclusive(NAME, "No data returned");
    };

    let status = data
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let confidence = score_from_json(data.get("score"));

    match STATUS.get(status.as_str()) {
        Some(&(outcome, detail)) => VerificationSignal::consulted(NAME, outcome, confidence, detail),
        None => VerificationSignal::consulted(
            NAME,
            Deliverability::Unknown,
            confidence,
            format!("Unknown status: {status}"),
        ),
    }
}

/// Ask the finder for `first_name last_name` at `domain`.
pub fn find<C>(
    client: &C,
    domain: &str,
    first_name: &str,
    last_name: &str,
    api_key: Option<&str>,
) -> DiscoverySignal
where
    C: HttpClient + ?Sized,
{
    let Some(api_key) = api_key else {
        return DiscoverySignal::not_consulted(NAME, NO_API_KEY);
    };

    let request = ApiRequest::get(FINDER_ENDPOINT)
        .query("api_key", api_key)
        .query("domain", domain)
        .query("first_name", first_name)
        .query("last_name", last_name)
        .timeout(TIMEOUT);

    match client.get_json(&request) {
        Ok(payload) => parse_finder_payload(&payload),
        Err(err) => {
            tracing::warn!(vendor = NAME, error = %err, "finder request failed");
            DiscoverySignal::not_found(NAME, format!("HTTP error: {err}"))
        }
    }
}

pub(crate) fn parse_finder_payload(payload: &Value) -> DiscoverySignal {
    let Some(data) = payload.get("data").filter(|d| d.is_object()) else {
        tracing::warn!(vendor = NAME, "finder payload has no data object");
        return DiscoverySignal::not_found(NAME, "No data returned");
    };

    let email = data
        .get("email")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|email| !email.is_empty());
    let confidence = score_from_json(data.get("confidence")).and_then(normalize_confidence);
    let evidence: Vec<String> = data
        .get("sources")
        .and_then(Value::as_array)
        .map(|sources| {
            sources
                .iter()
                .filter_map(|source| source.get("uri")?.as_str())
                .filter(|uri| !uri.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    match (email, confidence) {
        (Some(email), Some(confidence)) => DiscoverySignal::found(
            NAME,
            email,
            Some(confidence),
            evidence,
            format!("Found with {:.0}% confidence", confidence * 100.0),
        ),
        (Some(email), None) => {
            DiscoverySignal::found(NAME, email, None, evidence, "Found (no confidence score)")
        }
        (None, _) => DiscoverySignal::not_found(NAME, "No email found"),
    }
}
