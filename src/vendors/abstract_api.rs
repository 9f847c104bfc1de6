//! Abstract e-mail validation API.

use std::time::Duration;

use phf::phf_map;
use serde_json::Value;

use super::{ApiRequest, HttpClient, NO_API_KEY, transport_failure};
use crate::signal::{Deliverability, VerificationSignal, score_from_json};

pub const NAME: &str = "Abstract";
pub const TIMEOUT: Duration = Duration::from_secs(12);
const ENDPOINT: &str = "https://emailvalidation.abstractapi.com/v1/";

static DELIVERABILITY: phf::Map<&'static str, (Deliverability, &'static str)> = phf_map! {
    "DELIVERABLE" => (Deliverability::Deliverable, "Deliverable"),
    "UNDELIVERABLE" => (Deliverability::Undeliverable, "Undeliverable"),
    "RISKY" => (Deliverability::Unknown, "Risky"),
};

pub fn verify<C>(client: &C, address: &str, api_key: Option<&str>) -> VerificationSignal
where
    C: HttpClient + ?Sized,
{
    let Some(api_key) = api_key else {
        return VerificationSignal::not_consulted(NAME, NO_API_KEY);
    };

    let request = ApiRequest::get(ENDPOINT)
        .query("api_key", api_key)
        .query("email", address)
        .timeout(TIMEOUT);

    match client.get_json(&request) {
        Ok(payload) => parse_payload(&payload),
        Err(err) => transport_failure(NAME, &err),
    }
}

pub(crate) fn parse_payload(payload: &Value) -> VerificationSignal {
    let deliverability = payload
        .get("deliverability")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_ascii_uppercase();
    let confidence = score_from_json(payload.get("quality_score"));

    let (outcome, detail) = DELIVERABILITY
        .get(deliverability.as_str())
        .copied()
        .unwrap_or((Deliverability::Unknown, "Unknown"));

    VerificationSignal::consulted(NAME, outcome, confidence, detail)
}
