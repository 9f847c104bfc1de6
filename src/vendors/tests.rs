use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::{Value, json};

use super::{
    ApiKeys, ApiRequest, HttpClient, NO_API_KEY, TransportError, Vendor, abstract_api, hunter,
    mailboxlayer,
};
use crate::signal::Deliverability;

type Responder = Box<dyn Fn(&ApiRequest) -> Result<Value, TransportError>>;

/// Canned responses keyed by endpoint URL; every request is recorded.
#[derive(Default)]
pub(crate) struct StubClient {
    routes: HashMap<&'static str, Responder>,
    pub requests: RefCell<Vec<ApiRequest>>,
}

impl StubClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn json(mut self, url: &'static str, body: Value) -> Self {
        self.routes.insert(url, Box::new(move |_: &ApiRequest| Ok(body.clone())));
        self
    }

    pub(crate) fn failing(mut self, url: &'static str, code: u16) -> Self {
        self.routes
            .insert(url, Box::new(move |_: &ApiRequest| Err(TransportError::Status { code })));
        self
    }

    pub(crate) fn timing_out(mut self, url: &'static str) -> Self {
        self.routes
            .insert(url, Box::new(|_: &ApiRequest| Err(TransportError::Timeout)));
        self
    }

    pub(crate) fn calls_to(&self, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.url == url)
            .count()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl HttpClient for StubClient {
    fn get_json(&self, request: &ApiRequest) -> Result<Value, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        match self.routes.get(request.url) {
            Some(respond) => respond(request),
            None => Err(TransportError::Connect(format!("no route for {}", request.url))),
        }
    }
}

const ABSTRACT_URL: &str = "https://emailvalidation.abstractapi.com/v1/";

#[test]
fn missing_key_skips_the_network() {
    let client = StubClient::new();
    for vendor in super::PRECEDENCE {
        let signal = vendor.verify(&client, "user@example.com", None);
        assert!(!signal.consulted);
        assert_eq!(signal.outcome, Deliverability::Unknown);
        assert_eq!(signal.detail, NO_API_KEY);
    }
    let found = hunter::find(&client, "example.com", "Ada", "Lovelace", None);
    assert!(!found.consulted && !found.found);
    assert_eq!(client.total_calls(), 0);
}

#[test]
fn abstract_maps_deliverability_vocabulary() {
    let cases = [
        ("DELIVERABLE", Deliverability::Deliverable, "Deliverable"),
        ("undeliverable", Deliverability::Undeliverable, "Undeliverable"),
        ("RISKY", Deliverability::Unknown, "Risky"),
        ("SOMETHING_NEW", Deliverability::Unknown, "Unknown"),
    ];
    for (raw, outcome, detail) in cases {
        let signal = abstract_api::parse_payload(&json!({ "deliverability": raw }));
        assert!(signal.consulted);
        assert_eq!(signal.outcome, outcome, "{raw}");
        assert_eq!(signal.detail, detail);
    }
}

#[test]
fn abstract_reads_string_or_percentage_quality_score() {
    let as_string = abstract_api::parse_payload(&json!({
        "deliverability": "DELIVERABLE",
        "quality_score": "0.85"
    }));
    assert_eq!(as_string.confidence, Some(0.85));

    let as_percent = abstract_api::parse_payload(&json!({
        "deliverability": "DELIVERABLE",
        "quality_score": 85
    }));
    assert_eq!(as_percent.confidence, Some(0.85));
}

#[test]
fn abstract_sends_key_and_address_as_query() {
    let client = StubClient::new().json(ABSTRACT_URL, json!({ "deliverability": "DELIVERABLE" }));
    let signal = abstract_api::verify(&client, "user@example.com", Some("k-abs"));
    assert_eq!(signal.outcome, Deliverability::Deliverable);

    let requests = client.requests.borrow();
    assert_eq!(requests[0].query_value("api_key"), Some("k-abs"));
    assert_eq!(requests[0].query_value("email"), Some("user@example.com"));
    assert_eq!(requests[0].timeout, abstract_api::TIMEOUT);
}

#[test]
fn transport_failure_is_consulted_unknown() {
    let client = StubClient::new().failing(ABSTRACT_URL, 503);
    let signal = abstract_api::verify(&client, "user@example.com", Some("k"));
    assert!(signal.consulted);
    assert_eq!(signal.outcome, Deliverability::Unknown);
    assert!(signal.confidence.is_none());
    assert_eq!(signal.detail, "HTTP error: HTTP status 503");
}

#[test]
fn mailboxlayer_combines_format_mx_and_smtp() {
    let cases = [
        (json!({"format_valid": true, "mx_found": true, "smtp_check": true}), Deliverability::Deliverable),
        (json!({"format_valid": true, "mx_found": true, "smtp_check": false}), Deliverability::Undeliverable),
        (json!({"format_valid": true, "mx_found": false, "smtp_check": true}), Deliverability::Undeliverable),
        (json!({"format_valid": false, "mx_found": false}), Deliverability::Undeliverable),
        (json!({"format_valid": true, "mx_found": true, "smtp_check": null}), Deliverability::Unknown),
        (json!({"format_valid": false, "mx_found": true, "smtp_check": true}), Deliverability::Unknown),
    ];
    for (payload, expected) in cases {
        let signal = mailboxlayer::parse_payload(&payload);
        assert_eq!(signal.outcome, expected, "{payload}");
    }
}

#[test]
fn mailboxlayer_error_object_is_inconclusive() {
    let signal = mailboxlayer::parse_payload(&json!({
        "success": false,
        "error": { "code": 101, "type": "invalid_access_key", "info": "You have not supplied a valid API Access Key." }
    }));
    assert!(signal.consulted);
    assert_eq!(signal.outcome, Deliverability::Unknown);
    assert!(signal.detail.starts_with("API error: You have not supplied"));
}

#[test]
fn mailboxlayer_uses_header_on_primary_endpoint() {
    let client = StubClient::new().json(
        mailboxlayer::PRIMARY_ENDPOINT,
        json!({"format_valid": true, "mx_found": true, "smtp_check": true, "score": 0.96}),
    );
    let signal = mailboxlayer::verify(&client, "user@example.com", Some("k-mbl"));
    assert_eq!(signal.outcome, Deliverability::Deliverable);
    assert_eq!(signal.confidence, Some(0.96));
    assert_eq!(client.calls_to(mailboxlayer::LEGACY_ENDPOINT), 0);

    let requests = client.requests.borrow();
    assert_eq!(requests[0].headers, vec![("apikey", "k-mbl".to_string())]);
    assert_eq!(requests[0].query_value("access_key"), None);
}

#[test]
fn mailboxlayer_falls_back_to_legacy_endpoint() {
    let client = StubClient::new()
        .failing(mailboxlayer::PRIMARY_ENDPOINT, 401)
        .json(
            mailboxlayer::LEGACY_ENDPOINT,
            json!({"format_valid": true, "mx_found": true, "smtp_check": false}),
        );
    let signal = mailboxlayer::verify(&client, "user@example.com", Some("k-mbl"));
    assert_eq!(signal.outcome, Deliverability::Undeliverable);
    assert_eq!(client.calls_to(mailboxlayer::PRIMARY_ENDPOINT), 1);
    assert_eq!(client.calls_to(mailboxlayer::LEGACY_ENDPOINT), 1);
    assert_eq!(
        client.requests.borrow()[1].query_value("access_key"),
        Some("k-mbl")
    );
}

#[test]
fn mailboxlayer_gives_up_after_both_endpoints_fail() {
    let client = StubClient::new()
        .timing_out(mailboxlayer::PRIMARY_ENDPOINT)
        .timing_out(mailboxlayer::LEGACY_ENDPOINT);
    let signal = mailboxlayer::verify(&client, "user@example.com", Some("k"));
    assert!(signal.consulted);
    assert_eq!(signal.outcome, Deliverability::Unknown);
    assert_eq!(signal.detail, "HTTP error: request timed out");
    assert_eq!(client.total_calls(), 2);
}

#[test]
fn hunter_maps_status_vocabulary() {
    let cases = [
        ("valid", Deliverability::Deliverable, "Valid"),
        ("invalid", Deliverability::Undeliverable, "Invalid"),
        ("accept_all", Deliverability::Unknown, "Accept all (risky)"),
        ("webmail", Deliverability::Deliverable, "Webmail"),
        ("disposable", Deliverability::Undeliverable, "Disposable"),
        ("unknown", Deliverability::Unknown, "Unknown status: unknown"),
    ];
    for (raw, outcome, detail) in cases {
        let signal = hunter::parse_verifier_payload(&json!({ "data": { "status": raw, "score": 70 } }));
        assert_eq!(signal.outcome, outcome, "{raw}");
        assert_eq!(signal.detail, detail);
        assert_eq!(signal.confidence, Some(0.7));
    }
}

#[test]
fn hunter_without_data_is_inconclusive() {
    let signal = hunter::parse_verifier_payload(&json!({ "errors": [] }));
    assert!(signal.consulted);
    assert_eq!(signal.outcome, Deliverability::Unknown);
    assert_eq!(signal.detail, "No data returned");
}

#[test]
fn finder_reports_percentage_confidence_as_fraction() {
    let signal = hunter::parse_finder_payload(&json!({
        "data": {
            "email": "ada.lovelace@example.com",
            "confidence": 92,
            "sources": [
                { "uri": "https://example.com/team" },
                { "domain": "example.com" },
                "not-an-object",
                { "uri": "" },
                { "uri": "https://blog.example.com/post" }
            ]
        }
    }));
    assert!(signal.found);
    assert_eq!(signal.address.as_deref(), Some("ada.lovelace@example.com"));
    assert_eq!(signal.confidence, Some(0.92));
    assert_eq!(signal.detail, "Found with 92% confidence");
    assert_eq!(
        signal.evidence,
        vec![
            "https://example.com/team".to_string(),
            "https://blog.example.com/post".to_string()
        ]
    );
}

#[test]
fn finder_without_confidence_still_finds() {
    let signal = hunter::parse_finder_payload(&json!({
        "data": { "email": "ada@example.com", "confidence": null }
    }));
    assert!(signal.found);
    assert!(signal.confidence.is_none());
    assert_eq!(signal.detail, "Found (no confidence score)");
}

#[test]
fn finder_without_email_is_not_found() {
    let signal = hunter::parse_finder_payload(&json!({
        "data": { "email": null, "confidence": 0, "sources": [{ "uri": "https://x.example" }] }
    }));
    assert!(signal.consulted);
    assert!(!signal.found);
    assert!(signal.address.is_none());
    assert!(signal.evidence.is_empty());
    assert_eq!(signal.detail, "No email found");
}

#[test]
fn finder_sends_name_and_domain() {
    let client = StubClient::new().json(
        hunter::FINDER_ENDPOINT,
        json!({ "data": { "email": "ada@example.com", "confidence": 0.5 } }),
    );
    let signal = hunter::find(&client, "example.com", "Ada", "Lovelace", Some("k-hun"));
    assert_eq!(signal.confidence, Some(0.5));

    let requests = client.requests.borrow();
    assert_eq!(requests[0].query_value("domain"), Some("example.com"));
    assert_eq!(requests[0].query_value("first_name"), Some("Ada"));
    assert_eq!(requests[0].query_value("last_name"), Some("Lovelace"));
    assert_eq!(requests[0].timeout, hunter::TIMEOUT);
}

#[test]
fn finder_transport_failure_is_not_found() {
    let client = StubClient::new().failing(hunter::FINDER_ENDPOINT, 429);
    let signal = hunter::find(&client, "example.com", "Ada", "Lovelace", Some("k"));
    assert!(signal.consulted);
    assert!(!signal.found);
    assert_eq!(signal.detail, "HTTP error: HTTP status 429");
}

#[test]
fn api_keys_ignore_blank_values_and_redact_debug() {
    let keys = ApiKeys::new().with_hunter("  ").with_abstract("secret-value");
    assert_eq!(Vendor::Hunter.api_key(&keys), None);
    assert_eq!(Vendor::Abstract.api_key(&keys), Some("secret-value"));
    let debug = format!("{keys:?}");
    assert!(!debug.contains("secret-value"));
    assert!(debug.contains("<set>"));
}
