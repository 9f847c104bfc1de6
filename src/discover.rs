//! Address discovery: one finder call, passed through as-is.

use serde::Serialize;

use crate::signal::DiscoverySignal;
use crate::vendors::{BlockingClient, HttpClient, hunter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryQuery {
    pub domain: String,
    pub first_name: String,
    pub last_name: String,
}

impl DiscoveryQuery {
    pub fn new(domain: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            domain: domain.trim().to_lowercase(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryReport {
    pub query: DiscoveryQuery,
    pub signal: DiscoverySignal,
}

/// Look up the most likely address for a person at `domain`.
pub fn discover_email(
    query: DiscoveryQuery,
    api_key: Option<&str>,
) -> Result<DiscoveryReport, crate::Error> {
    let client = BlockingClient::new()?;
    Ok(discover_email_with(&client, query, api_key))
}

pub fn discover_email_with<C>(client: &C, query: DiscoveryQuery, api_key: Option<&str>) -> DiscoveryReport
where
    C: HttpClient + ?Sized,
{
    let signal = hunter::find(
        client,
        &query.domain,
        &query.first_name,
        &query.last_name,
        api_key,
    );
    tracing::info!(domain = %query.domain, found = signal.found, "discovery finished");
    DiscoveryReport { query, signal }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::vendors::tests::StubClient;

    #[test]
    fn finder_hit_is_passed_through() {
        let client = StubClient::new().json(
            hunter::FINDER_ENDPOINT,
            json!({
                "data": {
                    "email": "ada.lovelace@example.com",
                    "confidence": 92,
                    "sources": [{ "uri": "https://example.com/about" }]
                }
            }),
        );
        let query = DiscoveryQuery::new(" Example.COM ", " Ada", "Lovelace ");

        let report = discover_email_with(&client, query, Some("k-hun"));

        assert!(report.signal.found);
        assert_eq!(report.signal.confidence, Some(0.92));
        assert_eq!(report.signal.address.as_deref(), Some("ada.lovelace@example.com"));
        assert_eq!(report.query.domain, "example.com");

        let requests = client.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query_value("domain"), Some("example.com"));
        assert_eq!(requests[0].query_value("first_name"), Some("Ada"));
        assert_eq!(requests[0].query_value("last_name"), Some("Lovelace"));
    }

    #[test]
    fn missing_key_is_not_consulted() {
        let client = StubClient::new();
        let report = discover_email_with(&client, DiscoveryQuery::new("example.com", "Ada", "Lovelace"), None);
        assert!(!report.signal.consulted);
        assert!(!report.signal.found);
        assert_eq!(client.total_calls(), 0);
    }

    #[test]
    fn transport_error_is_not_found() {
        let client = StubClient::new().failing(hunter::FINDER_ENDPOINT, 429);
        let report = discover_email_with(&client, DiscoveryQuery::new("example.com", "Ada", "Lovelace"), Some("k"));
        assert!(!report.signal.found);
        assert!(report.signal.address.is_none());
        assert_eq!(report.signal.detail, "HTTP error: HTTP status 429");
    }
}
