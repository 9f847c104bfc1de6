use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use super::TransportError;

/// Client-wide default for requests that set no deadline. A per-request
/// timeout replaces it, so vendor calls run on their own `TIMEOUT`.
pub const DEFAULT_SOCKET_TIMEOUT: Duration = Duration::from_secs(10);

/// A single GET against a vendor endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: &'static str,
    pub query: Vec<(&'static str, String)>,
    pub headers: Vec<(&'static str, String)>,
    pub timeout: Duration,
}

impl ApiRequest {
    pub fn get(url: &'static str) -> Self {
        Self {
            url,
            query: Vec::new(),
            headers: Vec::new(),
            timeout: DEFAULT_SOCKET_TIMEOUT,
        }
    }

    pub fn query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Seam between the adapters and the network: one GET, one JSON document.
pub trait HttpClient {
    fn get_json(&self, request: &ApiRequest) -> Result<Value, TransportError>;
}

/// Blocking reqwest client used outside of tests.
#[derive(Debug, Clone)]
pub struct BlockingClient {
    inner: Client,
}

impl BlockingClient {
    pub fn new() -> Result<Self, crate::Error> {
        let inner = Client::builder()
            .timeout(DEFAULT_SOCKET_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(crate::Error::http_client)?;
        Ok(Self { inner })
    }
}

impl HttpClient for BlockingClient {
    fn get_json(&self, request: &ApiRequest) -> Result<Value, TransportError> {
        let mut builder = self
            .inner
            .get(request.url)
            .query(&request.query)
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = builder.send().map_err(TransportError::from_reqwest)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                code: status.as_u16(),
            });
        }
        response.json::<Value>().map_err(TransportError::from_reqwest)
    }
}
