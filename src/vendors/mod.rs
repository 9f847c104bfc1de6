//! Adapters for the third-party verification and discovery APIs.
//!
//! Each adapter is a pair of free functions: one issues the request through an
//! [`HttpClient`], the other maps the vendor payload onto the shared signal
//! shapes. Adapters hold no state and never return errors.

pub mod abstract_api;
mod error;
pub mod hunter;
pub mod mailboxlayer;
mod transport;

pub use error::TransportError;
pub use transport::{ApiRequest, BlockingClient, DEFAULT_SOCKET_TIMEOUT, HttpClient};

use std::fmt;

use serde::Serialize;

use crate::signal::VerificationSignal;

pub(crate) const NO_API_KEY: &str = "No API key";

/// Verification vendors, in the order they are consulted.
pub const PRECEDENCE: [Vendor; 3] = [Vendor::Hunter, Vendor::Abstract, Vendor::MailboxLayer];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Vendor {
    Hunter,
    Abstract,
    MailboxLayer,
}

impl Vendor {
    pub fn name(self) -> &'static str {
        match self {
            Self::Hunter => hunter::NAME,
            Self::Abstract => abstract_api::NAME,
            Self::MailboxLayer => mailboxlayer::NAME,
        }
    }

    pub fn api_key(self, keys: &ApiKeys) -> Option<&str> {
        match self {
            Self::Hunter => keys.hunter.as_deref(),
            Self::Abstract => keys.abstract_api.as_deref(),
            Self::MailboxLayer => keys.mailboxlayer.as_deref(),
        }
    }

    pub fn verify<C>(self, client: &C, address: &str, api_key: Option<&str>) -> VerificationSignal
    where
        C: HttpClient + ?Sized,
    {
        tracing::debug!(vendor = self.name(), configured = api_key.is_some(), "consulting vendor");
        match self {
            Self::Hunter => hunter::verify(client, address, api_key),
            Self::Abstract => abstract_api::verify(client, address, api_key),
            Self::MailboxLayer => mailboxlayer::verify(client, address, api_key),
        }
    }
}

/// Optional credentials, one per vendor. A missing key disables that vendor.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKeys {
    pub abstract_api: Option<String>,
    pub mailboxlayer: Option<String>,
    pub hunter: Option<String>,
}

impl ApiKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_abstract(mut self, key: impl Into<String>) -> Self {
        self.abstract_api = non_empty(key.into());
        self
    }

    pub fn with_mailboxlayer(mut self, key: impl Into<String>) -> Self {
        self.mailboxlayer = non_empty(key.into());
        self
    }

    pub fn with_hunter(mut self, key: impl Into<String>) -> Self {
        self.hunter = non_empty(key.into());
        self
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn mask(key: &Option<String>) -> &'static str {
            if key.is_some() { "<set>" } else { "<unset>" }
        }
        f.debug_struct("ApiKeys")
            .field("abstract_api", &mask(&self.abstract_api))
            .field("mailboxlayer", &mask(&self.mailboxlayer))
            .field("hunter", &mask(&self.hunter))
            .finish()
    }
}

fn non_empty(key: String) -> Option<String> {
    let trimmed = key.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn transport_failure(source: &'static str, err: &TransportError) -> VerificationSignal {
    tracing::warn!(vendor = source, error = %err, "vendor request failed");
    VerificationSignal::inconclusive(source, format!("HTTP error: {err}"))
}

#[cfg(test)]
pub(crate) mod tests;
