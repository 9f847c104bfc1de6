use thiserror::Error;

/// Setup failures. The verification pipeline itself degrades instead of
/// failing; only building the HTTP client can stop a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP client initialization failed: {source}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    pub(crate) fn http_client(source: reqwest::Error) -> Self {
        Self::HttpClient { source }
    }
}
