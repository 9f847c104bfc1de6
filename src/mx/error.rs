use thiserror::Error;

/// Failures of an MX lookup. The `Display` form is the note attached to the
/// basic checks.
#[derive(Debug, Error)]
pub enum MxError {
    #[error("MX lookup error: domain is empty")]
    EmptyDomain,
    #[error("MX lookup error: domain IDNA conversion failed")]
    IdnaConversion {
        #[source]
        source: idna::Errors,
    },
    #[error("MX lookup error: resolver initialization failed: {0}")]
    ResolverInit(String),
    #[error("MX lookup: NXDOMAIN")]
    NoSuchDomain,
    #[error("MX lookup: NoAnswer")]
    NoAnswer,
    #[error("MX lookup: timeout")]
    Timeout,
    #[error("MX lookup returned no usable records.")]
    NoUsableRecords,
    #[error("MX lookup error: {source}")]
    Lookup {
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
}

impl MxError {
    pub(crate) fn idna(source: idna::Errors) -> Self {
        Self::IdnaConversion { source }
    }

    pub(crate) fn resolver_init<T: std::fmt::Display>(err: T) -> Self {
        Self::ResolverInit(err.to_string())
    }

    pub(crate) fn lookup(source: trust_dns_resolver::error::ResolveError) -> Self {
        Self::Lookup { source }
    }
}
