use std::collections::HashSet;
use std::time::Duration;

use trust_dns_resolver::{
    Resolver,
    error::{ResolveError, ResolveErrorKind},
    proto::{
        error::ProtoErrorKind,
        op::ResponseCode,
        rr::{RData, RecordType},
    },
    system_conf::read_system_conf,
};

use super::{Error, MxRdata, MxRecord, MxReport};

/// Default DNS deadline for an MX lookup.
pub const DEFAULT_MX_TIMEOUT: Duration = Duration::from_secs(5);

/// Lookup MX records for `domain` through `resolver`.
///
/// Never fails: every DNS problem is folded into the report's notes and an
/// empty record list.
pub fn resolve_mx<R>(resolver: &R, domain: &str, timeout: Duration) -> MxReport
where
    R: LookupMx + ?Sized,
{
    match lookup_records(resolver, domain, timeout) {
        Ok(records) => {
            tracing::debug!(domain, primary = %records[0].exchange, count = records.len(), "MX records found");
            MxReport {
                records,
                notes: Vec::new(),
            }
        }
        Err(err) => {
            tracing::debug!(domain, error = %err, "MX lookup failed");
            MxReport {
                records: Vec::new(),
                notes: vec![err.to_string()],
            }
        }
    }
}

/// Usable records sorted by ascending preference; ties keep answer order.
pub(crate) fn lookup_records<R>(
    resolver: &R,
    domain: &str,
    timeout: Duration,
) -> Result<Vec<MxRecord>, Error>
where
    R: LookupMx + ?Sized,
{
    let ascii = normalize_domain(domain)?;
    let answers = resolver.lookup_mx(&ascii, timeout)?;

    let mut seen = HashSet::new();
    let mut records: Vec<MxRecord> = answers
        .iter()
        .filter_map(parse_mx_rdata)
        .filter(|record| seen.insert(record.clone()))
        .collect();

    if records.is_empty() {
        return Err(Error::NoUsableRecords);
    }
    records.sort_by_key(|record| record.preference);
    Ok(records)
}

/// Extract `(preference, host)` from an answer: structured fields first, then
/// the textual `"<preference> <host>"` form. Records missing either part are
/// unusable.
pub(crate) fn parse_mx_rdata(rdata: &MxRdata) -> Option<MxRecord> {
    let mut preference = rdata.preference;
    let mut host = rdata
        .exchange
        .as_deref()
        .map(normalize_exchange)
        .filter(|h| !h.is_empty());

    if preference.is_none() || host.is_none() {
        if let Some(text) = rdata.text.as_deref() {
            let mut parts = text.split_whitespace();
            if let (Some(pref), Some(exchange)) = (parts.next(), parts.next()) {
                if let Ok(pref) = pref.parse::<u16>() {
                    preference = Some(pref);
                }
                host = Some(normalize_exchange(exchange)).filter(|h| !h.is_empty());
            }
        }
    }

    Some(MxRecord::new(preference?, host?))
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, Error> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(Error::idna)
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    let trimmed = exchange.trim().trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

pub trait LookupMx {
    fn lookup_mx(&self, domain: &str, timeout: Duration) -> Result<Vec<MxRdata>, Error>;
}

/// Resolver built from `/etc/resolv.conf` (or the platform equivalent) for
/// each lookup, with a single attempt bounded by the caller's timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl LookupMx for SystemResolver {
    fn lookup_mx(&self, domain: &str, timeout: Duration) -> Result<Vec<MxRdata>, Error> {
        let (config, mut opts) = read_system_conf().map_err(Error::resolver_init)?;
        opts.timeout = timeout;
        opts.attempts = 1;
        let resolver = Resolver::new(config, opts).map_err(Error::resolver_init)?;

        let lookup = resolver
            .lookup(fully_qualified(domain), RecordType::MX)
            .map_err(classify_resolve_error)?;
        Ok(lookup.iter().map(rdata_from).collect())
    }
}

/// Absolute form of `domain`, so resolv.conf search suffixes are never tried.
pub(crate) fn fully_qualified(domain: &str) -> String {
    format!("{}.", domain.trim_end_matches('.'))
}

fn rdata_from(rdata: &RData) -> MxRdata {
    match rdata {
        RData::MX(mx) => MxRdata {
            preference: Some(mx.preference()),
            exchange: Some(mx.exchange().to_utf8()),
            text: Some(rdata.to_string()),
        },
        other => MxRdata::text(other.to_string()),
    }
}

pub(crate) fn classify_resolve_error(err: ResolveError) -> Error {
    let known = match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. }
            if *response_code == ResponseCode::NXDomain =>
        {
            Some(Error::NoSuchDomain)
        }
        ResolveErrorKind::NoRecordsFound { .. } => Some(Error::NoAnswer),
        ResolveErrorKind::Timeout => Some(Error::Timeout),
        ResolveErrorKind::Proto(proto) if matches!(proto.kind(), ProtoErrorKind::Timeout) => {
            Some(Error::Timeout)
        }
        _ => None,
    };
    known.unwrap_or_else(|| Error::lookup(err))
}
