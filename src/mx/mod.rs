//! DNS MX resolution.
//!
//! The entry point is [`resolve_mx`], which performs a synchronous lookup
//! through a [`LookupMx`] (usually [`SystemResolver`]) and returns a
//! [`MxReport`]. Lookups never fail: NXDOMAIN, empty answers, timeouts and
//! other errors become report notes.

mod error;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use resolver::{DEFAULT_MX_TIMEOUT, LookupMx, SystemResolver, resolve_mx};
pub use types::{MxRdata, MxRecord, MxReport};
