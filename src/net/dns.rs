//! DNS TXT resolution of the online style source.
//!
//! The style update feed is located through a TXT record rather than a
//! hard-coded URL, so the update source can move without a client release.
//! The record is pipe-delimited; its second field is a URL template
//! containing the literal token `${version}`.

use std::future::Future;

use thiserror::Error;
use tracing::debug;

/// Errors raised while resolving the online style source.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// No TXT record exists at the hostname
    #[error("no TXT record found at {0}")]
    NoRecord(String),

    /// A TXT record exists but does not follow the expected format
    #[error("TXT record at {0} is malformed")]
    Malformed(String),

    /// The DNS lookup itself failed
    #[error("DNS lookup for {hostname} failed: {message}")]
    Lookup { hostname: String, message: String },
}

/// Trait for DNS TXT lookups.
///
/// Abstracted so tests can resolve against a fixed record set instead of a
/// live name server.
pub trait TxtResolver: Send + Sync {
    /// Look up the TXT records published at `hostname`.
    ///
    /// # Returns
    ///
    /// One string per TXT record, with multi-part records joined.
    fn lookup_txt(
        &self,
        hostname: &str,
    ) -> impl Future<Output = Result<Vec<String>, ResolveError>> + Send;
}

/// TXT resolver backed by hickory-resolver.
pub struct HickoryTxtResolver {
    resolver: hickory_resolver::TokioAsyncResolver,
}

impl HickoryTxtResolver {
    /// Create a resolver from the system DNS configuration.
    pub fn from_system_conf() -> Result<Self, ResolveError> {
        let resolver = hickory_resolver::TokioAsyncResolver::tokio_from_system_conf().map_err(
            |e| ResolveError::Lookup {
                hostname: String::new(),
                message: format!("failed to read system DNS configuration: {e}"),
            },
        )?;
        Ok(Self { resolver })
    }
}

impl TxtResolver for HickoryTxtResolver {
    async fn lookup_txt(&self, hostname: &str) -> Result<Vec<String>, ResolveError> {
        let lookup = self.resolver.txt_lookup(hostname).await.map_err(|e| {
            use hickory_resolver::error::ResolveErrorKind;
            match e.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => {
                    ResolveError::NoRecord(hostname.to_string())
                }
                _ => ResolveError::Lookup {
                    hostname: hostname.to_string(),
                    message: e.to_string(),
                },
            }
        })?;

        let records: Vec<String> = lookup
            .iter()
            .map(|txt| {
                txt.txt_data()
                    .iter()
                    .map(|part| String::from_utf8_lossy(part).into_owned())
                    .collect::<String>()
            })
            .collect();

        if records.is_empty() {
            return Err(ResolveError::NoRecord(hostname.to_string()));
        }

        debug!(hostname = hostname, records = records.len(), "TXT lookup resolved");
        Ok(records)
    }
}

/// Derive the versioned style update URL from a TXT record.
///
/// The record is split on `|`; the second field is the URL template, in
/// which every `${version}` token is replaced with `version`.
///
/// # Errors
///
/// Returns [`ResolveError::Malformed`] when the record has no second field.
pub fn update_url_from_record(record: &str, version: &str) -> Result<String, ResolveError> {
    let template = record
        .split('|')
        .nth(1)
        .ok_or_else(|| ResolveError::Malformed(record.to_string()))?;
    Ok(template.replace("${version}", version))
}
