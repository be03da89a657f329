//! Style loading error taxonomy.
//!
//! Failures are isolated per unit of work: a `Parse` failure aborts one
//! payload, an `InvalidStyle` skips one entry, an `InvalidZoomLevel` skips
//! one bounds key. Nothing here is fatal to the process.

use thiserror::Error;

use crate::net::{FetchError, ResolveError};

use super::StyleProvider;

/// Errors raised while loading a style payload.
#[derive(Debug, Clone, Error)]
pub enum StyleLoadError {
    /// The payload is not a well-formed style file
    #[error("malformed style payload: {0}")]
    Parse(String),

    /// A single entry has no usable URL pattern
    #[error("style '{id}' from {provider} provider has no usable URL pattern")]
    InvalidStyle { id: String, provider: StyleProvider },

    /// A single bounds key does not parse as a zoom level
    #[error("invalid zoom level '{key}' in bounds of style '{id}'")]
    InvalidZoomLevel { id: String, key: String },
}

/// Failure recorded on a provider's last-error slot.
///
/// A slot holds whichever stage of that provider's load pipeline failed
/// last: resolution, transport, filesystem, or parsing.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Style payload could not be loaded
    #[error(transparent)]
    Load(#[from] StyleLoadError),

    /// Online source resolution failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Style payload download failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Style config file could not be read or created
    #[error("style config file error: {0}")]
    Io(String),
}
