//! Tile style catalog: definitions, file schema, providers, and the
//! registry that merges them.
//!
//! Styles arrive from four ordered providers (built-in bundle, internal
//! defaults, online update feed, user config file). Higher providers
//! overwrite same-id entries from lower ones; the registry exposes the
//! merged result as defensive-copy snapshots only.

mod definition;
mod error;
mod file;
mod provider;
mod registry;

pub use definition::StyleDefinition;
pub use error::{ProviderError, StyleLoadError};
pub use file::{placeholder_file, FileMetadata, StyleEntryModel, StyleFileModel};
pub use provider::StyleProvider;
pub use registry::{StyleCatalogDelta, StyleRegistry};
