//! The style registry: parse, merge, snapshot.
//!
//! One registry instance owns both catalog tiers and the per-provider
//! error slots. It is mutated only by the update orchestrator and read by
//! everyone else through defensive-copy snapshots, so no caller can observe
//! registry-internal mutation.

use std::collections::HashMap;

use tracing::{debug, info};

use super::{ProviderError, StyleDefinition, StyleFileModel, StyleLoadError, StyleProvider};

/// Parsed styles from one provider payload, ready to merge.
#[derive(Debug, Clone)]
pub struct StyleCatalogDelta {
    /// Provider the payload was loaded for
    pub provider: StyleProvider,
    /// Converted style definitions keyed by id
    pub styles: HashMap<String, StyleDefinition>,
}

/// Registry of tile styles from all provider tiers.
pub struct StyleRegistry {
    /// BuiltIn, Internal, and Online styles
    base_maps: HashMap<String, StyleDefinition>,
    /// Custom (user config file) styles
    user_maps: HashMap<String, StyleDefinition>,
    /// Last load failure per provider, `None` after a clean load
    last_errors: [Option<ProviderError>; 4],
    /// Whether debug-flagged styles load at all
    enable_debug_maps: bool,
}

impl StyleRegistry {
    /// Create an empty registry.
    ///
    /// # Arguments
    ///
    /// * `enable_debug_maps` - Load styles carrying the `debug` flag
    pub fn new(enable_debug_maps: bool) -> Self {
        Self {
            base_maps: HashMap::new(),
            user_maps: HashMap::new(),
            last_errors: [None, None, None, None],
            enable_debug_maps,
        }
    }

    /// Parse a style-file payload into a mergeable delta.
    ///
    /// Entries without a usable URL pattern are skipped and logged; bounds
    /// keys that are not zoom levels are skipped inside the entry. Debug
    /// styles are skipped entirely unless debug maps are enabled. The
    /// payload either parses as a whole or not at all, so a half-parsed
    /// file can never partially overwrite a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StyleLoadError::Parse`] when the payload is not a
    /// well-formed style file.
    pub fn parse_payload(
        &self,
        provider: StyleProvider,
        payload: &[u8],
    ) -> Result<StyleCatalogDelta, StyleLoadError> {
        let file: StyleFileModel = serde_json::from_slice(payload)
            .map_err(|e| StyleLoadError::Parse(e.to_string()))?;

        let version = file.metadata.version;
        let comment = file.metadata.comment;
        let mut styles = HashMap::new();
        for (id, entry) in file.maps {
            let definition =
                match StyleDefinition::from_entry(&id, entry, provider, version, &comment) {
                    Ok(definition) => definition,
                    Err(e) => {
                        // One unusable entry never aborts the payload.
                        tracing::error!(style = %id, provider = %provider, "Skipping style: {}", e);
                        continue;
                    }
                };
            if definition.debug && !self.enable_debug_maps {
                info!(style = %id, "Not loading debug map style");
                continue;
            }
            styles.insert(id, definition);
        }

        debug!(
            provider = %provider,
            styles = styles.len(),
            version = version,
            "Parsed style payload"
        );
        Ok(StyleCatalogDelta { provider, styles })
    }

    /// Merge a delta into the catalog tier its provider belongs to.
    ///
    /// Merging only ever adds or overwrites same-id entries; nothing is
    /// removed until the next [`clear`](Self::clear). Called in strict
    /// provider order by the orchestrator so precedence is a total order.
    pub fn merge(&mut self, delta: StyleCatalogDelta) {
        let catalog = if delta.provider.is_user() {
            &mut self.user_maps
        } else {
            &mut self.base_maps
        };
        catalog.extend(delta.styles);
    }

    /// Discard both catalog tiers.
    ///
    /// Error slots are left alone: they are preserved across reloads until
    /// the next load attempt for their provider.
    pub fn clear(&mut self) {
        self.base_maps.clear();
        self.user_maps.clear();
    }

    /// Snapshot of the base catalog (BuiltIn/Internal/Online tiers).
    ///
    /// The returned map is a fresh copy and can be mutated safely.
    pub fn base_maps(&self) -> HashMap<String, StyleDefinition> {
        self.base_maps.clone()
    }

    /// Snapshot of the user catalog (Custom tier).
    ///
    /// The returned map is a fresh copy and can be mutated safely.
    pub fn user_maps(&self) -> HashMap<String, StyleDefinition> {
        self.user_maps.clone()
    }

    /// Snapshot of the merged effective catalog.
    ///
    /// User styles overwrite same-id base styles, completing the provider
    /// precedence chain. The returned map is a fresh copy.
    pub fn effective_catalog(&self) -> HashMap<String, StyleDefinition> {
        let mut catalog = self.base_maps.clone();
        catalog.extend(self.user_maps.iter().map(|(k, v)| (k.clone(), v.clone())));
        catalog
    }

    /// Record or clear the last error for a provider.
    pub fn set_last_error(&mut self, provider: StyleProvider, error: Option<ProviderError>) {
        self.last_errors[provider.index()] = error;
    }

    /// Get the last recorded error for a provider, if any.
    pub fn last_error(&self, provider: StyleProvider) -> Option<&ProviderError> {
        self.last_errors[provider.index()].as_ref()
    }

    /// Whether debug-flagged styles are being loaded.
    pub fn debug_maps_enabled(&self) -> bool {
        self.enable_debug_maps
    }
}
