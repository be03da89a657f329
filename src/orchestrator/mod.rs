//! Update orchestrator: drives the style reload sequence.
//!
//! The orchestrator owns the [`StyleRegistry`] instance explicitly (no
//! process-wide state) and runs the provider loads in fixed order:
//! clear, built-in bundle, internal defaults, online feed, user config
//! file. The ordering is itself a policy: user overrides always win,
//! online updates override built-ins but not user choices, and a total
//! network failure degrades gracefully to built-in styles only.
//!
//! Each stage is isolated: its failure is logged, recorded on that
//! provider's error slot, and never prevents later stages from running.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::{debug, error, info};

use crate::net::{update_url_from_record, AsyncHttpClient, TxtResolver};
use crate::style::{
    placeholder_file, ProviderError, StyleLoadError, StyleProvider, StyleRegistry,
};

/// Built-in style bundle compiled into the library.
const BUILT_IN_STYLES: &[u8] = include_bytes!("../../assets/mapstyles.json");

/// Configuration of the update orchestrator.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Hostname whose TXT record locates the online style feed
    pub hostname: String,
    /// Version substituted into the online URL template
    pub mod_version: String,
    /// Path of the user style config file
    pub user_style_path: PathBuf,
    /// Whether debug-flagged styles load at all
    pub enable_debug_maps: bool,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        let user_style_path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("terralayer")
            .join("user_styles.json");

        Self {
            hostname: "styles.terralayer.example".to_string(),
            mod_version: crate::VERSION.to_string(),
            user_style_path,
            enable_debug_maps: false,
        }
    }
}

impl UpdateConfig {
    /// Set the online feed hostname.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Set the version substituted into the online URL template.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.mod_version = version.into();
        self
    }

    /// Set the user style config file path.
    pub fn with_user_style_path(mut self, path: PathBuf) -> Self {
        self.user_style_path = path;
        self
    }

    /// Enable loading of debug-flagged styles.
    pub fn with_debug_maps(mut self, enabled: bool) -> Self {
        self.enable_debug_maps = enabled;
        self
    }
}

/// Drives the style registry through its reload sequence.
///
/// Holds the registry behind `Arc<Mutex<_>>`; readers take snapshots via
/// [`StyleRegistry::effective_catalog`] and never observe a torn state.
/// Callers must serialize [`reload`](Self::reload) invocations —
/// interleaved clears and loads from two reloads can produce a torn
/// catalog.
pub struct UpdateOrchestrator<H, R> {
    registry: Arc<Mutex<StyleRegistry>>,
    http: H,
    resolver: R,
    config: UpdateConfig,
}

impl<H, R> UpdateOrchestrator<H, R>
where
    H: AsyncHttpClient,
    R: TxtResolver,
{
    /// Create an orchestrator with a fresh, empty registry.
    pub fn new(config: UpdateConfig, http: H, resolver: R) -> Self {
        let registry = Arc::new(Mutex::new(StyleRegistry::new(config.enable_debug_maps)));
        Self {
            registry,
            http,
            resolver,
            config,
        }
    }

    /// Shared handle to the registry, for map widgets and style pickers.
    pub fn registry(&self) -> Arc<Mutex<StyleRegistry>> {
        Arc::clone(&self.registry)
    }

    /// Get the orchestrator configuration.
    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    /// Run the full reload sequence.
    ///
    /// Clears both catalogs, then loads every provider in precedence
    /// order. Best-effort per tier: a failing stage records its error and
    /// the remaining stages still run.
    pub async fn reload(&self) {
        info!("Reloading map styles");
        self.registry.lock().unwrap().clear();
        self.load_built_ins();
        self.load_internals();
        self.load_online().await;
        self.load_user_file();
    }

    /// Load the style bundle compiled into the library.
    pub fn load_built_ins(&self) {
        let mut registry = self.registry.lock().unwrap();
        registry.set_last_error(StyleProvider::BuiltIn, None);
        match apply_payload(&mut registry, StyleProvider::BuiltIn, BUILT_IN_STYLES) {
            Ok(count) => debug!(styles = count, "Loaded built-in map styles"),
            Err(e) => {
                error!("Failed to read built-in map styles, the map is likely to not work properly!");
                error!(error = %e, "Built-in style bundle rejected");
                registry.set_last_error(StyleProvider::BuiltIn, Some(e.into()));
            }
        }
    }

    /// Load internal default styles.
    pub fn load_internals(&self) {
        let mut registry = self.registry.lock().unwrap();
        registry.set_last_error(StyleProvider::Internal, None);
        // There are currently no internal styles; the stage exists so the
        // provider keeps its slot in the reload order.
    }

    /// Load the online style feed.
    ///
    /// Resolution chain: DNS TXT record at the configured hostname, whose
    /// second pipe-delimited field is a URL template, `${version}`
    /// substituted with the running version, then a plain GET.
    pub async fn load_online(&self) {
        self.registry
            .lock()
            .unwrap()
            .set_last_error(StyleProvider::Online, None);

        let url = match self.resolve_online_url().await {
            Ok(url) => url,
            Err(e) => {
                error!(error = %e, "Failed to resolve map style update URL");
                self.registry
                    .lock()
                    .unwrap()
                    .set_last_error(StyleProvider::Online, Some(e.into()));
                return;
            }
        };

        let payload = match self.http.get(&url).await {
            Ok(payload) => payload,
            Err(e) => {
                error!(url = %url, error = %e, "Failed to download updated map style file");
                self.registry
                    .lock()
                    .unwrap()
                    .set_last_error(StyleProvider::Online, Some(e.into()));
                return;
            }
        };

        let mut registry = self.registry.lock().unwrap();
        match apply_payload(&mut registry, StyleProvider::Online, &payload) {
            Ok(count) => info!(styles = count, url = %url, "Loaded online map styles"),
            Err(e) => {
                error!(error = %e, "Failed to parse updated map style file");
                registry.set_last_error(StyleProvider::Online, Some(e.into()));
            }
        }
    }

    /// Load the user's custom style file.
    ///
    /// An absent file is not an error: a blank, pretty-printed placeholder
    /// is created so users have something to edit. A present but
    /// unparsable file records a non-fatal error on the `Custom` slot and
    /// merges nothing — a half-parsed file never partially overwrites.
    pub fn load_user_file(&self) {
        let mut registry = self.registry.lock().unwrap();
        registry.set_last_error(StyleProvider::Custom, None);
        let path = &self.config.user_style_path;

        if !path.exists() {
            debug!(path = %path.display(), "Map style config file did not exist, creating a blank one");
            if let Err(e) = write_placeholder(path) {
                error!(path = %path.display(), error = %e, "Failed to create map style config file");
                registry.set_last_error(StyleProvider::Custom, Some(ProviderError::Io(e.to_string())));
            }
            return;
        }

        let payload = match std::fs::read(path) {
            Ok(payload) => payload,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to read map style config file");
                registry.set_last_error(StyleProvider::Custom, Some(ProviderError::Io(e.to_string())));
                return;
            }
        };

        match apply_payload(&mut registry, StyleProvider::Custom, &payload) {
            Ok(count) => debug!(styles = count, "Loaded user map styles"),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to parse map style config file");
                registry.set_last_error(StyleProvider::Custom, Some(e.into()));
            }
        }
    }

    /// Resolve the versioned online style URL from DNS.
    async fn resolve_online_url(&self) -> Result<String, crate::net::ResolveError> {
        let records = self.resolver.lookup_txt(&self.config.hostname).await?;
        let record = records
            .first()
            .ok_or_else(|| crate::net::ResolveError::NoRecord(self.config.hostname.clone()))?;
        update_url_from_record(record, &self.config.mod_version)
    }
}

/// Parse a payload and merge it, returning how many styles landed.
fn apply_payload(
    registry: &mut StyleRegistry,
    provider: StyleProvider,
    payload: &[u8],
) -> Result<usize, StyleLoadError> {
    let delta = registry.parse_payload(provider, payload)?;
    let count = delta.styles.len();
    registry.merge(delta);
    Ok(count)
}

/// Write the blank placeholder user style file.
fn write_placeholder(path: &std::path::Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&placeholder_file())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, json)
}
