//! Tile identity resolved against a style URL pattern.

use std::hash::{Hash, Hasher};

use super::TilePosition;

/// Identity of a tile as the texture cache sees it.
///
/// The URL is derived once at construction by substituting `{x}`, `{y}` and
/// `{z}` in the style's URL pattern. Equality and hash are by the resolved
/// URL alone: two identities with the same URL are the same cache entry even
/// at different nominal positions, so identical upstream tiles (degenerate
/// zoom levels, single-tile styles) share one fetch and one texture.
#[derive(Debug, Clone)]
pub struct TileIdentity {
    position: TilePosition,
    url: String,
}

impl TileIdentity {
    /// Resolve a tile identity from a style URL pattern.
    ///
    /// # Arguments
    ///
    /// * `url_pattern` - Pattern containing `{x}`, `{y}`, `{z}` placeholders
    /// * `position` - Nominal tile grid position
    pub fn new(url_pattern: &str, position: TilePosition) -> Self {
        let url = url_pattern
            .replace("{x}", &position.x().to_string())
            .replace("{y}", &position.y().to_string())
            .replace("{z}", &position.zoom().to_string());
        Self { position, url }
    }

    /// Get the nominal tile position.
    pub fn position(&self) -> TilePosition {
        self.position
    }

    /// Get the fully resolved tile URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PartialEq for TileIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for TileIdentity {}

impl Hash for TileIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}
