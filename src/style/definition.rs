//! Effective style definitions.

use std::collections::BTreeMap;

use tracing::warn;

use crate::geo::TileBounds;
use crate::tile::{TileIdentity, TilePosition};

use super::{StyleEntryModel, StyleLoadError, StyleProvider};

/// A fully resolved tile style.
///
/// Produced by converting a [`StyleEntryModel`] from one provider; carries
/// the provider and the defining file's version/comment so conflicting
/// definitions stay distinguishable after a merge.
#[derive(Debug, Clone)]
pub struct StyleDefinition {
    /// Style id, unique within one provider tier
    pub id: String,
    /// Ordered, non-empty URL pattern list; later entries are mirrors
    pub url_patterns: Vec<String>,
    /// Lowest zoom level the style covers
    pub min_zoom: u32,
    /// Highest zoom level the style covers
    pub max_zoom: u32,
    /// Ordering hint for style pickers, higher first
    pub display_priority: i32,
    /// Whether the style may be used on the minimap
    pub allow_on_minimap: bool,
    /// Provider this definition came from
    pub provider: StyleProvider,
    /// Version of the defining style file
    pub version: u64,
    /// Comment of the defining style file
    pub comment: String,
    /// Per-style cap on concurrent tile requests
    pub max_concurrent_requests: u32,
    /// Debug styles are hidden unless debug maps are enabled
    pub debug: bool,
    /// Localized display names, keyed by locale
    pub name: BTreeMap<String, String>,
    /// Localized copyright rich text, keyed by locale
    pub copyright: BTreeMap<String, serde_json::Value>,
    /// Per-zoom coverage bounds
    pub bounds: BTreeMap<u32, TileBounds>,
}

impl StyleDefinition {
    /// Convert a saved style entry into an effective definition.
    ///
    /// Legacy entries with a single `url` field are promoted to a
    /// one-element pattern list. Bounds keys that do not parse as zoom
    /// levels are skipped with a warning; the rest of the entry loads
    /// normally.
    ///
    /// # Errors
    ///
    /// Returns [`StyleLoadError::InvalidStyle`] when neither `urls` nor the
    /// legacy `url` field yields a pattern.
    pub fn from_entry(
        id: &str,
        entry: StyleEntryModel,
        provider: StyleProvider,
        version: u64,
        comment: &str,
    ) -> Result<Self, StyleLoadError> {
        let url_patterns = match entry.urls {
            Some(urls) if !urls.is_empty() => urls,
            _ => match entry.url {
                // Legacy source with a single url field.
                Some(url) => vec![url],
                None => {
                    return Err(StyleLoadError::InvalidStyle {
                        id: id.to_string(),
                        provider,
                    })
                }
            },
        };

        let mut bounds = BTreeMap::new();
        for (key, value) in entry.bounds {
            match key.parse::<u32>() {
                Ok(zoom) => {
                    bounds.insert(zoom, value);
                }
                Err(e) => {
                    warn!(
                        style = id,
                        key = %key,
                        "Ignoring invalid zoom level: {}",
                        e
                    );
                }
            }
        }

        Ok(Self {
            id: id.to_string(),
            url_patterns,
            min_zoom: entry.min_zoom,
            max_zoom: entry.max_zoom,
            display_priority: entry.display_priority,
            allow_on_minimap: entry.allow_on_minimap,
            provider,
            version,
            comment: comment.to_string(),
            max_concurrent_requests: entry.max_concurrent_requests,
            debug: entry.debug,
            name: entry.name,
            copyright: entry.copyright,
            bounds,
        })
    }

    /// Get the display name for a locale, if the style localizes it.
    pub fn localized_name(&self, locale: &str) -> Option<&str> {
        self.name.get(locale).map(String::as_str)
    }

    /// Get the coverage bounds at a zoom level, if the style declares any.
    pub fn bounds_at(&self, zoom: u32) -> Option<&TileBounds> {
        self.bounds.get(&zoom)
    }

    /// Whether a tile position falls inside the style's declared coverage.
    ///
    /// Positions at zoom levels without declared bounds are covered.
    pub fn covers(&self, position: TilePosition) -> bool {
        match self.bounds_at(position.zoom()) {
            Some(bounds) => bounds.contains(position.x(), position.y()),
            None => true,
        }
    }

    /// Resolve the tile identity for a position.
    ///
    /// Mirror patterns are rotated by position so load spreads across them
    /// while the pattern choice stays deterministic per tile.
    pub fn tile_identity(&self, position: TilePosition) -> TileIdentity {
        let index = (position.x() as usize + position.y() as usize) % self.url_patterns.len();
        TileIdentity::new(&self.url_patterns[index], position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(json: &str) -> StyleEntryModel {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_legacy_url_promoted_to_pattern_list() {
        let legacy = entry(r#"{ "url": "http://x/{z}/{x}/{y}.png" }"#);
        let modern = entry(r#"{ "urls": ["http://x/{z}/{x}/{y}.png"] }"#);

        let a =
            StyleDefinition::from_entry("osm", legacy, StyleProvider::BuiltIn, 1, "c").unwrap();
        let b =
            StyleDefinition::from_entry("osm", modern, StyleProvider::BuiltIn, 1, "c").unwrap();

        assert_eq!(a.url_patterns, b.url_patterns);
        assert_eq!(a.url_patterns, vec!["http://x/{z}/{x}/{y}.png".to_string()]);
    }

    #[test]
    fn test_no_url_pattern_is_invalid_style() {
        let result = StyleDefinition::from_entry(
            "broken",
            entry(r#"{ "min_zoom": 0 }"#),
            StyleProvider::Custom,
            1,
            "",
        );
        assert!(matches!(
            result,
            Err(StyleLoadError::InvalidStyle { id, provider: StyleProvider::Custom }) if id == "broken"
        ));
    }

    #[test]
    fn test_empty_urls_falls_back_to_legacy_field() {
        let definition = StyleDefinition::from_entry(
            "osm",
            entry(r#"{ "urls": [], "url": "http://x/{z}/{x}/{y}.png" }"#),
            StyleProvider::BuiltIn,
            1,
            "",
        )
        .unwrap();
        assert_eq!(definition.url_patterns.len(), 1);
    }

    #[test]
    fn test_invalid_bounds_key_skipped_rest_kept() {
        let definition = StyleDefinition::from_entry(
            "osm",
            entry(
                r#"{
                    "urls": ["http://x/{z}/{x}/{y}.png"],
                    "bounds": {
                        "abc": { "lower_x": 0, "lower_y": 0, "upper_x": 1, "upper_y": 1 },
                        "3": { "lower_x": 0, "lower_y": 0, "upper_x": 7, "upper_y": 7 }
                    }
                }"#,
            ),
            StyleProvider::BuiltIn,
            1,
            "",
        )
        .unwrap();

        assert_eq!(definition.bounds.len(), 1, "only the numeric key should load");
        assert!(definition.bounds_at(3).is_some());
    }

    #[test]
    fn test_covers_without_bounds_is_unbounded() {
        let definition = StyleDefinition::from_entry(
            "osm",
            entry(r#"{ "urls": ["http://x/{z}/{x}/{y}.png"] }"#),
            StyleProvider::BuiltIn,
            1,
            "",
        )
        .unwrap();
        assert!(definition.covers(TilePosition::new(7, 100, 90).unwrap()));
    }

    #[test]
    fn test_covers_respects_declared_bounds() {
        let definition = StyleDefinition::from_entry(
            "regional",
            entry(
                r#"{
                    "urls": ["http://x/{z}/{x}/{y}.png"],
                    "bounds": { "3": { "lower_x": 2, "lower_y": 2, "upper_x": 4, "upper_y": 4 } }
                }"#,
            ),
            StyleProvider::BuiltIn,
            1,
            "",
        )
        .unwrap();

        assert!(definition.covers(TilePosition::new(3, 3, 3).unwrap()));
        assert!(!definition.covers(TilePosition::new(3, 0, 0).unwrap()));
    }

    #[test]
    fn test_tile_identity_rotates_mirrors_deterministically() {
        let definition = StyleDefinition::from_entry(
            "mirrored",
            entry(r#"{ "urls": ["http://a/{z}/{x}/{y}.png", "http://b/{z}/{x}/{y}.png"] }"#),
            StyleProvider::BuiltIn,
            1,
            "",
        )
        .unwrap();

        let even = definition.tile_identity(TilePosition::new(4, 1, 1).unwrap());
        let odd = definition.tile_identity(TilePosition::new(4, 1, 2).unwrap());
        assert!(even.url().starts_with("http://a/"));
        assert!(odd.url().starts_with("http://b/"));

        // Same position always resolves to the same mirror.
        let again = definition.tile_identity(TilePosition::new(4, 1, 1).unwrap());
        assert_eq!(even, again);
    }

    #[test]
    fn test_localized_name() {
        let definition = StyleDefinition::from_entry(
            "osm",
            entry(
                r#"{
                    "urls": ["http://x/{z}/{x}/{y}.png"],
                    "name": { "en_us": "OpenStreetMap", "fr_fr": "OpenStreetMap (FR)" }
                }"#,
            ),
            StyleProvider::BuiltIn,
            1,
            "",
        )
        .unwrap();

        assert_eq!(definition.localized_name("fr_fr"), Some("OpenStreetMap (FR)"));
        assert_eq!(definition.localized_name("de_de"), None);
    }
}
