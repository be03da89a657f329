//! Style file schema.
//!
//! The on-disk and on-wire format shared by the built-in bundle, the online
//! update feed, and the user config file:
//!
//! ```json
//! {
//!   "metadata": { "version": 4, "comment": "..." },
//!   "maps": {
//!     "osm": {
//!       "urls": ["https://tile.openstreetmap.org/{z}/{x}/{y}.png"],
//!       "min_zoom": 0, "max_zoom": 19,
//!       "display_priority": 10, "allow_on_minimap": true,
//!       "name": { "en_us": "OpenStreetMap" },
//!       "bounds": { "2": { "lower_x": 0, "lower_y": 0, "upper_x": 3, "upper_y": 3 } }
//!     }
//!   }
//! }
//! ```
//!
//! Legacy files carry a single `url` field instead of `urls`; conversion
//! promotes it to a one-element list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geo::TileBounds;

/// Help text written into a freshly created user style file.
const PLACEHOLDER_COMMENT: &str =
    "Add custom map styles here. See an example at styles.terralayer.example \
     (open in your browser, do not add http or https prefix)";

fn default_max_concurrent_requests() -> u32 {
    2
}

/// File-level metadata of a style file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Version of the file contents, stamped onto every style it defines
    pub version: u64,
    /// Free-form comment, stamped onto every style the file defines
    #[serde(default)]
    pub comment: String,
}

/// One style entry as saved in a style file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleEntryModel {
    /// Legacy single URL pattern, promoted to a one-element `urls` list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Ordered URL pattern list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
    /// Localized display names, keyed by locale
    #[serde(default)]
    pub name: BTreeMap<String, String>,
    /// Localized copyright notices as rich text, keyed by locale
    #[serde(default)]
    pub copyright: BTreeMap<String, serde_json::Value>,
    /// Lowest zoom level the style covers
    #[serde(default)]
    pub min_zoom: u32,
    /// Highest zoom level the style covers
    #[serde(default)]
    pub max_zoom: u32,
    /// Ordering hint for style pickers, higher first
    #[serde(default)]
    pub display_priority: i32,
    /// Whether the style may be used on the minimap
    #[serde(default)]
    pub allow_on_minimap: bool,
    /// Per-style cap on concurrent tile requests
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: u32,
    /// Debug styles are skipped unless debug maps are enabled
    #[serde(default)]
    pub debug: bool,
    /// Per-zoom coverage bounds; keys are zoom levels as strings
    #[serde(default)]
    pub bounds: BTreeMap<String, TileBounds>,
}

/// A complete style file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleFileModel {
    /// File-level metadata
    pub metadata: FileMetadata,
    /// Style entries keyed by style id
    #[serde(default)]
    pub maps: BTreeMap<String, StyleEntryModel>,
}

/// Build the blank placeholder written when the user style file is absent.
pub fn placeholder_file() -> StyleFileModel {
    StyleFileModel {
        metadata: FileMetadata {
            version: 0,
            comment: PLACEHOLDER_COMMENT.to_string(),
        },
        maps: BTreeMap::new(),
    }
}
