//! Tile identity types.
//!
//! A tile is addressed by zoom/x/y in the standard web-map tiling scheme.
//! [`TilePosition`] is the nominal grid address; [`TileIdentity`] adds the
//! URL resolved from a style's URL pattern and is the key the texture cache
//! deduplicates on.

mod identity;
mod position;

pub use identity::TileIdentity;
pub use position::{PositionError, TilePosition};
