//! Tile texture cache.
//!
//! Owns the per-tile fetch/decode/upload state machine and every texture
//! handle it produces. The render loop drives it through non-blocking
//! [`TileTextureCache::query`] calls; network work runs on an injected
//! tokio runtime and is only ever observed by polling.

mod cache;
mod error;
mod uploader;

pub use cache::{TileQueryResult, TileTextureCache};
pub use error::TileFetchError;
pub use uploader::{TextureError, TextureHandle, TextureUploader};
