//! Per-tile fetch failure taxonomy.

use thiserror::Error;

/// Terminal failure of one tile's fetch pipeline.
///
/// A failed tile stays failed until it is explicitly unloaded; the cache
/// never retries on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileFetchError {
    /// The tile does not exist upstream (404 or empty body)
    #[error("tile not found upstream")]
    NotFound,

    /// The tile could not be downloaded
    #[error("tile download failed: {0}")]
    Network(String),

    /// The response bytes are not a decodable image
    #[error("tile image decode failed: {0}")]
    Decode(String),

    /// The decoded image could not be uploaded as a texture
    #[error("tile texture upload failed: {0}")]
    Upload(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TileFetchError::NotFound.to_string(), "tile not found upstream");
        assert_eq!(
            TileFetchError::Network("connection reset".to_string()).to_string(),
            "tile download failed: connection reset"
        );
        assert_eq!(
            TileFetchError::Decode("bad magic".to_string()).to_string(),
            "tile image decode failed: bad magic"
        );
    }

    #[test]
    fn test_error_trait() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<TileFetchError>();
    }
}
