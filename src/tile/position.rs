//! Web-mercator tile grid position.

use thiserror::Error;

/// Errors raised when constructing a tile position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// Tile coordinates do not exist at the given zoom level
    #[error("tile ({x}, {y}) is out of range at zoom {zoom}")]
    OutOfRange { zoom: u32, x: u32, y: u32 },
}

/// Immutable position of a tile in the web-map tiling grid.
///
/// Invariant: `x` and `y` are both strictly less than `2^zoom`. The
/// invariant is enforced at construction, so a `TilePosition` value is
/// always a real tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePosition {
    zoom: u32,
    x: u32,
    y: u32,
}

impl TilePosition {
    /// Create a new tile position.
    ///
    /// # Arguments
    ///
    /// * `zoom` - Zoom level (0 is the single whole-world tile)
    /// * `x` - Tile column, `0 <= x < 2^zoom`
    /// * `y` - Tile row, `0 <= y < 2^zoom`
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::OutOfRange`] if `x` or `y` does not fit
    /// within the grid at `zoom`.
    pub fn new(zoom: u32, x: u32, y: u32) -> Result<Self, PositionError> {
        // At zoom >= 32 the grid side exceeds u32::MAX, so any x/y fits.
        if let Some(side) = 1u32.checked_shl(zoom).filter(|_| zoom < 32) {
            if x >= side || y >= side {
                return Err(PositionError::OutOfRange { zoom, x, y });
            }
        }
        Ok(Self { zoom, x, y })
    }

    /// Get the zoom level.
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Get the tile column.
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Get the tile row.
    pub fn y(&self) -> u32 {
        self.y
    }
}
