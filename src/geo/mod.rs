//! Geographic value types and the projection capability surface.
//!
//! Projection mathematics is a host concern; this crate only defines the
//! trait shape it consumes ([`Projection`]) plus the small value types the
//! style catalog and markers need.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A geographic point, longitude/latitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
}

/// Tile-grid bounds of a style at one zoom level.
///
/// Styles with partial world coverage declare, per zoom level, the
/// rectangle of tiles that actually exist upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileBounds {
    /// Lowest covered tile column
    pub lower_x: u32,
    /// Lowest covered tile row
    pub lower_y: u32,
    /// Highest covered tile column (inclusive)
    pub upper_x: u32,
    /// Highest covered tile row (inclusive)
    pub upper_y: u32,
}

impl TileBounds {
    /// Whether the tile at `(x, y)` falls inside these bounds.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.lower_x..=self.upper_x).contains(&x) && (self.lower_y..=self.upper_y).contains(&y)
    }
}

/// The queried point lies outside the projection's domain.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("coordinates ({lon}, {lat}) are outside the projection bounds")]
pub struct OutOfProjectionBounds {
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
}

/// Local distortion of a projection at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tissot {
    /// Area scale factor relative to true area
    pub area_scale: f64,
    /// Maximum angular distortion in radians
    pub angular_distortion: f64,
}

/// Geographic projection capability consumed from the host.
pub trait Projection: Send + Sync {
    /// Compute the Tissot indicatrix of the projection at a point.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfProjectionBounds`] when the point is outside the
    /// projection's domain.
    fn tissot(&self, lon: f64, lat: f64) -> Result<Tissot, OutOfProjectionBounds>;
}
