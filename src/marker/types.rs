//! Marker value types.

use uuid::Uuid;

use crate::geo::GeoPoint;

/// Stable external identity of a marker's backing entity.
///
/// Player and entity UUIDs come from the host game and survive across
/// ticks, which is what makes reconciliation deltas minimal.
pub type EntityKey = Uuid;

/// A marker materialized on the map for one live entity.
///
/// Markers are owned by the controller that created them and are destroyed
/// when their backing entity key disappears from the external source.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Backing entity key
    pub key: EntityKey,
    /// Id of the owning controller
    pub controller: String,
    /// Geographic position of the marker
    pub location: GeoPoint,
    /// Display label
    pub label: String,
}

impl Marker {
    /// Create a marker for an entity.
    pub fn new(
        key: EntityKey,
        controller: impl Into<String>,
        location: GeoPoint,
        label: impl Into<String>,
    ) -> Self {
        Self {
            key,
            controller: controller.into(),
            location,
            label: label.into(),
        }
    }
}
