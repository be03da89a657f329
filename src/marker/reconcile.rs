//! The generic marker reconciliation algorithm.

use std::collections::{HashMap, HashSet};

use super::{EntityKey, Marker};

/// Delta between materialized markers and the live entity set.
#[derive(Debug, Clone, Default)]
pub struct MarkerDelta {
    /// Fresh markers for entities that had none
    pub added: Vec<Marker>,
    /// Keys of markers whose backing entity is gone
    pub stale: Vec<EntityKey>,
}

/// Diff a controller's markers against the live external set.
///
/// Produces exactly one new marker per live key that has no marker yet, in
/// the live set's iteration order (duplicate live keys are ignored), and
/// lists every existing marker key no longer backed by a live entity. The
/// caller applies the delta fully before the next reconciliation pass.
///
/// # Arguments
///
/// * `existing` - Markers currently materialized, keyed by entity
/// * `live` - The live external entity set
/// * `exclude` - A key never given a marker here (the local player has a
///   dedicated controller); if it has a leftover marker it is reported stale
/// * `make_marker` - Marker construction capability
pub fn reconcile<E>(
    existing: &HashMap<EntityKey, Marker>,
    live: impl IntoIterator<Item = (EntityKey, E)>,
    exclude: Option<EntityKey>,
    mut make_marker: impl FnMut(EntityKey, E) -> Marker,
) -> MarkerDelta {
    let mut live_keys = HashSet::new();
    let mut added = Vec::new();

    for (key, entity) in live {
        if Some(key) == exclude {
            continue;
        }
        if !live_keys.insert(key) {
            continue;
        }
        if !existing.contains_key(&key) {
            added.push(make_marker(key, entity));
        }
    }

    let stale = existing
        .keys()
        .filter(|key| !live_keys.contains(key))
        .copied()
        .collect();

    MarkerDelta { added, stale }
}
