//! Generic marker controller.

use std::collections::HashMap;

use tracing::trace;

use super::{reconcile, EntityKey, Marker};

/// Capabilities the surrounding context grants to marker controllers.
///
/// Supplied fresh by the host on every tick; controllers must never cache
/// any of these values across queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerContext {
    /// Whether a geographic projection is currently active
    pub projection_active: bool,
    /// Whether showing other players on the map is allowed
    pub allow_player_radar: bool,
    /// Whether showing hostile mobs on the map is allowed
    pub allow_mob_radar: bool,
    /// Key of the local player, if one exists
    pub local_player: Option<EntityKey>,
}

/// Capability set of one marker kind.
///
/// Parameterizes the generic reconciliation in [`MarkerController`]:
/// which entities participate, how their stable key is extracted, how a
/// marker is built, and when the context allows the kind at all.
pub trait MarkerAdapter {
    /// Entity type this adapter reads from the live set.
    type Entity;

    /// Whether this controller materializes markers for the entity at all.
    fn includes(&self, _entity: &Self::Entity) -> bool {
        true
    }

    /// Extract the entity's stable external key.
    fn key(&self, entity: &Self::Entity) -> EntityKey;

    /// Construct a fresh marker for the entity.
    fn marker(&self, controller_id: &str, entity: &Self::Entity) -> Marker;

    /// Capability predicate from the surrounding context.
    fn allowed(&self, ctx: &ControllerContext) -> bool;

    /// Key always excluded from this controller's reconciliation.
    fn excluded_key(&self, _ctx: &ControllerContext) -> Option<EntityKey> {
        None
    }
}

/// What one update pass changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateSummary {
    /// Markers created this pass
    pub added: usize,
    /// Markers destroyed this pass
    pub removed: usize,
}

/// A marker controller: one marker kind, its toggle, and its markers.
///
/// Owns the markers it materializes exclusively; no marker is shared
/// across controllers. Reconciliation runs at most once per tick and its
/// delta is fully applied before [`update`](Self::update) returns.
pub struct MarkerController<A: MarkerAdapter> {
    id: String,
    priority: i32,
    toggled: bool,
    adapter: A,
    markers: HashMap<EntityKey, Marker>,
}

impl<A: MarkerAdapter> MarkerController<A> {
    /// Create a controller.
    ///
    /// # Arguments
    ///
    /// * `id` - Controller id, also stamped on its markers
    /// * `priority` - Draw ordering among controllers, higher on top
    /// * `adapter` - Capability set for this marker kind
    pub fn new(id: impl Into<String>, priority: i32, adapter: A) -> Self {
        Self {
            id: id.into(),
            priority,
            toggled: true,
            adapter,
            markers: HashMap::new(),
        }
    }

    /// Get the controller id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the draw priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Set the user-facing visibility toggle.
    pub fn set_toggled(&mut self, toggled: bool) {
        self.toggled = toggled;
    }

    /// Get the user-facing visibility toggle.
    pub fn toggled(&self) -> bool {
        self.toggled
    }

    /// Effective visibility: the toggle AND the context capability.
    ///
    /// The capability predicate is re-evaluated on every call; permissions
    /// can be revoked between ticks and must never be cached.
    pub fn is_visible(&self, ctx: &ControllerContext) -> bool {
        self.toggled && self.adapter.allowed(ctx)
    }

    /// Reconcile against the live entity set and apply the delta.
    ///
    /// Stale markers are destroyed and missing ones created before this
    /// returns, so the next tick's query sees a fully applied state.
    pub fn update(&mut self, live: &[A::Entity], ctx: &ControllerContext) -> UpdateSummary {
        let adapter = &self.adapter;
        let id = &self.id;
        let delta = reconcile(
            &self.markers,
            live.iter()
                .filter(|entity| adapter.includes(entity))
                .map(|entity| (adapter.key(entity), entity)),
            adapter.excluded_key(ctx),
            |_, entity| adapter.marker(id, entity),
        );

        let summary = UpdateSummary {
            added: delta.added.len(),
            removed: delta.stale.len(),
        };
        for key in delta.stale {
            self.markers.remove(&key);
        }
        for marker in delta.added {
            self.markers.insert(marker.key, marker);
        }

        if summary.added > 0 || summary.removed > 0 {
            trace!(
                controller = %self.id,
                added = summary.added,
                removed = summary.removed,
                "Marker reconciliation applied"
            );
        }
        summary
    }

    /// The currently materialized markers.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    /// Number of materialized markers.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}
