//! Map markers and their reconciliation against live entity sets.
//!
//! A single generic reconciliation algorithm ([`reconcile`]) computes the
//! add/remove delta between a controller's materialized markers and the
//! external truth; per-entity-kind behavior is a capability set
//! ([`MarkerAdapter`]) rather than a subclass hierarchy.

mod controller;
mod controllers;
mod reconcile;
mod types;

pub use controller::{ControllerContext, MarkerAdapter, MarkerController, UpdateSummary};
pub use controllers::{
    mobs, other_players, EntityKind, MainPlayerMarkerController, MobAdapter, OtherPlayerAdapter,
    PlayerEntity, WorldEntity, MAIN_PLAYER_ID, MOBS_ID, OTHER_PLAYERS_ID,
};
pub use reconcile::{reconcile, MarkerDelta};
pub use types::{EntityKey, Marker};
