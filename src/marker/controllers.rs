//! Concrete marker controllers: other players, mobs, and the local player.

use tracing::trace;

use crate::geo::GeoPoint;

use super::{ControllerContext, EntityKey, Marker, MarkerAdapter, MarkerController};

/// A remote player as synchronized from the server.
#[derive(Debug, Clone)]
pub struct PlayerEntity {
    /// Stable player UUID
    pub key: EntityKey,
    /// Display name
    pub display_name: String,
    /// Geographic position
    pub location: GeoPoint,
}

/// Coarse classification of a world entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Hostile mob
    Mob,
    /// Passive animal
    Animal,
    /// Anything else
    Other,
}

/// A non-player world entity.
#[derive(Debug, Clone)]
pub struct WorldEntity {
    /// Stable entity UUID
    pub key: EntityKey,
    /// Entity classification
    pub kind: EntityKind,
    /// Geographic position
    pub location: GeoPoint,
}

/// Adapter for remote players.
///
/// The local player is always excluded: it has its own single-instance
/// controller ([`MainPlayerMarkerController`]).
pub struct OtherPlayerAdapter;

impl MarkerAdapter for OtherPlayerAdapter {
    type Entity = PlayerEntity;

    fn key(&self, entity: &PlayerEntity) -> EntityKey {
        entity.key
    }

    fn marker(&self, controller_id: &str, entity: &PlayerEntity) -> Marker {
        Marker::new(entity.key, controller_id, entity.location, entity.display_name.clone())
    }

    fn allowed(&self, ctx: &ControllerContext) -> bool {
        ctx.allow_player_radar
    }

    fn excluded_key(&self, ctx: &ControllerContext) -> Option<EntityKey> {
        ctx.local_player
    }
}

/// Adapter for hostile mobs.
pub struct MobAdapter;

impl MarkerAdapter for MobAdapter {
    type Entity = WorldEntity;

    fn includes(&self, entity: &WorldEntity) -> bool {
        entity.kind == EntityKind::Mob
    }

    fn key(&self, entity: &WorldEntity) -> EntityKey {
        entity.key
    }

    fn marker(&self, controller_id: &str, entity: &WorldEntity) -> Marker {
        Marker::new(entity.key, controller_id, entity.location, "mob")
    }

    fn allowed(&self, ctx: &ControllerContext) -> bool {
        ctx.allow_mob_radar && ctx.projection_active
    }
}

/// Controller id of the other-players controller.
pub const OTHER_PLAYERS_ID: &str = "other_players";
/// Controller id of the mobs controller.
pub const MOBS_ID: &str = "mobs";
/// Controller id of the main-player controller.
pub const MAIN_PLAYER_ID: &str = "main_player";

/// Build the other-players controller.
pub fn other_players() -> MarkerController<OtherPlayerAdapter> {
    MarkerController::new(OTHER_PLAYERS_ID, 800, OtherPlayerAdapter)
}

/// Build the mobs controller.
pub fn mobs() -> MarkerController<MobAdapter> {
    MarkerController::new(MOBS_ID, 700, MobAdapter)
}

/// Dedicated controller for the local player's own marker.
///
/// Creates at most one marker, and only while a geographic projection is
/// active; there is nothing to place the marker on otherwise.
pub struct MainPlayerMarkerController {
    toggled: bool,
    marker: Option<Marker>,
}

impl MainPlayerMarkerController {
    /// Draw priority: above every entity controller.
    pub const PRIORITY: i32 = 900;

    /// Create the controller with its marker not yet materialized.
    pub fn new() -> Self {
        Self {
            toggled: true,
            marker: None,
        }
    }

    /// Set the user-facing visibility toggle.
    pub fn set_toggled(&mut self, toggled: bool) {
        self.toggled = toggled;
    }

    /// Effective visibility: the toggle AND an active projection.
    pub fn is_visible(&self, ctx: &ControllerContext) -> bool {
        self.toggled && ctx.projection_active
    }

    /// Synchronize the marker with the local player.
    ///
    /// Materializes the marker when a player and a projection exist,
    /// refreshes its position while both persist, and drops it when the
    /// player disappears.
    pub fn update(&mut self, local_player: Option<&PlayerEntity>, ctx: &ControllerContext) {
        match local_player {
            Some(player) if ctx.projection_active => match &mut self.marker {
                Some(marker) => marker.location = player.location,
                None => {
                    trace!(player = %player.key, "Materializing main player marker");
                    self.marker = Some(Marker::new(
                        player.key,
                        MAIN_PLAYER_ID,
                        player.location,
                        player.display_name.clone(),
                    ));
                }
            },
            _ => self.marker = None,
        }
    }

    /// The marker, if currently materialized.
    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }
}

impl Default for MainPlayerMarkerController {
    fn default() -> Self {
        Self::new()
    }
}
