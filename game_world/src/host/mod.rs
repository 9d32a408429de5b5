//! The facade the automation core uses to see and change the world.
//!
//! Everything here is a synchronous query or command. Hosts implement the
//! four traits; the blanket [`Host`] impl bundles them so rules can take a
//! single `&mut dyn Host`.

mod notification;

pub use notification::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{DoodadId, EntityId, IslandId, ItemId};
use crate::mechanics::{DoodadDescription, DoodadType, ItemUse, TerrainType, TileRef};

/// Errors a host reports from mutation calls.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("Actor not found: {0}")]
    ActorNotFound(EntityId),

    #[error("Doodad not found: {0}")]
    DoodadNotFound(DoodadId),

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Container not found: {0:?}")]
    ContainerNotFound(ContainerRef),

    #[error("Island not found: {0}")]
    IslandNotFound(IslandId),

    #[error("Item {item} cannot be used for {usage:?}")]
    UnusableItem { item: ItemId, usage: ItemUse },
}

pub type Result<T> = std::result::Result<T, WorldError>;

/// Identity of a storage location.
///
/// Container views are keyed by this value, so the reference used to close a
/// view must equal the one used to open it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerRef {
    /// Items lying loose on the ground of a tile.
    Tile(TileRef),
    /// Items held by a placed doodad such as a chest.
    Doodad(DoodadId),
    /// An actor's own inventory.
    Inventory(EntityId),
}

impl ContainerRef {
    pub fn is_tile(&self) -> bool {
        matches!(self, ContainerRef::Tile(_))
    }

    pub fn tile(&self) -> Option<TileRef> {
        match self {
            ContainerRef::Tile(tile) => Some(*tile),
            _ => None,
        }
    }
}

/// Kinds of per-tile updates a host can be asked to propagate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileUpdate {
    DoodadChangeType,
}

/// Scope of a view/render refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderRequest {
    Tile(TileRef),
    Full,
}

/// Read-only world and actor queries.
///
/// Absent context is reported as `None` (or `false`), never as an error.
pub trait WorldQuery {
    fn actor_name(&self, actor: EntityId) -> Option<String>;

    /// The island the actor currently stands on.
    fn actor_island(&self, actor: EntityId) -> Option<IslandId>;

    /// The tile directly in front of the actor.
    fn actor_facing_tile(&self, actor: EntityId) -> Option<TileRef>;

    fn is_in_vehicle(&self, actor: EntityId) -> bool;

    fn is_swimming(&self, actor: EntityId) -> bool;

    fn doodad_at(&self, tile: TileRef) -> Option<DoodadId>;

    fn doodad_type(&self, doodad: DoodadId) -> Option<DoodadType>;

    fn doodad_description(&self, doodad: DoodadId) -> Option<DoodadDescription>;

    /// The doodad's own item container, if it is one.
    fn doodad_container(&self, doodad: DoodadId) -> Option<ContainerRef>;

    fn terrain_at(&self, tile: TileRef) -> Option<TerrainType>;

    /// Whether an actor could step onto the tile right now.
    fn is_tile_open(&self, tile: TileRef) -> bool;

    /// Number of items in the container, `None` if it does not exist.
    fn container_item_count(&self, container: &ContainerRef) -> Option<usize>;

    fn container_exists(&self, container: &ContainerRef) -> bool {
        self.container_item_count(container).is_some()
    }

    /// Pick the best safe item in the actor's inventory for `usage`.
    fn best_item_for(&self, actor: EntityId, usage: ItemUse) -> Option<ItemId>;

    fn item_name(&self, item: ItemId) -> Option<String>;
}

/// World mutations.
pub trait WorldMutation {
    fn change_doodad_type(&mut self, doodad: DoodadId, new_type: DoodadType) -> Result<()>;

    fn update_tile(&mut self, tile: TileRef, update: TileUpdate);

    fn refresh_view(&mut self, request: RenderRequest);

    fn move_item(&mut self, item: ItemId, destination: ContainerRef) -> Result<()>;

    /// Command the actor to start using `item` for `usage`.
    fn begin_using(&mut self, actor: EntityId, item: ItemId, usage: ItemUse) -> Result<()>;
}

/// Which container views are on screen.
pub trait ContainerViews {
    fn is_container_open(&self, container: &ContainerRef) -> bool;

    fn open_container(&mut self, container: ContainerRef);

    fn close_container(&mut self, container: &ContainerRef);
}

/// Message delivery to connected actors.
pub trait Notifier {
    fn send(&mut self, actor: EntityId, notification: Notification);

    fn broadcast(&mut self, notification: Notification);
}

/// Everything a rule needs from its host.
pub trait Host: WorldQuery + WorldMutation + ContainerViews + Notifier {}

impl<T> Host for T where T: WorldQuery + WorldMutation + ContainerViews + Notifier + ?Sized {}
