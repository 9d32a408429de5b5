//! In-memory world state - a complete [`Host`](crate::host::Host) without a
//! game behind it.
//!
//! Besides holding tiles, doodads, actors and items, the state records every
//! outward effect (notifications, tile updates, view refreshes, use commands)
//! so callers can inspect what happened.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};

use crate::entities::{Actor, Doodad, DoodadId, EntityId, IslandId, Item, ItemId};
use crate::host::{
    ContainerRef, ContainerViews, Notification, Notifier, RenderRequest, Result, TileUpdate,
    WorldError, WorldMutation, WorldQuery,
};
use crate::mechanics::{DoodadDescription, DoodadType, ItemUse, Point, TerrainType, TileRef};

/// Callback fired after a doodad's type changes, with the state itself.
pub type DoodadChangeListener = Box<dyn FnMut(&mut WorldState, DoodadId)>;

/// One island's tiles.
#[derive(Debug, Clone)]
pub struct Island {
    pub id: IslandId,
    /// Terrain for tiles without an explicit entry.
    pub default_terrain: TerrainType,
    pub terrain: HashMap<Point, TerrainType>,
    pub doodads: HashMap<Point, DoodadId>,
    /// Loose items per tile. A tile container exists only while it has an entry.
    pub ground_items: HashMap<Point, Vec<ItemId>>,
}

impl Island {
    pub fn new(default_terrain: TerrainType) -> Self {
        Self {
            id: IslandId::new(),
            default_terrain,
            terrain: HashMap::new(),
            doodads: HashMap::new(),
            ground_items: HashMap::new(),
        }
    }

    pub fn terrain_at(&self, point: Point) -> TerrainType {
        self.terrain
            .get(&point)
            .copied()
            .unwrap_or(self.default_terrain)
    }
}

/// Who a delivered notification went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Actor(EntityId),
    All,
}

/// A notification as the host received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub recipient: Recipient,
    pub notification: Notification,
}

/// The complete state of a simulated world.
#[derive(Default)]
pub struct WorldState {
    pub islands: HashMap<IslandId, Island>,
    pub actors: HashMap<EntityId, Actor>,
    pub doodads: HashMap<DoodadId, Doodad>,
    pub items: HashMap<ItemId, Item>,

    /// Container views currently on screen.
    pub open_containers: HashSet<ContainerRef>,

    /// Every notification sent, in order.
    pub deliveries: Vec<Delivery>,
    pub tile_updates: Vec<(TileRef, TileUpdate)>,
    pub view_refreshes: Vec<RenderRequest>,
    /// `begin_using` commands, in order.
    pub use_commands: Vec<(EntityId, ItemId, ItemUse)>,

    item_searches: Cell<usize>,
    doodad_change_listener: Option<DoodadChangeListener>,
}

impl WorldState {
    /// Create a new empty world state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an island and return its ID.
    pub fn add_island(&mut self, island: Island) -> IslandId {
        let id = island.id;
        self.islands.insert(id, island);
        id
    }

    /// Add an actor to the world.
    pub fn add_actor(&mut self, actor: Actor) -> EntityId {
        let id = actor.id;
        self.actors.insert(id, actor);
        id
    }

    pub fn get_actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn get_actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn get_doodad(&self, id: DoodadId) -> Option<&Doodad> {
        self.doodads.get(&id)
    }

    pub fn set_terrain(&mut self, tile: TileRef, terrain: TerrainType) -> Result<()> {
        self.island_mut(tile.island)?.terrain.insert(tile.point, terrain);
        Ok(())
    }

    /// Place a doodad on a tile, replacing whatever stood there.
    pub fn place_doodad(&mut self, tile: TileRef, doodad: Doodad) -> Result<DoodadId> {
        let id = doodad.id;
        let island = self.island_mut(tile.island)?;
        if let Some(previous) = island.doodads.insert(tile.point, id) {
            self.doodads.remove(&previous);
        }
        self.doodads.insert(id, doodad);
        Ok(id)
    }

    /// Create an item in an actor's inventory.
    pub fn give_item(&mut self, actor: EntityId, item: Item) -> Result<ItemId> {
        let id = item.id;
        self.actors
            .get_mut(&actor)
            .ok_or(WorldError::ActorNotFound(actor))?
            .inventory
            .push(id);
        self.items.insert(id, item);
        Ok(id)
    }

    /// Create an item lying on the ground.
    pub fn drop_item(&mut self, tile: TileRef, item: Item) -> Result<ItemId> {
        let id = item.id;
        self.island_mut(tile.island)?
            .ground_items
            .entry(tile.point)
            .or_default()
            .push(id);
        self.items.insert(id, item);
        Ok(id)
    }

    /// The container currently holding `item`.
    pub fn container_of(&self, item: ItemId) -> Option<ContainerRef> {
        if let Some(actor) = self.actors.values().find(|a| a.inventory.contains(&item)) {
            return Some(ContainerRef::Inventory(actor.id));
        }
        if let Some(doodad) = self.doodads.values().find(|d| {
            d.contained_items
                .as_ref()
                .is_some_and(|items| items.contains(&item))
        }) {
            return Some(ContainerRef::Doodad(doodad.id));
        }
        self.islands.values().find_map(|island| {
            island
                .ground_items
                .iter()
                .find(|(_, items)| items.contains(&item))
                .map(|(point, _)| ContainerRef::Tile(TileRef::new(island.id, *point)))
        })
    }

    /// How many times `best_item_for` has searched an inventory.
    pub fn item_searches(&self) -> usize {
        self.item_searches.get()
    }

    /// Register a callback run after every doodad type change.
    ///
    /// The callback may dispatch further events against this same state; it is
    /// detached while it runs, so its own changes do not call it again.
    pub fn set_doodad_change_listener(
        &mut self,
        listener: impl FnMut(&mut WorldState, DoodadId) + 'static,
    ) {
        self.doodad_change_listener = Some(Box::new(listener));
    }

    /// Notifications addressed to `actor`, broadcasts included.
    pub fn notifications_for(&self, actor: EntityId) -> Vec<&Notification> {
        self.deliveries
            .iter()
            .filter(|d| match d.recipient {
                Recipient::All => true,
                Recipient::Actor(id) => id == actor,
            })
            .map(|d| &d.notification)
            .collect()
    }

    fn island_mut(&mut self, id: IslandId) -> Result<&mut Island> {
        self.islands
            .get_mut(&id)
            .ok_or(WorldError::IslandNotFound(id))
    }

    fn detach_item(&mut self, item: ItemId) -> Option<ContainerRef> {
        let container = self.container_of(item)?;
        match container {
            ContainerRef::Inventory(actor) => {
                if let Some(actor) = self.actors.get_mut(&actor) {
                    actor.inventory.retain(|i| *i != item);
                }
            }
            ContainerRef::Doodad(doodad) => {
                if let Some(items) = self
                    .doodads
                    .get_mut(&doodad)
                    .and_then(|d| d.contained_items.as_mut())
                {
                    items.retain(|i| *i != item);
                }
            }
            ContainerRef::Tile(tile) => {
                if let Some(island) = self.islands.get_mut(&tile.island) {
                    if let Some(items) = island.ground_items.get_mut(&tile.point) {
                        items.retain(|i| *i != item);
                        if items.is_empty() {
                            island.ground_items.remove(&tile.point);
                        }
                    }
                }
            }
        }
        Some(container)
    }
}

impl WorldQuery for WorldState {
    fn actor_name(&self, actor: EntityId) -> Option<String> {
        self.actors.get(&actor).map(|a| a.name.clone())
    }

    fn actor_island(&self, actor: EntityId) -> Option<IslandId> {
        self.actors
            .get(&actor)
            .map(|a| a.island)
            .filter(|island| self.islands.contains_key(island))
    }

    fn actor_facing_tile(&self, actor: EntityId) -> Option<TileRef> {
        self.actors.get(&actor).and_then(Actor::facing_tile)
    }

    fn is_in_vehicle(&self, actor: EntityId) -> bool {
        self.actors.get(&actor).is_some_and(Actor::is_in_vehicle)
    }

    fn is_swimming(&self, actor: EntityId) -> bool {
        self.actors.get(&actor).is_some_and(|a| a.swimming)
    }

    fn doodad_at(&self, tile: TileRef) -> Option<DoodadId> {
        self.islands
            .get(&tile.island)?
            .doodads
            .get(&tile.point)
            .copied()
    }

    fn doodad_type(&self, doodad: DoodadId) -> Option<DoodadType> {
        self.doodads.get(&doodad).map(|d| d.doodad_type)
    }

    fn doodad_description(&self, doodad: DoodadId) -> Option<DoodadDescription> {
        self.doodad_type(doodad).map(DoodadType::description)
    }

    fn doodad_container(&self, doodad: DoodadId) -> Option<ContainerRef> {
        self.doodads
            .get(&doodad)
            .filter(|d| d.contained_items.is_some())
            .map(|d| ContainerRef::Doodad(d.id))
    }

    fn terrain_at(&self, tile: TileRef) -> Option<TerrainType> {
        self.islands
            .get(&tile.island)
            .map(|island| island.terrain_at(tile.point))
    }

    fn is_tile_open(&self, tile: TileRef) -> bool {
        let Some(island) = self.islands.get(&tile.island) else {
            return false;
        };
        if !island.terrain_at(tile.point).is_passable() {
            return false;
        }
        let blocked_by_doodad = self
            .doodad_at(tile)
            .and_then(|d| self.doodad_description(d))
            .is_some_and(|d| d.blocks_movement);
        let occupied = self
            .actors
            .values()
            .any(|a| a.island == tile.island && a.position == tile.point);
        !blocked_by_doodad && !occupied
    }

    fn container_item_count(&self, container: &ContainerRef) -> Option<usize> {
        match container {
            ContainerRef::Tile(tile) => self
                .islands
                .get(&tile.island)?
                .ground_items
                .get(&tile.point)
                .map(Vec::len),
            ContainerRef::Doodad(doodad) => self
                .doodads
                .get(doodad)?
                .contained_items
                .as_ref()
                .map(Vec::len),
            ContainerRef::Inventory(actor) => self.actors.get(actor).map(|a| a.inventory.len()),
        }
    }

    fn best_item_for(&self, actor: EntityId, usage: ItemUse) -> Option<ItemId> {
        self.item_searches.set(self.item_searches.get() + 1);
        self.actors
            .get(&actor)?
            .inventory
            .iter()
            .filter_map(|id| self.items.get(id))
            .filter(|item| item.can_be_used_for(usage) && item.is_safe_to_use())
            .max_by_key(|item| (item.quality, item.durability))
            .map(|item| item.id)
    }

    fn item_name(&self, item: ItemId) -> Option<String> {
        self.items.get(&item).map(|i| i.name.clone())
    }
}

impl WorldMutation for WorldState {
    fn change_doodad_type(&mut self, doodad: DoodadId, new_type: DoodadType) -> Result<()> {
        self.doodads
            .get_mut(&doodad)
            .ok_or(WorldError::DoodadNotFound(doodad))?
            .doodad_type = new_type;
        tracing::debug!("Doodad {} changed to {:?}", doodad, new_type);

        if let Some(mut listener) = self.doodad_change_listener.take() {
            listener(self, doodad);
            if self.doodad_change_listener.is_none() {
                self.doodad_change_listener = Some(listener);
            }
        }
        Ok(())
    }

    fn update_tile(&mut self, tile: TileRef, update: TileUpdate) {
        self.tile_updates.push((tile, update));
    }

    fn refresh_view(&mut self, request: RenderRequest) {
        self.view_refreshes.push(request);
    }

    fn move_item(&mut self, item: ItemId, destination: ContainerRef) -> Result<()> {
        if !self.items.contains_key(&item) {
            return Err(WorldError::ItemNotFound(item));
        }
        let destination_ok = match destination {
            ContainerRef::Tile(tile) => self.islands.contains_key(&tile.island),
            _ => self.container_exists(&destination),
        };
        if !destination_ok {
            return Err(WorldError::ContainerNotFound(destination));
        }

        let source = self.detach_item(item);
        tracing::debug!("Moving item {} from {:?} to {:?}", item, source, destination);
        match destination {
            ContainerRef::Inventory(actor) => {
                if let Some(actor) = self.actors.get_mut(&actor) {
                    actor.inventory.push(item);
                }
            }
            ContainerRef::Doodad(doodad) => {
                if let Some(items) = self
                    .doodads
                    .get_mut(&doodad)
                    .and_then(|d| d.contained_items.as_mut())
                {
                    items.push(item);
                }
            }
            ContainerRef::Tile(tile) => {
                self.island_mut(tile.island)?
                    .ground_items
                    .entry(tile.point)
                    .or_default()
                    .push(item);
            }
        }
        Ok(())
    }

    fn begin_using(&mut self, actor: EntityId, item: ItemId, usage: ItemUse) -> Result<()> {
        if !self.actors.contains_key(&actor) {
            return Err(WorldError::ActorNotFound(actor));
        }
        let usable = self
            .items
            .get(&item)
            .ok_or(WorldError::ItemNotFound(item))?
            .can_be_used_for(usage);
        if !usable {
            return Err(WorldError::UnusableItem { item, usage });
        }
        self.use_commands.push((actor, item, usage));
        Ok(())
    }
}

impl ContainerViews for WorldState {
    fn is_container_open(&self, container: &ContainerRef) -> bool {
        self.open_containers.contains(container)
    }

    fn open_container(&mut self, container: ContainerRef) {
        self.open_containers.insert(container);
    }

    fn close_container(&mut self, container: &ContainerRef) {
        self.open_containers.remove(container);
    }
}

impl Notifier for WorldState {
    fn send(&mut self, actor: EntityId, notification: Notification) {
        self.deliveries.push(Delivery {
            recipient: Recipient::Actor(actor),
            notification,
        });
    }

    fn broadcast(&mut self, notification: Notification) {
        self.deliveries.push(Delivery {
            recipient: Recipient::All,
            notification,
        });
    }
}
