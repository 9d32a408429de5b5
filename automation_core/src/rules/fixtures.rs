//! Shared world setup for rule tests.

use game_world::{Actor, EntityId, Island, IslandId, Point, TerrainType, TileRef, WorldState};

pub(crate) struct Fixture {
    pub state: WorldState,
    pub island: IslandId,
    pub actor: EntityId,
}

impl Fixture {
    /// A grass island with one actor, Bertie, at (10, 10, 0) facing south.
    pub fn new() -> Self {
        let mut state = WorldState::new();
        let island = state.add_island(Island::new(TerrainType::Grass));
        let actor = state.add_actor(Actor::new("Bertie", island, Point::new(10, 10, 0)));
        Self {
            state,
            island,
            actor,
        }
    }

    pub fn tile(&self, x: i32, y: i32) -> TileRef {
        TileRef::new(self.island, Point::new(x, y, 0))
    }
}
