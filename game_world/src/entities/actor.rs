//! Actor definitions.

use serde::{Deserialize, Serialize};

use super::{DoodadId, EntityId, IslandId, ItemId};
use crate::mechanics::{Direction, Point, TileRef};

/// An actor that walks the grid: the local player or another connected one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: EntityId,
    pub name: String,
    pub island: IslandId,
    pub position: Point,
    pub facing: Direction,
    /// Vehicle the actor is riding, if any.
    pub vehicle: Option<DoodadId>,
    pub swimming: bool,
    pub inventory: Vec<ItemId>,
}

impl Actor {
    /// Create a new actor standing at `position`, facing south.
    pub fn new(name: impl Into<String>, island: IslandId, position: Point) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            island,
            position,
            facing: Direction::South,
            vehicle: None,
            swimming: false,
            inventory: Vec::new(),
        }
    }

    pub fn is_in_vehicle(&self) -> bool {
        self.vehicle.is_some()
    }

    pub fn tile(&self) -> TileRef {
        TileRef::new(self.island, self.position)
    }

    /// The tile directly in front of the actor, unless the actor stands at
    /// the edge of the coordinate range.
    pub fn facing_tile(&self) -> Option<TileRef> {
        self.position
            .step(self.facing)
            .map(|point| TileRef::new(self.island, point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_actor() {
        let actor = Actor::new("Wooster", IslandId::nil(), Point::new(4, 4, 0));
        assert_eq!(actor.name, "Wooster");
        assert!(!actor.is_in_vehicle());
        assert!(!actor.swimming);
        assert!(actor.inventory.is_empty());
    }

    #[test]
    fn test_facing_tile() {
        let mut actor = Actor::new("Wooster", IslandId::nil(), Point::new(4, 4, 0));
        actor.facing = Direction::NorthEast;
        assert_eq!(actor.facing_tile().unwrap().point, Point::new(5, 3, 0));
    }

    #[test]
    fn test_no_facing_tile_past_the_edge() {
        let mut actor = Actor::new("Wooster", IslandId::nil(), Point::new(0, i32::MIN, 0));
        actor.facing = Direction::North;
        assert_eq!(actor.facing_tile(), None);
    }
}
