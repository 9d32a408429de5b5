//! World events and input actions the overlay reacts to.

use game_world::{ContainerRef, Direction, EntityId, ItemId, Point, TileRef};
use serde::{Deserialize, Serialize};

/// Events delivered by the host, one at a time, on its own thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// The game screen is up and the local actor exists.
    GameReady { local_actor: EntityId },

    /// An actor finished a move. `from` is the move origin the host reports
    /// and `facing` the direction of travel.
    MoveCompleted {
        actor: EntityId,
        from: Point,
        facing: Direction,
    },

    /// An actor is about to move; the move is not committed yet.
    PreMove {
        actor: EntityId,
        from: TileRef,
        to: TileRef,
    },

    /// An item moved between containers. `source` is `None` when the source
    /// container no longer exists; `source_position` is where it was.
    ItemMoved {
        item: ItemId,
        source: Option<ContainerRef>,
        source_position: Option<TileRef>,
        destination: ContainerRef,
    },
}

/// Registry key for routing events to rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    GameReady,
    MoveCompleted,
    PreMove,
    ItemMoved,
}

impl WorldEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WorldEvent::GameReady { .. } => EventKind::GameReady,
            WorldEvent::MoveCompleted { .. } => EventKind::MoveCompleted,
            WorldEvent::PreMove { .. } => EventKind::PreMove,
            WorldEvent::ItemMoved { .. } => EventKind::ItemMoved,
        }
    }

    /// The actor the event is about, if any.
    pub fn actor(&self) -> Option<EntityId> {
        match self {
            WorldEvent::GameReady { local_actor } => Some(*local_actor),
            WorldEvent::MoveCompleted { actor, .. } | WorldEvent::PreMove { actor, .. } => {
                Some(*actor)
            }
            WorldEvent::ItemMoved { .. } => None,
        }
    }
}

/// Inputs bound to keys rather than fired by the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    ToggleGroundContainer,
}
