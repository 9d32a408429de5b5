//! Entity definitions for the game world.

mod actor;
mod components;

pub use actor::*;
pub use components::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a UUID-backed identifier with random `new`/`Default` and `Display`.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap a specific UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Identifies an actor (the local player or another mover).
    EntityId
);

uuid_id!(
    /// Identifies a placed doodad.
    DoodadId
);

uuid_id!(
    /// Identifies an item wherever it is held.
    ItemId
);

uuid_id!(
    /// Identifies an island, a world plane that owns its own tiles.
    IslandId
);

impl EntityId {
    /// The nil ID, for actors not yet assigned one.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl IslandId {
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}
