//! Doodad types and their static descriptions.

use serde::{Deserialize, Serialize};

/// Placed world object types.
///
/// Doors and gates exist as distinct open and closed types; opening or
/// closing one changes its type rather than flipping a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoodadType {
    WoodenDoor,
    WoodenDoorOpen,
    WoodenGate,
    WoodenGateOpen,
    IronGate,
    IronGateOpen,
    WoodenChest,
    StoneWall,
    Campfire,
    Sailboat,
}

/// Static facts about a doodad type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DoodadDescription {
    pub name: &'static str,
    pub is_door: bool,
    pub is_gate: bool,
    pub is_closed: bool,
    /// Whether doodads of this type hold items of their own.
    pub is_container: bool,
    /// Whether actors can walk onto the tile.
    pub blocks_movement: bool,
}

impl DoodadDescription {
    const fn plain(name: &'static str, blocks_movement: bool) -> Self {
        Self {
            name,
            is_door: false,
            is_gate: false,
            is_closed: false,
            is_container: false,
            blocks_movement,
        }
    }
}

impl DoodadType {
    pub fn description(self) -> DoodadDescription {
        match self {
            DoodadType::WoodenDoor => DoodadDescription {
                is_door: true,
                is_closed: true,
                ..DoodadDescription::plain("wooden door", true)
            },
            DoodadType::WoodenDoorOpen => DoodadDescription {
                is_door: true,
                ..DoodadDescription::plain("wooden door", false)
            },
            DoodadType::WoodenGate => DoodadDescription {
                is_gate: true,
                is_closed: true,
                ..DoodadDescription::plain("wooden gate", true)
            },
            DoodadType::WoodenGateOpen => DoodadDescription {
                is_gate: true,
                ..DoodadDescription::plain("wooden gate", false)
            },
            DoodadType::IronGate => DoodadDescription {
                is_gate: true,
                is_closed: true,
                ..DoodadDescription::plain("iron gate", true)
            },
            DoodadType::IronGateOpen => DoodadDescription {
                is_gate: true,
                ..DoodadDescription::plain("iron gate", false)
            },
            DoodadType::WoodenChest => DoodadDescription {
                is_container: true,
                ..DoodadDescription::plain("wooden chest", true)
            },
            DoodadType::StoneWall => DoodadDescription::plain("stone wall", true),
            DoodadType::Campfire => DoodadDescription::plain("campfire", false),
            DoodadType::Sailboat => DoodadDescription::plain("sailboat", false),
        }
    }
}
