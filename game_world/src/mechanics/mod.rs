//! Game mechanics: geometry, terrain classification and doodad types.

mod doodad;
mod geometry;

pub use doodad::*;
pub use geometry::*;

use serde::{Deserialize, Serialize};

/// Terrain classification of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    Grass,
    Dirt,
    Sand,
    Gravel,
    Snow,
    Ice,
    Rocks,
    ShallowSeawater,
    Seawater,
    DeepSeawater,
    FreezingSeawater,
    ShallowFreshWater,
    FreshWater,
    DeepFreshWater,
    FreezingFreshWater,
}

impl TerrainType {
    /// Whether stepping onto this terrain puts an actor in the water.
    ///
    /// Shallow water is wadeable and ice is walkable, so neither counts.
    pub fn is_swimmable(self) -> bool {
        matches!(
            self,
            TerrainType::Seawater
                | TerrainType::DeepSeawater
                | TerrainType::FreshWater
                | TerrainType::DeepFreshWater
                | TerrainType::FreezingFreshWater
                | TerrainType::FreezingSeawater
        )
    }

    /// Whether actors can stand on this terrain at all.
    pub fn is_passable(self) -> bool {
        !matches!(self, TerrainType::Rocks)
    }
}

/// Quality tiers for items, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Quality {
    #[default]
    None,
    Remarkable,
    Exceptional,
    Legendary,
}

/// Capabilities an item can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemUse {
    Paddle,
    Dig,
    Chop,
    Light,
}
