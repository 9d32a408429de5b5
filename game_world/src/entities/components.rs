//! Items and placed doodads.

use serde::{Deserialize, Serialize};

use super::{DoodadId, ItemId};
use crate::mechanics::{DoodadType, ItemUse, Quality};

/// A single item somewhere in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quality: Quality,
    pub uses: Vec<ItemUse>,
    pub durability: u32,
    pub max_durability: u32,
}

impl Item {
    /// Create a fresh item with full durability.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            quality: Quality::None,
            uses: Vec::new(),
            durability: 20,
            max_durability: 20,
        }
    }

    pub fn with_use(mut self, item_use: ItemUse) -> Self {
        self.uses.push(item_use);
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_durability(mut self, durability: u32) -> Self {
        self.durability = durability;
        self
    }

    pub fn can_be_used_for(&self, item_use: ItemUse) -> bool {
        self.uses.contains(&item_use)
    }

    /// An item about to break is not safe to use; one more use would destroy it.
    pub fn is_safe_to_use(&self) -> bool {
        self.durability > 1
    }
}

/// A placed world object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doodad {
    pub id: DoodadId,
    pub doodad_type: DoodadType,
    /// Items held by the doodad itself, `None` for non-containers.
    pub contained_items: Option<Vec<ItemId>>,
}

impl Doodad {
    pub fn new(doodad_type: DoodadType) -> Self {
        let contained_items = doodad_type.description().is_container.then(Vec::new);
        Self {
            id: DoodadId::new(),
            doodad_type,
            contained_items,
        }
    }

    pub fn name(&self) -> &'static str {
        self.doodad_type.description().name
    }
}
