use serde::{Deserialize, Serialize};

use crate::id::ItemId;

/// An item the player can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Flavor text shown in the inventory.
    pub description: String,
    /// Whether the item can be used from the inventory.
    pub usable: bool,
}

impl Item {
    /// Create an item whose display name equals its identifier.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id: ItemId::new(id),
            description: description.into(),
            usable: false,
        }
    }

    /// Override the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Mark the item usable.
    pub fn usable(mut self) -> Self {
        self.usable = true;
        self
    }
}
