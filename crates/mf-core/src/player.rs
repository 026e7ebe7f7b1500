//! The mutable player record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::id::{ItemId, SceneId};

/// Upper bound for player health.
pub const MAX_HEALTH: i32 = 100;

/// A game flag value. Reserved for conditional content.
///
/// Any JSON value maps onto a variant, so a save never fails to load
/// because of what its flags hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// JSON `null`.
    Null,
    /// A boolean flag.
    Bool(bool),
    /// A counter.
    Integer(i64),
    /// Any number that is not an `i64`.
    Float(f64),
    /// Free text.
    Text(String),
    /// A list of values.
    List(Vec<FlagValue>),
    /// Nested flags.
    Map(BTreeMap<String, FlagValue>),
}

impl FlagValue {
    /// `null`, `false`, zero, and empty text or containers are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            FlagValue::Null => false,
            FlagValue::Bool(b) => *b,
            FlagValue::Integer(n) => *n != 0,
            FlagValue::Float(x) => *x != 0.0,
            FlagValue::Text(s) => !s.is_empty(),
            FlagValue::List(items) => !items.is_empty(),
            FlagValue::Map(map) => !map.is_empty(),
        }
    }
}

/// The single mutable entity of a game session.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    health: i32,
    max_health: i32,
    inventory: Vec<ItemId>,
    current_scene: SceneId,
    game_flags: BTreeMap<String, FlagValue>,
}

impl Player {
    /// A fresh player at full health with an empty inventory.
    pub fn new(start: impl Into<SceneId>) -> Self {
        Self {
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            inventory: Vec::new(),
            current_scene: start.into(),
            game_flags: BTreeMap::new(),
        }
    }

    /// Rebuild a player from persisted fields.
    ///
    /// Health is clamped into range and repeated items are dropped, so the
    /// invariants hold even for hand-edited saves. The scene is not checked
    /// against any catalog.
    pub fn restore(
        health: i32,
        inventory: impl IntoIterator<Item = ItemId>,
        current_scene: SceneId,
        game_flags: BTreeMap<String, FlagValue>,
    ) -> Self {
        let mut player = Self {
            health: health.clamp(0, MAX_HEALTH),
            max_health: MAX_HEALTH,
            inventory: Vec::new(),
            current_scene,
            game_flags,
        };
        for item in inventory {
            player.grant_item(item);
        }
        player
    }

    /// Current health.
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Health ceiling.
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Restore health, capped at `max_health`. Returns the amount gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).clamp(0, self.max_health);
        self.health - before
    }

    /// Lose health, floored at zero. Returns the amount lost.
    pub fn damage(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = self.health.saturating_sub(amount).clamp(0, self.max_health);
        before - self.health
    }

    /// Items held, in acquisition order.
    pub fn inventory(&self) -> &[ItemId] {
        &self.inventory
    }

    /// Whether the player carries `item`.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|held| held == item)
    }

    /// Add an item unless already held. Returns `true` if it was new.
    pub fn grant_item(&mut self, item: impl Into<ItemId>) -> bool {
        let item = item.into();
        if self.has_item(item.as_str()) {
            return false;
        }
        self.inventory.push(item);
        true
    }

    /// Remove an item from the inventory.
    pub fn consume_item(&mut self, item: &str) -> CoreResult<()> {
        let pos = self
            .inventory
            .iter()
            .position(|held| held == item)
            .ok_or_else(|| CoreError::ItemNotHeld(ItemId::from(item)))?;
        self.inventory.remove(pos);
        Ok(())
    }

    /// The scene the player is in.
    pub fn current_scene(&self) -> &SceneId {
        &self.current_scene
    }

    /// Move the player. Only the scene engine calls this, after resolution.
    pub fn move_to(&mut self, scene: SceneId) {
        self.current_scene = scene;
    }

    /// All game flags.
    pub fn flags(&self) -> &BTreeMap<String, FlagValue> {
        &self.game_flags
    }

    /// Look up a flag.
    pub fn flag(&self, key: &str) -> Option<&FlagValue> {
        self.game_flags.get(key)
    }

    /// Set a flag.
    pub fn set_flag(&mut self, key: impl Into<String>, value: FlagValue) {
        self.game_flags.insert(key.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_player() {
        let p = Player::new("start");
        assert_eq!(p.health(), 100);
        assert_eq!(p.max_health(), 100);
        assert!(p.inventory().is_empty());
        assert_eq!(p.current_scene(), "start");
        assert!(p.flags().is_empty());
    }

    #[test]
    fn inventory_management() {
        let mut p = Player::new("start");

        assert!(!p.has_item("树枝"));
        assert!(p.grant_item("树枝"));
        assert!(p.has_item("树枝"));

        // Granting again should not duplicate
        assert!(!p.grant_item("树枝"));
        assert_eq!(p.inventory().len(), 1);

        p.consume_item("树枝").unwrap();
        assert!(!p.has_item("树枝"));

        let err = p.consume_item("树枝").unwrap_err();
        assert!(matches!(err, CoreError::ItemNotHeld(id) if id == "树枝"));
    }

    #[test]
    fn heal_is_capped() {
        let mut p = Player::new("start");
        p.damage(10);
        assert_eq!(p.health(), 90);
        assert_eq!(p.heal(30), 10);
        assert_eq!(p.health(), 100);
    }

    #[test]
    fn damage_is_floored() {
        let mut p = Player::new("start");
        assert_eq!(p.damage(250), 100);
        assert_eq!(p.health(), 0);
    }

    #[test]
    fn restore_clamps_and_dedups() {
        let p = Player::restore(
            140,
            ["急救包", "手电筒", "急救包"].map(ItemId::from),
            SceneId::from("deep_forest"),
            BTreeMap::new(),
        );
        assert_eq!(p.health(), 100);
        assert_eq!(p.inventory(), &[ItemId::from("急救包"), ItemId::from("手电筒")]);

        let p = Player::restore(-5, Vec::new(), SceneId::from("start"), BTreeMap::new());
        assert_eq!(p.health(), 0);
    }

    #[test]
    fn flag_values() {
        let mut p = Player::new("start");
        assert!(p.flag("reputation").is_none());
        p.set_flag("reputation", FlagValue::Integer(50));
        assert_eq!(p.flag("reputation"), Some(&FlagValue::Integer(50)));
        assert!(FlagValue::Integer(50).is_truthy());
        assert!(!FlagValue::Text(String::new()).is_truthy());
        assert!(!FlagValue::Null.is_truthy());
        assert!(FlagValue::Float(0.5).is_truthy());
        assert!(!FlagValue::List(Vec::new()).is_truthy());
    }

    proptest! {
        #[test]
        fn grant_is_idempotent(items in proptest::collection::vec("[a-e]", 0..20)) {
            let mut p = Player::new("start");
            for item in &items {
                p.grant_item(item.as_str());
                p.grant_item(item.as_str());
            }
            let mut seen = std::collections::HashSet::new();
            for held in p.inventory() {
                prop_assert!(seen.insert(held.clone()));
            }
            for item in &items {
                prop_assert!(p.has_item(item));
            }
        }

        #[test]
        fn health_stays_in_range(ops in proptest::collection::vec((any::<bool>(), -500i32..500), 0..40)) {
            let mut p = Player::new("start");
            for (heal, amount) in ops {
                if heal {
                    p.heal(amount);
                } else {
                    p.damage(amount);
                }
                prop_assert!((0..=p.max_health()).contains(&p.health()));
            }
        }
    }
}
