//! The single save slot.
//!
//! The on-disk record has exactly four fields: `health`, `inventory`,
//! `current_scene`, and `game_flags`. Only `game_flags` may be missing.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mf_core::{FlagValue, ItemId, Player, SceneId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PersistError, PersistResult};

/// Serialized form of [`Player`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    /// Current health.
    pub health: i32,
    /// Held items in acquisition order.
    pub inventory: Vec<ItemId>,
    /// Scene the player is in.
    pub current_scene: SceneId,
    /// Free-form flags.
    #[serde(default)]
    pub game_flags: BTreeMap<String, FlagValue>,
}

impl From<&Player> for SaveRecord {
    fn from(player: &Player) -> Self {
        Self {
            health: player.health(),
            inventory: player.inventory().to_vec(),
            current_scene: player.current_scene().clone(),
            game_flags: player.flags().clone(),
        }
    }
}

impl From<SaveRecord> for Player {
    fn from(record: SaveRecord) -> Self {
        Player::restore(
            record.health,
            record.inventory,
            record.current_scene,
            record.game_flags,
        )
    }
}

impl SaveRecord {
    /// Render as pretty-printed JSON. Non-ASCII text is written as-is.
    pub fn to_json(&self) -> PersistResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PersistError::Corrupt(e.to_string()))
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> PersistResult<Self> {
        serde_json::from_str(json).map_err(|e| PersistError::Corrupt(e.to_string()))
    }
}

/// A place to keep one saved player.
pub trait SaveStore {
    /// Overwrite the slot with `player`.
    fn save(&mut self, player: &Player) -> PersistResult<()>;

    /// Read the slot. [`PersistError::NotFound`] if it is empty.
    fn load(&self) -> PersistResult<Player>;

    /// Whether the slot holds anything.
    fn exists(&self) -> bool;

    /// Empty the slot. Clearing an empty slot is not an error.
    fn clear(&mut self) -> PersistResult<()>;

    /// Human-readable location, for messages.
    fn describe(&self) -> String;
}

/// A JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at `path`. Nothing is touched until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The slot's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SaveStore for JsonFileStore {
    fn save(&mut self, player: &Player) -> PersistResult<()> {
        let json = SaveRecord::from(player).to_json()?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "save written");
        Ok(())
    }

    fn load(&self) -> PersistResult<Player> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(PersistError::NotFound),
            Err(e) => return Err(e.into()),
        };
        Ok(SaveRecord::from_json(&json)?.into())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn clear(&mut self) -> PersistResult<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// An in-memory slot. Holds the serialized JSON so loads go through the
/// same parsing path as the file store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-filled with raw JSON.
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            slot: Some(json.into()),
        }
    }

    /// The raw stored JSON.
    pub fn json(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, player: &Player) -> PersistResult<()> {
        self.slot = Some(SaveRecord::from(player).to_json()?);
        Ok(())
    }

    fn load(&self) -> PersistResult<Player> {
        let json = self.slot.as_deref().ok_or(PersistError::NotFound)?;
        Ok(SaveRecord::from_json(json)?.into())
    }

    fn exists(&self) -> bool {
        self.slot.is_some()
    }

    fn clear(&mut self) -> PersistResult<()> {
        self.slot = None;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_core::MAX_HEALTH;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn sample_player() -> Player {
        let mut player = Player::new("deep_forest");
        player.grant_item("树枝");
        player.grant_item("生锈的钥匙");
        player.damage(35);
        player.set_flag("met_wolf", FlagValue::Bool(true));
        player
    }

    #[test]
    fn file_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("savegame.json"));
        let player = sample_player();

        assert!(!store.exists());
        store.save(&player).unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap(), player);
    }

    #[test]
    fn file_is_readable_utf8_with_four_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("savegame.json");
        let mut store = JsonFileStore::new(&path);
        store.save(&sample_player()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("生锈的钥匙"));
        assert!(text.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["current_scene", "game_flags", "health", "inventory"]);
        assert_eq!(obj["health"], 65);
    }

    #[test]
    fn save_creates_parent_dirs_and_leaves_no_tmp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saves").join("slot.json");
        let mut store = JsonFileStore::new(&path);
        store.save(&sample_player()).unwrap();

        assert!(path.is_file());
        assert!(!dir.path().join("saves").join("slot.json.tmp").exists());
    }

    #[test]
    fn save_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("savegame.json"));
        store.save(&sample_player()).unwrap();
        let fresh = Player::new("start");
        store.save(&fresh).unwrap();
        assert_eq!(store.load().unwrap(), fresh);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nothing.json"));
        assert!(matches!(store.load(), Err(PersistError::NotFound)));
    }

    #[test]
    fn corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("savegame.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistError::Corrupt(_))));
    }

    #[test]
    fn missing_required_field_is_corrupt() {
        let store = MemoryStore::with_json(r#"{"health": 80, "inventory": []}"#);
        let err = store.load().unwrap_err();
        assert!(matches!(err, PersistError::Corrupt(ref msg) if msg.contains("current_scene")));
    }

    #[test]
    fn missing_flags_default_to_empty() {
        let store = MemoryStore::with_json(
            r#"{"health": 80, "inventory": ["树枝"], "current_scene": "forest_path"}"#,
        );
        let player = store.load().unwrap();
        assert_eq!(player.health(), 80);
        assert!(player.has_item("树枝"));
        assert_eq!(player.current_scene(), "forest_path");
        assert!(player.flags().is_empty());
    }

    #[test]
    fn any_json_flag_value_loads() {
        let store = MemoryStore::with_json(
            r#"{"health": 80, "inventory": [], "current_scene": "start",
                "game_flags": {"score": 1.5, "met_wolf": null, "route": [1, "湖"], "seen": {"cave": true}}}"#,
        );
        let player = store.load().unwrap();
        assert_eq!(player.flag("score"), Some(&FlagValue::Float(1.5)));
        assert_eq!(player.flag("met_wolf"), Some(&FlagValue::Null));
        assert_eq!(
            player.flag("route"),
            Some(&FlagValue::List(vec![
                FlagValue::Integer(1),
                FlagValue::Text("湖".to_string())
            ]))
        );
        assert!(matches!(player.flag("seen"), Some(FlagValue::Map(m)) if m.len() == 1));

        let mut copy = MemoryStore::new();
        copy.save(&player).unwrap();
        assert!(copy.json().unwrap().contains("\"score\": 1.5"));
        assert_eq!(copy.load().unwrap(), player);
    }

    #[test]
    fn restore_clamps_hand_edited_values() {
        let store = MemoryStore::with_json(
            r#"{"health": 250, "inventory": ["树枝", "树枝"], "current_scene": "nowhere"}"#,
        );
        let player = store.load().unwrap();
        assert_eq!(player.health(), 100);
        assert_eq!(player.inventory().len(), 1);
        assert_eq!(player.current_scene(), "nowhere");
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("savegame.json"));
        store.clear().unwrap();
        store.save(&sample_player()).unwrap();
        store.clear().unwrap();
        assert!(!store.exists());

        let mut memory = MemoryStore::new();
        memory.save(&sample_player()).unwrap();
        memory.clear().unwrap();
        assert!(matches!(memory.load(), Err(PersistError::NotFound)));
    }

    fn flag_value() -> impl Strategy<Value = FlagValue> {
        let leaf = prop_oneof![
            Just(FlagValue::Null),
            any::<bool>().prop_map(FlagValue::Bool),
            any::<i64>().prop_map(FlagValue::Integer),
            // quarters print and parse exactly
            (-4000i32..4000).prop_map(|n| FlagValue::Float(f64::from(n) / 4.0)),
            "[a-z狼湖宝]{0,6}".prop_map(FlagValue::Text),
        ];
        leaf.prop_recursive(2, 12, 3, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..3).prop_map(FlagValue::List),
                proptest::collection::btree_map("[a-z]{1,4}", inner, 0..3)
                    .prop_map(FlagValue::Map),
            ]
        })
    }

    fn any_player() -> impl Strategy<Value = Player> {
        (
            0..=MAX_HEALTH,
            proptest::collection::btree_set("[树枝急救包手电筒狼牙]{1,4}", 0..6),
            "[a-z_]{1,12}",
            proptest::collection::btree_map("[a-z_]{1,8}", flag_value(), 0..4),
        )
            .prop_map(|(health, items, scene, flags)| {
                Player::restore(
                    health,
                    items.into_iter().map(ItemId::from),
                    SceneId::from(scene),
                    flags,
                )
            })
    }

    proptest! {
        #[test]
        fn saved_players_load_back_unchanged(player in any_player()) {
            let mut memory = MemoryStore::new();
            memory.save(&player).unwrap();
            prop_assert_eq!(&memory.load().unwrap(), &player);

            let dir = TempDir::new().unwrap();
            let mut file = JsonFileStore::new(dir.path().join("savegame.json"));
            file.save(&player).unwrap();
            prop_assert_eq!(&file.load().unwrap(), &player);
            let on_disk = std::fs::read_to_string(file.path()).unwrap();
            prop_assert_eq!(
                on_disk.as_str(),
                memory.json().unwrap()
            );
        }
    }
}
