//! The facade presentation layers drive.
//!
//! A [`GameSession`] owns one [`Player`], one save slot, and any number of
//! observers. Every state change goes through here so observers see a
//! consistent stream of [`GameEvent`]s.

use std::sync::Arc;

use mf_core::{ContentCatalog, ItemId, Player, SceneId};
use tracing::info;

use crate::config::GameConfig;
use crate::effect::ItemEffects;
use crate::engine::{SceneEngine, SceneEnterResult, UseItemResult};
use crate::error::{EngineError, EngineResult, PersistResult};
use crate::event::{GameEvent, GameObserver};
use crate::overrides::OverrideTable;
use crate::persist::{JsonFileStore, SaveStore};

/// One inventory row, resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    /// Item id.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Description, empty for ids the catalog does not know.
    pub description: String,
    /// Whether `use` can do anything with it.
    pub usable: bool,
}

/// A single play-through.
pub struct GameSession {
    catalog: Arc<ContentCatalog>,
    overrides: OverrideTable,
    effects: ItemEffects,
    config: GameConfig,
    store: Box<dyn SaveStore>,
    observers: Vec<Box<dyn GameObserver>>,
    player: Player,
    current: Option<SceneEnterResult>,
}

impl GameSession {
    /// Create a session with the shipped overrides and effects, saving to
    /// `config.save_path`. Call [`start`](Self::start) before playing.
    pub fn new(catalog: Arc<ContentCatalog>, config: GameConfig) -> Self {
        let overrides = OverrideTable::mystic_forest(&catalog);
        let store = Box::new(JsonFileStore::new(config.save_path.clone()));
        let player = Player::new(start_scene(&catalog, &config));
        Self {
            catalog,
            overrides,
            effects: ItemEffects::mystic_forest(),
            config,
            store,
            observers: Vec::new(),
            player,
            current: None,
        }
    }

    /// Replace the save slot.
    pub fn with_store(mut self, store: Box<dyn SaveStore>) -> Self {
        self.store = store;
        self
    }

    /// Replace the override table.
    pub fn with_overrides(mut self, overrides: OverrideTable) -> Self {
        self.overrides = overrides;
        self
    }

    /// Replace the item effect table.
    pub fn with_effects(mut self, effects: ItemEffects) -> Self {
        self.effects = effects;
        self
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Enter the start scene.
    pub fn start(&mut self) -> SceneEnterResult {
        let start = self.player.current_scene().clone();
        self.enter(&start)
    }

    /// Pick the `index`-th (zero-based) choice of the current scene.
    pub fn choose(&mut self, index: usize) -> EngineResult<SceneEnterResult> {
        let current = self.current.as_ref().ok_or(EngineError::InvalidChoice(index))?;
        if current.terminal {
            return Err(EngineError::GameOver);
        }
        let target = current
            .choices
            .get(index)
            .map(|c| c.target.clone())
            .ok_or(EngineError::InvalidChoice(index))?;
        self.choose_target(target.as_str())
    }

    /// Route to `target` as if the player had picked a choice leading there.
    pub fn choose_target(&mut self, target: &str) -> EngineResult<SceneEnterResult> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        let engine = SceneEngine::new(&self.catalog, &self.overrides, &self.effects);
        let result = engine.choose(&mut self.player, target)?;
        self.publish(&result);
        Ok(result)
    }

    /// Use a held item.
    pub fn use_item(&mut self, item: &str) -> EngineResult<UseItemResult> {
        let before = self.player.health();
        let engine = SceneEngine::new(&self.catalog, &self.overrides, &self.effects);
        let used = engine.use_item(&mut self.player, item)?;
        self.emit(GameEvent::ItemUsed {
            item: used.item.clone(),
            consumed: used.consumed,
        });
        if used.health != before {
            self.emit(GameEvent::HealthChanged {
                from: before,
                to: used.health,
            });
        }
        Ok(used)
    }

    /// The inventory with catalog details, in acquisition order.
    pub fn inventory(&self) -> Vec<InventoryEntry> {
        self.player
            .inventory()
            .iter()
            .map(|id| match self.catalog.get_item(id.as_str()) {
                Some(item) => InventoryEntry {
                    id: id.clone(),
                    name: item.name.clone(),
                    description: item.description.clone(),
                    usable: item.usable,
                },
                None => InventoryEntry {
                    id: id.clone(),
                    name: id.to_string(),
                    description: String::new(),
                    usable: false,
                },
            })
            .collect()
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The last scene entered, if the session has started.
    pub fn current(&self) -> Option<&SceneEnterResult> {
        self.current.as_ref()
    }

    /// Whether the current scene is terminal.
    pub fn is_over(&self) -> bool {
        self.current.as_ref().is_some_and(|c| c.terminal)
    }

    /// Where saves go, for messages.
    pub fn save_location(&self) -> String {
        self.store.describe()
    }

    /// Whether the save slot holds a game.
    pub fn has_save(&self) -> bool {
        self.store.exists()
    }

    /// Write the player to the save slot.
    pub fn save(&mut self) -> PersistResult<()> {
        self.store.save(&self.player)?;
        info!(location = %self.store.describe(), scene = %self.player.current_scene(), "game saved");
        self.emit(GameEvent::GameSaved);
        Ok(())
    }

    /// Replace the player with the saved one and re-enter its scene. On
    /// error the current player is kept.
    pub fn load(&mut self) -> PersistResult<SceneEnterResult> {
        let player = self.store.load()?;
        let scene = player.current_scene().clone();
        self.player = player;
        info!(location = %self.store.describe(), %scene, "game loaded");
        self.emit(GameEvent::GameLoaded);
        Ok(self.enter(&scene))
    }

    /// Start over with a fresh player.
    pub fn restart(&mut self) -> SceneEnterResult {
        let start = start_scene(&self.catalog, &self.config);
        self.player = Player::new(start.clone());
        info!(%start, "game restarted");
        self.emit(GameEvent::GameRestarted);
        self.enter(&start)
    }

    fn enter(&mut self, scene: &SceneId) -> SceneEnterResult {
        let engine = SceneEngine::new(&self.catalog, &self.overrides, &self.effects);
        let result = engine.enter_scene(&mut self.player, scene.as_str());
        self.publish(&result);
        result
    }

    /// Emit the events of an entry and remember it as the current scene.
    fn publish(&mut self, result: &SceneEnterResult) {
        if let Some(from) = &result.redirected {
            self.emit(GameEvent::Redirected {
                from: from.clone(),
                to: result.scene_id.clone(),
            });
        }
        self.emit(GameEvent::SceneEntered {
            scene: result.scene_id.clone(),
            title: result.title.clone(),
        });
        for event in &result.events {
            self.emit(event.clone());
        }
        if let Some(ending) = result.ending {
            info!(%ending, "ending reached");
            self.emit(GameEvent::EndingReached(ending));
        }

        self.current = Some(result.clone());
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }
}

fn start_scene(catalog: &ContentCatalog, config: &GameConfig) -> SceneId {
    config
        .start_scene
        .clone()
        .unwrap_or_else(|| catalog.start().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistError;
    use crate::event::{Ending, EventLog};
    use crate::persist::MemoryStore;
    use mf_core::{Requirement, Scene};

    fn session() -> (GameSession, EventLog) {
        let catalog = Arc::new(ContentCatalog::mystic_forest().unwrap());
        let mut session = GameSession::new(catalog, GameConfig::default())
            .with_store(Box::new(MemoryStore::new()));
        let log = EventLog::new();
        session.subscribe(Box::new(log.clone()));
        (session, log)
    }

    /// Index of the choice leading to `target` in the current scene.
    fn pick(session: &GameSession, target: &str) -> usize {
        session
            .current()
            .unwrap()
            .choices
            .iter()
            .position(|c| c.target == target)
            .unwrap()
    }

    #[test]
    fn start_enters_start_scene() {
        let (mut session, log) = session();
        let result = session.start();
        assert_eq!(result.scene_id, "start");
        assert_eq!(result.title, "神秘森林");
        assert_eq!(session.player().health(), 100);
        assert_eq!(
            log.take(),
            vec![GameEvent::SceneEntered {
                scene: "start".into(),
                title: "神秘森林".to_string(),
            }]
        );
    }

    #[test]
    fn choosing_by_index_grants_items() {
        let (mut session, log) = session();
        session.start();
        log.take();

        let result = session.choose(pick(&session, "forest_path")).unwrap();
        assert_eq!(result.title, "森林小径");
        assert!(log.events().contains(&GameEvent::ItemAcquired("树枝".into())));
        assert_eq!(session.inventory()[0].name, "树枝");
        assert!(session.inventory()[0].usable);
    }

    #[test]
    fn out_of_range_choice() {
        let (mut session, _) = session();
        session.start();
        let err = session.choose(9).unwrap_err();
        assert!(matches!(err, EngineError::InvalidChoice(9)));
        assert_eq!(session.player().current_scene(), "start");
    }

    #[test]
    fn choose_before_start_is_invalid() {
        let (mut session, _) = session();
        assert!(matches!(session.choose(0), Err(EngineError::InvalidChoice(0))));
    }

    #[test]
    fn full_route_to_good_ending() {
        let (mut session, log) = session();
        session.start();
        for target in ["examine_area", "cave_entrance", "inside_cave", "cave_deep", "swim_to_island"] {
            session.choose(pick(&session, target)).unwrap();
        }
        let result = session.choose(pick(&session, "take_treasure")).unwrap();

        assert_eq!(result.scene_id, "ending_good");
        assert_eq!(result.ending, Some(Ending::Good));
        assert!(session.is_over());
        assert!(log.events().contains(&GameEvent::EndingReached(Ending::Good)));
        assert!(matches!(session.choose(0), Err(EngineError::GameOver)));
    }

    #[test]
    fn dangling_choice_reaches_bad_ending() {
        let (mut session, log) = session();
        session.start();
        session.choose(pick(&session, "call_for_help")).unwrap();
        let result = session.choose(pick(&session, "run_away")).unwrap();

        assert_eq!(result.scene_id, "ending_bad");
        let events = log.events();
        assert!(events.contains(&GameEvent::Redirected {
            from: "run_away".into(),
            to: "ending_bad".into(),
        }));
        assert_eq!(events.last(), Some(&GameEvent::EndingReached(Ending::Bad)));
    }

    #[test]
    fn use_item_emits_health_change() {
        let (mut session, log) = session();
        session.start();
        session.choose(pick(&session, "forest_path")).unwrap();
        session.choose(pick(&session, "check_roadside")).unwrap();
        log.take();

        // at full health a first-aid kit is still consumed
        let used = session.use_item("急救包").unwrap();
        assert!(used.consumed);
        assert_eq!(used.healed, 0);
        assert_eq!(
            log.take(),
            vec![GameEvent::ItemUsed {
                item: "急救包".into(),
                consumed: true,
            }]
        );

        let err = session.use_item("急救包").unwrap_err();
        assert!(matches!(err, EngineError::ItemNotHeld(_)));
        assert!(log.is_empty());
    }

    #[test]
    fn save_then_load_restores_player() {
        let (mut session, log) = session();
        session.start();
        session.choose(pick(&session, "forest_path")).unwrap();
        session.save().unwrap();
        let saved = session.player().clone();

        session.choose(pick(&session, "deep_forest")).unwrap();
        assert_ne!(session.player(), &saved);

        let result = session.load().unwrap();
        assert_eq!(session.player(), &saved);
        assert_eq!(result.scene_id, "forest_path");
        assert!(result.events.is_empty());
        let events = log.events();
        assert!(events.contains(&GameEvent::GameSaved));
        assert!(events.contains(&GameEvent::GameLoaded));
    }

    #[test]
    fn failed_load_keeps_player() {
        let (mut session, _) = session();
        session.start();
        session.choose(pick(&session, "forest_path")).unwrap();
        let before = session.player().clone();

        assert!(matches!(session.load(), Err(PersistError::NotFound)));
        assert_eq!(session.player(), &before);
    }

    #[test]
    fn load_of_unknown_scene_redirects() {
        let catalog = Arc::new(ContentCatalog::mystic_forest().unwrap());
        let store = MemoryStore::with_json(
            r#"{"health": 50, "inventory": [], "current_scene": "gone", "game_flags": {}}"#,
        );
        let mut session = GameSession::new(catalog, GameConfig::default()).with_store(Box::new(store));
        let result = session.load().unwrap();
        assert_eq!(result.scene_id, "ending_bad");
        assert_eq!(result.redirected.as_ref().map(SceneId::as_str), Some("gone"));
        assert_eq!(session.player().health(), 50);
    }

    #[test]
    fn restart_resets_player() {
        let (mut session, log) = session();
        session.start();
        session.choose(pick(&session, "forest_path")).unwrap();
        let result = session.restart();

        assert_eq!(result.scene_id, "start");
        assert!(session.player().inventory().is_empty());
        assert!(!session.is_over());
        assert!(log.events().contains(&GameEvent::GameRestarted));
    }

    #[test]
    fn configured_start_scene() {
        let catalog = Arc::new(ContentCatalog::mystic_forest().unwrap());
        let config = GameConfig::default().with_start_scene("help_wolf");
        let mut session = GameSession::new(catalog, config).with_store(Box::new(MemoryStore::new()));

        assert_eq!(session.start().scene_id, "help_wolf");
        let result = session.choose(pick(&session, "follow_wolf")).unwrap();
        assert_eq!(result.scene_id, "cave_deep");
        assert_eq!(session.restart().scene_id, "help_wolf");
    }

    #[test]
    fn requirements_gate_choices() {
        let catalog = ContentCatalog::builder()
            .scene(
                Scene::new("start", "起点", "...")
                    .with_choice("开门", "vault")
                    .with_choice("捡钥匙", "shed"),
            )
            .scene(Scene::new("shed", "小屋", "...").with_grant("钥匙").with_choice("回去", "start"))
            .scene(
                Scene::new("vault", "密室", "...")
                    .with_requirement(Requirement::HasItem("钥匙".into()))
                    .with_choice("离开", "ending_good"),
            )
            .scene(Scene::new("ending_good", "好", "..."))
            .scene(Scene::new("ending_bad", "坏", "..."))
            .item(mf_core::Item::new("钥匙", "一把钥匙"))
            .build()
            .unwrap();
        let mut session = GameSession::new(Arc::new(catalog), GameConfig::default())
            .with_overrides(OverrideTable::new())
            .with_store(Box::new(MemoryStore::new()));
        session.start();

        let err = session.choose(0).unwrap_err();
        assert!(matches!(err, EngineError::RequirementsNotMet(ref s) if s == "vault"));
        assert_eq!(session.player().current_scene(), "start");

        session.choose(1).unwrap();
        session.choose(0).unwrap();
        assert_eq!(session.choose(0).unwrap().scene_id, "vault");
    }

    #[test]
    fn inventory_uses_display_names() {
        let catalog = ContentCatalog::builder()
            .scene(
                Scene::new("start", "起点", "...")
                    .with_grant("key_01")
                    .with_choice("走", "ending_good"),
            )
            .scene(Scene::new("ending_good", "好", "..."))
            .scene(Scene::new("ending_bad", "坏", "..."))
            .item(mf_core::Item::new("key_01", "一把旧钥匙").with_name("生锈的钥匙"))
            .build()
            .unwrap();
        let mut session = GameSession::new(Arc::new(catalog), GameConfig::default())
            .with_store(Box::new(MemoryStore::new()));
        session.start();

        let inventory = session.inventory();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory[0].id, "key_01");
        assert_eq!(inventory[0].name, "生锈的钥匙");
        assert_eq!(inventory[0].description, "一把旧钥匙");
    }

    #[test]
    fn headless_without_observers() {
        let catalog = Arc::new(ContentCatalog::mystic_forest().unwrap());
        let mut session = GameSession::new(catalog, GameConfig::default())
            .with_store(Box::new(MemoryStore::new()));
        session.start();
        assert_eq!(session.choose(0).unwrap().scene_id, "forest_path");
    }
}
