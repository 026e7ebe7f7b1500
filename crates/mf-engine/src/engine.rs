//! The scene state machine.
//!
//! Unknown targets never fail: they are replaced by the catalog's bad
//! ending. Choosing a scene whose entry requirements are unmet and using an
//! item can fail, and failures leave the player untouched.

use mf_core::{ContentCatalog, ItemId, Player, Scene, SceneId};
use tracing::{debug, warn};

use crate::effect::{ItemEffect, ItemEffects};
use crate::error::{EngineError, EngineResult};
use crate::event::{Ending, GameEvent};
use crate::overrides::OverrideTable;

/// A choice as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    /// Display text.
    pub label: String,
    /// Target as authored (before overrides).
    pub target: SceneId,
}

/// What the presentation layer needs after entering a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEnterResult {
    /// The scene actually entered.
    pub scene_id: SceneId,
    /// Title.
    pub title: String,
    /// Narrative text.
    pub description: String,
    /// Choices in authored order.
    pub choices: Vec<ChoiceView>,
    /// `ItemAcquired` events for items granted on this entry.
    pub events: Vec<GameEvent>,
    /// No choices remain.
    pub terminal: bool,
    /// Which designated ending this is, if any.
    pub ending: Option<Ending>,
    /// The unresolved target this entry replaced, if any.
    pub redirected: Option<SceneId>,
}

/// Outcome of a successful item use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseItemResult {
    /// The item used.
    pub item: ItemId,
    /// Message shown to the player.
    pub message: String,
    /// Whether the item left the inventory.
    pub consumed: bool,
    /// Health actually gained after clamping.
    pub healed: i32,
    /// Health after the use.
    pub health: i32,
}

/// Finite-state machine over scene identifiers.
#[derive(Debug, Clone, Copy)]
pub struct SceneEngine<'a> {
    catalog: &'a ContentCatalog,
    overrides: &'a OverrideTable,
    effects: &'a ItemEffects,
}

impl<'a> SceneEngine<'a> {
    /// Create an engine over borrowed content.
    pub fn new(
        catalog: &'a ContentCatalog,
        overrides: &'a OverrideTable,
        effects: &'a ItemEffects,
    ) -> Self {
        Self {
            catalog,
            overrides,
            effects,
        }
    }

    /// Move the player into `scene_id`, granting the scene's items.
    ///
    /// Entry requirements are not evaluated here, so starting, loading, and
    /// redirecting always land. Player choices are gated in
    /// [`choose`](Self::choose).
    pub fn enter_scene(&self, player: &mut Player, scene_id: &str) -> SceneEnterResult {
        let (scene, redirected) = self.resolve(scene_id);
        player.move_to(scene.id.clone());
        debug!(scene = %scene.id, "entered scene");

        let mut events = Vec::new();
        for item in &scene.grants {
            if self.catalog.get_item(item.as_str()).is_none() {
                debug!(%item, scene = %scene.id, "skipping grant of unknown item");
                continue;
            }
            if player.grant_item(item.clone()) {
                debug!(%item, "item granted");
                events.push(GameEvent::ItemAcquired(item.clone()));
            }
        }

        SceneEnterResult {
            scene_id: scene.id.clone(),
            title: scene.title.clone(),
            description: scene.description.clone(),
            choices: scene
                .choices
                .iter()
                .map(|c| ChoiceView {
                    label: c.label.clone(),
                    target: c.target.clone(),
                })
                .collect(),
            events,
            terminal: scene.is_terminal(),
            ending: self.ending_of(scene),
            redirected,
        }
    }

    /// Apply narrative overrides to a chosen target.
    pub fn resolve_choice(&self, player: &Player, chosen: &str) -> SceneId {
        let current = player.current_scene();
        match self.overrides.lookup(current.as_str(), chosen) {
            Some(to) => {
                debug!(from = %current, chosen, to = %to, "override applied");
                to.clone()
            }
            None => SceneId::from(chosen),
        }
    }

    /// [`resolve_choice`](Self::resolve_choice), then
    /// [`enter_scene`](Self::enter_scene) if the resolved scene admits the
    /// player. This is the only place entry requirements are enforced.
    pub fn choose(&self, player: &mut Player, chosen: &str) -> EngineResult<SceneEnterResult> {
        let target = self.resolve_choice(player, chosen);
        if !self.can_enter(player, target.as_str()) {
            debug!(scene = %target, "entry requirements not met");
            return Err(EngineError::RequirementsNotMet(target));
        }
        Ok(self.enter_scene(player, target.as_str()))
    }

    /// Whether the player meets the scene's entry requirements. Unknown
    /// scenes are always enterable; the redirect handles them.
    pub fn can_enter(&self, player: &Player, scene_id: &str) -> bool {
        self.catalog
            .get_scene(scene_id)
            .is_none_or(|scene| scene.admits(player))
    }

    /// Use a held item.
    pub fn use_item(&self, player: &mut Player, item_id: &str) -> EngineResult<UseItemResult> {
        let id = ItemId::from(item_id);
        if !player.has_item(item_id) {
            return Err(EngineError::ItemNotHeld(id));
        }
        let item = self
            .catalog
            .get_item(item_id)
            .ok_or_else(|| EngineError::UnknownItem(id.clone()))?;
        if !item.usable {
            return Err(EngineError::ItemNotUsable(id));
        }
        let effect = self
            .effects
            .get(item_id)
            .ok_or_else(|| EngineError::NoEffect(id.clone()))?;

        let (consumed, healed) = match effect {
            ItemEffect::Heal { amount, .. } => {
                player.consume_item(item_id)?;
                (true, player.heal(*amount))
            }
            ItemEffect::Inspect { .. } => (false, 0),
        };
        debug!(item = %id, consumed, healed, "item used");

        Ok(UseItemResult {
            item: id,
            message: effect.message().to_string(),
            consumed,
            healed,
            health: player.health(),
        })
    }

    fn resolve(&self, scene_id: &str) -> (&'a Scene, Option<SceneId>) {
        match self.catalog.get_scene(scene_id) {
            Some(scene) => (scene, None),
            None => {
                let fallback = self.catalog.fallback_scene();
                warn!(target_scene = scene_id, to = %fallback.id, "unknown scene, redirecting");
                (fallback, Some(SceneId::from(scene_id)))
            }
        }
    }

    fn ending_of(&self, scene: &Scene) -> Option<Ending> {
        if !scene.is_terminal() {
            None
        } else if &scene.id == self.catalog.good_ending() {
            Some(Ending::Good)
        } else if &scene.id == self.catalog.bad_ending() {
            Some(Ending::Bad)
        } else {
            None
        }
    }
}
