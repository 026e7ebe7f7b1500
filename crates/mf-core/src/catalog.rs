use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::id::{ItemId, SceneId};
use crate::item::Item;
use crate::scene::Scene;

/// The immutable registry of scenes and items.
///
/// Lookups by unknown identifier return `None` so callers can apply their
/// own fallback policy.
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    scenes: HashMap<SceneId, Scene>,
    items: HashMap<ItemId, Item>,

    // Authoring order, for stable listings
    scene_order: Vec<SceneId>,
    item_order: Vec<ItemId>,

    start: SceneId,
    good_ending: SceneId,
    bad_ending: SceneId,
}

impl ContentCatalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Look up a scene.
    pub fn get_scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Look up an item.
    pub fn get_item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Whether a scene with this id exists.
    pub fn has_scene(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    /// Every scene id, in authoring order.
    pub fn all_scene_ids(&self) -> &[SceneId] {
        &self.scene_order
    }

    /// Iterate over scenes in authoring order.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scene_order.iter().filter_map(|id| self.scenes.get(id))
    }

    /// Iterate over items in authoring order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.item_order.iter().filter_map(|id| self.items.get(id))
    }

    /// Number of scenes.
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Where a new game begins.
    pub fn start(&self) -> &SceneId {
        &self.start
    }

    /// The winning ending.
    pub fn good_ending(&self) -> &SceneId {
        &self.good_ending
    }

    /// The losing ending, also the fallback for unknown transitions.
    pub fn bad_ending(&self) -> &SceneId {
        &self.bad_ending
    }

    /// The bad-ending scene itself.
    pub fn fallback_scene(&self) -> &Scene {
        // `CatalogBuilder::build` refuses catalogs without it
        &self.scenes[&self.bad_ending]
    }
}

/// Builder for [`ContentCatalog`].
#[derive(Debug)]
pub struct CatalogBuilder {
    scenes: Vec<Scene>,
    items: Vec<Item>,
    start: SceneId,
    good_ending: SceneId,
    bad_ending: SceneId,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self {
            scenes: Vec::new(),
            items: Vec::new(),
            start: SceneId::from("start"),
            good_ending: SceneId::from("ending_good"),
            bad_ending: SceneId::from("ending_bad"),
        }
    }
}

impl CatalogBuilder {
    /// Add a scene.
    pub fn scene(mut self, scene: Scene) -> Self {
        self.scenes.push(scene);
        self
    }

    /// Add an item.
    pub fn item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Set the start scene (default `"start"`).
    pub fn start(mut self, id: impl Into<SceneId>) -> Self {
        self.start = id.into();
        self
    }

    /// Set the good ending (default `"ending_good"`).
    pub fn good_ending(mut self, id: impl Into<SceneId>) -> Self {
        self.good_ending = id.into();
        self
    }

    /// Set the bad ending (default `"ending_bad"`).
    pub fn bad_ending(mut self, id: impl Into<SceneId>) -> Self {
        self.bad_ending = id.into();
        self
    }

    /// Validate and freeze the catalog.
    ///
    /// Fails on duplicate identifiers, a missing start or ending scene, or an
    /// ending that still offers choices.
    pub fn build(self) -> CoreResult<ContentCatalog> {
        let mut scenes = HashMap::with_capacity(self.scenes.len());
        let mut scene_order = Vec::with_capacity(self.scenes.len());
        for scene in self.scenes {
            if scenes.contains_key(&scene.id) {
                return Err(CoreError::DuplicateScene(scene.id));
            }
            scene_order.push(scene.id.clone());
            scenes.insert(scene.id.clone(), scene);
        }

        let mut items = HashMap::with_capacity(self.items.len());
        let mut item_order = Vec::with_capacity(self.items.len());
        for item in self.items {
            if items.contains_key(&item.id) {
                return Err(CoreError::DuplicateItem(item.id));
            }
            item_order.push(item.id.clone());
            items.insert(item.id.clone(), item);
        }

        for (role, id) in [
            ("start", &self.start),
            ("good ending", &self.good_ending),
            ("bad ending", &self.bad_ending),
        ] {
            if !scenes.contains_key(id) {
                return Err(CoreError::MissingDesignatedScene {
                    role,
                    id: id.clone(),
                });
            }
        }

        for id in [&self.good_ending, &self.bad_ending] {
            if scenes.get(id).is_some_and(|s: &Scene| !s.is_terminal()) {
                return Err(CoreError::EndingNotTerminal(id.clone()));
            }
        }

        Ok(ContentCatalog {
            scenes,
            items,
            scene_order,
            item_order,
            start: self.start,
            good_ending: self.good_ending,
            bad_ending: self.bad_ending,
        })
    }
}
