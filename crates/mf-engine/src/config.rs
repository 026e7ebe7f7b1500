//! Configuration for a game session.

use std::path::PathBuf;

use mf_core::SceneId;

/// Default save slot location.
pub const DEFAULT_SAVE_PATH: &str = "savegame.json";

/// Default `tracing` filter when `MF_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Where the single save slot lives.
    pub save_path: PathBuf,
    /// Scene to start in instead of the catalog's start scene.
    pub start_scene: Option<SceneId>,
    /// `tracing` filter directive used by the binaries.
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            start_scene: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl GameConfig {
    /// Set the save slot path.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    /// Start somewhere other than the catalog's start scene.
    pub fn with_start_scene(mut self, scene: impl Into<SceneId>) -> Self {
        self.start_scene = Some(scene.into());
        self
    }

    /// Set the log filter directive.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}
