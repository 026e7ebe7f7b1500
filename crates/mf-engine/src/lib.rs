//! Scene engine, sessions, and save games for Mystic Forest.
//!
//! The [`SceneEngine`] is a finite-state machine over scene identifiers. It
//! applies narrative overrides before routing, redirects unknown targets to
//! the bad ending, grants items on entry, and dispatches item use through a
//! closed effect table. [`GameSession`] wraps one player, a save slot, and a
//! set of observers; it is what presentation layers drive.

/// Game configuration.
pub mod config;
/// Item-use effect table.
pub mod effect;
/// The scene engine.
pub mod engine;
/// Error types for the engine and persistence.
pub mod error;
/// Events emitted to presentation layers.
pub mod event;
/// Narrative override table.
pub mod overrides;
/// Save slot persistence.
pub mod persist;
/// Session facade.
pub mod session;

pub use config::GameConfig;
pub use effect::{ItemEffect, ItemEffects};
pub use engine::{ChoiceView, SceneEngine, SceneEnterResult, UseItemResult};
pub use error::{EngineError, EngineResult, PersistError, PersistResult};
pub use event::{Ending, EventLog, GameEvent, GameObserver};
pub use overrides::{Override, OverrideTable};
pub use persist::{JsonFileStore, MemoryStore, SaveRecord, SaveStore};
pub use session::{GameSession, InventoryEntry};
