//! Error types for the engine and persistence.

use mf_core::{CoreError, ItemId, SceneId};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors from player actions. None of them end the session.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The item is not in the inventory.
    #[error("你没有{0}。")]
    ItemNotHeld(ItemId),

    /// The item exists but cannot be used.
    #[error("这个物品不能使用。")]
    ItemNotUsable(ItemId),

    /// The inventory holds an id the catalog does not know (hand-edited save).
    #[error("未知物品: {0}")]
    UnknownItem(ItemId),

    /// A usable item has no entry in the effect table.
    #[error("{0}似乎没有什么用处。")]
    NoEffect(ItemId),

    /// Choice index out of range for the current scene.
    #[error("无效的选择: {0}")]
    InvalidChoice(usize),

    /// The current scene is terminal; only restart or load are possible.
    #[error("游戏已经结束。")]
    GameOver,

    /// The target scene's entry requirements are not met.
    #[error("现在还不能去那里: {0}")]
    RequirementsNotMet(SceneId),

    /// Player state rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for save-slot operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Errors reading or writing the save slot.
#[derive(Debug, Error)]
pub enum PersistError {
    /// No save exists yet.
    #[error("没有找到存档文件！")]
    NotFound,

    /// The stored data could not be parsed into a player record.
    #[error("加载失败: {0}")]
    Corrupt(String),

    /// The underlying store failed.
    #[error("存档读写失败: {0}")]
    Io(#[from] std::io::Error),
}
