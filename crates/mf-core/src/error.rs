use crate::id::{ItemId, SceneId};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the content model and player state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The player tried to give up an item they do not carry.
    #[error("item not held: {0}")]
    ItemNotHeld(ItemId),

    /// Two scenes were registered under the same identifier.
    #[error("duplicate scene: \"{0}\"")]
    DuplicateScene(SceneId),

    /// Two items were registered under the same identifier.
    #[error("duplicate item: \"{0}\"")]
    DuplicateItem(ItemId),

    /// A designated scene (start or one of the endings) is not in the catalog.
    #[error("{role} scene \"{id}\" is not defined")]
    MissingDesignatedScene {
        /// Which designated slot is missing ("start", "good ending", ...).
        role: &'static str,
        /// The identifier that failed to resolve.
        id: SceneId,
    },

    /// A designated ending scene still offers choices.
    #[error("ending scene \"{0}\" has choices; endings must be terminal")]
    EndingNotTerminal(SceneId),
}
