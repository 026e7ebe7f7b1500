//! Core types for Mystic Forest: scenes, items, player state, and the catalog.
//!
//! This crate defines the static content model that the scene engine walks.
//! A [`ContentCatalog`] is built once at startup, either programmatically via
//! [`ContentCatalog::builder`] or from the shipped story with
//! [`ContentCatalog::mystic_forest`], and is read-only afterwards.

/// The immutable registry of scenes and items.
pub mod catalog;
/// The shipped Mystic Forest story data.
pub mod content;
/// Error types used throughout the crate.
pub mod error;
/// Opaque scene and item identifiers.
pub mod id;
/// Static checks over a catalog's scene graph.
pub mod integrity;
/// Item definitions.
pub mod item;
/// The mutable player record.
pub mod player;
/// Entry requirements evaluated against player state.
pub mod requirement;
/// Scene and choice definitions.
pub mod scene;

pub use catalog::{CatalogBuilder, ContentCatalog};
pub use error::{CoreError, CoreResult};
pub use id::{ItemId, SceneId};
pub use integrity::{IntegrityIssue, Severity, Subject, check_content, check_content_with};
pub use item::Item;
pub use player::{FlagValue, MAX_HEALTH, Player};
pub use requirement::Requirement;
pub use scene::{Choice, Scene};
