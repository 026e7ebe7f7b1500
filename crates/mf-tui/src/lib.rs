//! Terminal UI for the Mystic Forest adventure.
//!
//! A single ratatui screen: the current scene with its choices, an
//! inventory panel, a message log fed by session events, and a health bar.

pub mod app;
pub mod shared;
pub mod terminal;
pub mod views;
