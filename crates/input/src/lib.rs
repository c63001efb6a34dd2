//! Terminal input module (engine-facing).
//!
//! This crate is independent of any rendering code. It maps `crossterm` key events
//! into [`crate::types::GameAction`] edges, synthesizes soft-drop releases for
//! terminals that never report key releases, and holds the text state of the
//! high-score name prompt.

pub mod latch;
pub mod map;
pub mod prompt;

pub use teratis_types as types;

pub use latch::SoftDropLatch;
pub use map::{map_key_event, should_quit};
pub use prompt::{NamePrompt, PromptEvent};
