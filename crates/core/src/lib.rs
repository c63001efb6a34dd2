//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has no dependency on terminals, files, or clocks: the caller feeds elapsed
//! milliseconds into [`GameState::tick`] and edge-triggered [`types::GameAction`]s into
//! [`GameState::apply_action`], and reads back a [`GameSnapshot`].
//!
//! # Module Structure
//!
//! - [`shape`]: the five block patterns and their clockwise rotation
//! - [`piece`]: positioned shapes and the current/next piece queue
//! - [`grid`]: the playfield, the placement predicate, row clearing and per-column gravity
//! - [`rng`]: deterministic piece generation
//! - [`scoring`]: combo-weighted line points and the win/lose timer policy
//! - [`game_state`]: the engine tying it all together
//! - [`effects`]: cosmetic notifications for a presentation layer
//! - [`outcome`]: finished-round results and the [`ScoreRecorder`] hook
//!
//! # Game Rules
//!
//! - Pieces fall one row per interval (500ms, 50ms while soft dropping)
//! - A piece that cannot fall is baked into the grid immediately (no lock delay)
//! - Full rows are removed, then every column compacts downward on its own; this can
//!   complete further rows, which are resolved in the same placement
//! - A clear pass scores `base(lines) * combo` with the combo counted *before* the pass,
//!   so only consecutive clears pay
//! - Reaching the target score wins; running out of time or spawning into the stack loses
//!
//! # Example
//!
//! ```
//! use teratis_core::{GameConfig, GameState};
//! use teratis_types::{GameAction, GameStatus};
//!
//! let mut game = GameState::new(GameConfig::default(), 12345).unwrap();
//! game.tick(16); // first tick spawns
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.status(), GameStatus::Playing);
//! assert_eq!(game.pieces_placed(), 1);
//! ```

pub mod config;
pub mod effects;
pub mod game_state;
pub mod grid;
pub mod outcome;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use teratis_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, GameConfig};
pub use effects::{Effect, EffectBuffer};
pub use game_state::GameState;
pub use grid::{Grid, PlacedCell};
pub use outcome::{MemoryRecorder, Outcome, ScoreRecorder};
pub use piece::{Piece, PieceQueue};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::ClearResult;
pub use shape::Shape;
pub use snapshot::GameSnapshot;
