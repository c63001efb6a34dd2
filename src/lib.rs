//! Teratis (workspace facade crate).
//!
//! Re-exports the member crates under short module names so that binaries, tests and
//! benchmarks can write `teratis::core::GameState` and friends.

pub mod config;

pub use teratis_core as core;
pub use teratis_engine as engine;
pub use teratis_input as input;
pub use teratis_scores as scores;
pub use teratis_term as term;
pub use teratis_types as types;
