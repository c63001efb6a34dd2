//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget toolkits and instead renders into a simple framebuffer that
//! is diffed and flushed to the terminal by [`TerminalRenderer`].
//!
//! Board cells are drawn 2 columns wide to compensate for glyph aspect ratio.

pub mod fb;
pub mod fx;
pub mod game_view;
pub mod renderer;

pub use teratis_core as core;
pub use teratis_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use fx::{EffectLayer, Flash, FlashKind};
pub use game_view::{format_clock, GameView, ScoreLine, ViewExtras, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
