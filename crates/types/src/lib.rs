//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, persistence).
//!
//! # Grid Dimensions
//!
//! The playfield size is configurable at construction time; these are the defaults:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn anchor**: (width / 2, 0), the top-left corner of the shape pattern
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `DEFAULT_FALL_MS` | 500 | Gravity interval while no key is held |
//! | `SOFT_DROP_FALL_MS` | 50 | Gravity interval while soft drop is held |
//! | `DEFAULT_TIME_LIMIT_SECS` | 180 | Round length before time runs out |
//!
//! # Examples
//!
//! ```
//! use teratis_types::{ShapeKind, Color, GameAction, GRID_WIDTH, GRID_HEIGHT};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//!
//! assert_eq!(Color::from_index(0), Some(Color::Gold));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Default grid width in cells (10 columns)
pub const GRID_WIDTH: u16 = 10;

/// Default grid height in cells (20 rows)
pub const GRID_HEIGHT: u16 = 20;

/// Largest accepted grid dimension on either axis.
pub const MAX_GRID_DIM: u16 = 256;

/// Default cell size in pixels, kept for presentation layers that draw in pixels.
pub const DEFAULT_CELL_SIZE: u16 = 30;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default gravity interval (one row every 500ms)
pub const DEFAULT_FALL_MS: u32 = 500;

/// Gravity interval while soft drop is held
pub const SOFT_DROP_FALL_MS: u32 = 50;

/// Default round length in seconds
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 180;

/// Default score needed to win a round
pub const DEFAULT_TARGET_SCORE: u32 = 1000;

/// Number of entries kept in the persisted high-score table
pub const HIGH_SCORE_LIMIT: usize = 10;

/// Longest accepted player name
pub const MAX_NAME_LEN: usize = 12;

/// Name recorded when the player leaves the prompt blank
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Line clear scoring table.
///
/// Index is the number of rows cleared in one resolution pass:
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4+ lines: 800 points
///
/// Points are multiplied by the combo count *before* it is incremented.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The five shape kinds
///
/// - **I**: 4x1 vertical bar
/// - **L**: 3x2 L-shape
/// - **T**: 2x3 T-shape
/// - **S**: 2x3 S-shape
/// - **O**: 2x2 square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    L,
    T,
    S,
    O,
}

impl ShapeKind {
    /// Every kind, in spawn-table order.
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::I,
        ShapeKind::L,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::O,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use teratis_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("z"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "l" => Some(ShapeKind::L),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "o" => Some(ShapeKind::O),
            _ => None,
        }
    }

    /// Uppercase letter used by the side panel and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::L => "L",
            ShapeKind::T => "T",
            ShapeKind::S => "S",
            ShapeKind::O => "O",
        }
    }
}

/// The fixed five-color palette a piece is painted with.
///
/// Color is chosen independently of the shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Gold,
    Purple,
    SkyBlue,
    LimeGreen,
    Tomato,
}

impl Color {
    /// Every palette entry, in index order.
    pub const ALL: [Color; 5] = [
        Color::Gold,
        Color::Purple,
        Color::SkyBlue,
        Color::LimeGreen,
        Color::Tomato,
    ];

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    /// 24-bit RGB triple for this palette entry
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Gold => (255, 215, 0),
            Color::Purple => (147, 112, 219),
            Color::SkyBlue => (0, 191, 255),
            Color::LimeGreen => (50, 205, 50),
            Color::Tomato => (255, 99, 71),
        }
    }
}

/// Top-level game state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Playing,
    Paused,
    GameOver,
    Won,
}

impl GameStatus {
    /// `GameOver` and `Won` only leave through an explicit restart.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Won)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "game_over",
            GameStatus::Won => "won",
        }
    }
}

/// Discrete, edge-triggered commands delivered to the engine
///
/// Soft drop is a pair of edges (key down / key up) rather than a held state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Switch gravity to the fast soft-drop interval
    SoftDropStart,
    /// Restore the normal gravity interval
    SoftDropEnd,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Drop piece to its lowest valid position and place it
    HardDrop,
    /// Toggle between playing and paused
    TogglePause,
    /// Reset the round (valid in every state)
    Restart,
    /// Leave the game loop
    Quit,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use teratis_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("softDropStart"), Some(GameAction::SoftDropStart));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdropstart" => Some(GameAction::SoftDropStart),
            "softdropend" => Some(GameAction::SoftDropEnd),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "togglepause" | "pause" => Some(GameAction::TogglePause),
            "restart" => Some(GameAction::Restart),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropEnd => "softDropEnd",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::TogglePause => "togglePause",
            GameAction::Restart => "restart",
            GameAction::Quit => "quit",
        }
    }
}

/// A cell on the game grid
///
/// - `None`: Empty cell
/// - `Some(Color)`: Placed cell painted with the landed piece's color
pub type Cell = Option<Color>;
