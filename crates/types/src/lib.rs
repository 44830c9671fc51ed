//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data: the game core, the async runtime and any
//! presentation shell can share these definitions without pulling in logic.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn position**: `x = width / 2 - shape_width / 2`, `y = 0`
//!
//! # Progression Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_DROP_TIME_MS` | 1000 | Fall interval at level 1 |
//! | `DROP_TIME_DECREASE_PER_LEVEL_MS` | 70 | Interval reduction per level |
//! | `MIN_DROP_TIME_MS` | 100 | Interval floor |
//! | `LINES_PER_LEVEL` | 10 | Lines needed per level |
//! | `POINTS_PER_LINE` | 100 | Base points per cleared line (times level) |
//! | `INITIAL_LIVES` | 3 | Lives at the start of a game |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, RotateDirection, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! assert_eq!(RotateDirection::Clockwise.reverse(), RotateDirection::CounterClockwise);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fall interval at level 1
pub const INITIAL_DROP_TIME_MS: u32 = 1000;

/// How much faster each level falls
pub const DROP_TIME_DECREASE_PER_LEVEL_MS: u32 = 70;

/// Fall interval floor
pub const MIN_DROP_TIME_MS: u32 = 100;

/// Cumulative lines required per level (`level * LINES_PER_LEVEL`)
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per cleared line, multiplied by the current level
pub const POINTS_PER_LINE: u32 = 100;

/// Lives at the start of a game
pub const INITIAL_LIVES: u32 = 3;

/// Level at the start of a game
pub const INITIAL_LEVEL: u32 = 1;

/// Empty-cell color tag used when the shell does not supply one
pub const DEFAULT_EMPTY_COLOR: &str = "gray";


/// The seven tetromino piece kinds
///
/// Each kind has one fixed shape and color in the piece catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Direction of a 90° rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

impl RotateDirection {
    /// The direction that undoes this one
    pub fn reverse(&self) -> Self {
        match self {
            RotateDirection::Clockwise => RotateDirection::CounterClockwise,
            RotateDirection::CounterClockwise => RotateDirection::Clockwise,
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cw" | "clockwise" => Some(RotateDirection::Clockwise),
            "ccw" | "counterclockwise" | "counter-clockwise" => {
                Some(RotateDirection::CounterClockwise)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RotateDirection::Clockwise => "clockwise",
            RotateDirection::CounterClockwise => "counterclockwise",
        }
    }
}

/// User intents a shell forwards into the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    HardDrop,
    /// Toggles the paused flag
    Pause,
    Restart,
}

impl GameAction {
    /// Parse action from an intent name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(GameAction::MoveLeft),
            "moveright" | "right" => Some(GameAction::MoveRight),
            "rotatecw" | "rotate" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "harddrop" | "drop" => Some(GameAction::HardDrop),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Opaque color tag, passed through verbatim and never interpreted
pub type ColorTag = Arc<str>;

/// Occupancy of a board cell
///
/// - **Empty**: background, carries the board's empty color
/// - **Transient**: drawn by a shell for the falling piece, never blocks
/// - **Locked**: a settled block, carries the color of its piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Empty,
    Transient,
    Locked,
}

/// A cell on the game board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub color: ColorTag,
    pub state: CellState,
}

impl Cell {
    pub fn empty(color: ColorTag) -> Self {
        Self {
            color,
            state: CellState::Empty,
        }
    }

    pub fn locked(color: ColorTag) -> Self {
        Self {
            color,
            state: CellState::Locked,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state == CellState::Empty
    }

    pub fn is_locked(&self) -> bool {
        self.state == CellState::Locked
    }
}

/// Board-relative coordinate (or displacement); `y` grows downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ZERO: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Why a life was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LifeLossCause {
    /// The falling piece came to rest touching the top row
    NearTopLock,
    /// A freshly spawned piece overlapped the stack at the top
    SpawnCollision,
}

/// Notable state transitions, queued by the controller for observers
///
/// Drained with `GameState::take_events`; the runtime writes them to its
/// JSON-lines event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum GameEvent {
    #[serde(rename_all = "camelCase")]
    PieceLocked {
        kind: PieceKind,
        lines_cleared: u32,
        score_gained: u32,
    },
    #[serde(rename_all = "camelCase")]
    LevelUp { level: u32, fall_interval_ms: u32 },
    #[serde(rename_all = "camelCase")]
    LifeLost { lives_left: u32, cause: LifeLossCause },
    #[serde(rename_all = "camelCase")]
    GameOver { score: u32, level: u32, lines: u32 },
    Paused,
    Resumed,
    Reset,
}
