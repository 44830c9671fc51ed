//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has no
//! dependencies on timers, terminals or I/O: the caller feeds it inputs and
//! elapsed time, and reads back snapshots.
//!
//! # Module Structure
//!
//! - [`board`]: Grid store with piece merging and full-row removal
//! - [`pieces`]: Tetromino catalog and the 4x4 shape matrix
//! - [`rotation`]: Matrix rotation and the horizontal wall-kick search
//! - [`collision`]: Shape-versus-board overlap test
//! - [`rng`]: Uniform random piece generation
//! - [`scoring`]: Line-clear points, leveling and fall speed
//! - [`scheduler`]: Deterministic automatic-fall timer
//! - [`game_state`]: The progression controller tying it all together
//! - [`snapshot`]: Owned, serializable view of a game for shells
//!
//! # Game Rules
//!
//! - Pieces are drawn uniformly at random, one piece of lookahead
//! - Rotation kicks only sideways, never up or down
//! - A piece locks as soon as it cannot descend (no lock delay)
//! - A piece resting against the top costs a life; three lives per game
//! - Each cleared line scores `100 * level`; every 10 lines is a level
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameState};
//! use blockfall_core::types::GameAction;
//!
//! let mut game = GameState::new(GameConfig::default());
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.board().locked_count(), 4);
//! assert_eq!(game.lives(), 3);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::advance`](game_state::GameState::advance) with elapsed
//! milliseconds; it runs one fall step per elapsed interval. The interval is
//! 1000ms at level 1 and 70ms shorter per level, down to 100ms.

pub mod board;
pub mod collision;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, GridError};
pub use collision::collides;
pub use game_state::{ActivePiece, ConfigError, GameConfig, GameState, Phase};
pub use pieces::{catalog_color, catalog_shape, tetromino, Piece, Shape};
pub use rng::{PieceGenerator, SimpleRng};
pub use rotation::{kick_rotate, rotate};
pub use scheduler::TickScheduler;
pub use scoring::{apply_line_clear, calculate_line_score, fall_interval_for_level, ClearResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot, PieceSnapshot};
