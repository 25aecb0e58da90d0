//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the board/piece engine of the falling-block game. It has
//! no dependency on terminals, clocks or files:
//!
//! - **Deterministic**: randomness comes in through [`Randomizer`], so the same
//!   seed replays the same game
//! - **Injectable persistence**: the high score is read and written through
//!   [`HighScoreStore`]
//! - **Render-agnostic**: drivers read a [`GameSnapshot`] and draw it however
//!   they like
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, placement checks and line compaction
//! - [`pieces`]: shape matrices, rotation, shape and color catalogs
//! - [`game_state`]: the engine (move, rotate, freeze, line clear, spawn)
//! - [`gravity`]: elapsed-time accumulator for the forced downward move
//! - [`rng`]: random sources for piece draws
//! - [`scoring`]: points per cleared line
//! - [`snapshot`]: read-only view for renderers
//! - [`store`]: high-score persistence interface
//!
//! # Rules
//!
//! - Pieces spawn horizontally centered on row 0, shape and color drawn
//!   independently and uniformly
//! - Rotation is clockwise about the shape origin and is rejected outright when
//!   it collides (no wall kicks)
//! - A downward move that is blocked freezes the piece; sideways blocks do nothing
//! - Each cleared line scores 10
//! - The game ends when a freshly spawned piece does not fit
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, MemoryStore, SimpleRng};
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(SimpleRng::new(12345), MemoryStore::new());
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.tick(16);
//!
//! assert!(!game.game_over());
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod game_state;
pub mod gravity;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod store;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Grid};
pub use game_state::{GameState, MoveOutcome, Piece};
pub use gravity::Gravity;
pub use pieces::{get_shape, Shape, COLORS, SHAPES};
pub use rng::{Randomizer, ScriptedRng, SimpleRng};
pub use scoring::line_clear_score;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use store::{HighScoreStore, MemoryStore, StoreError};
