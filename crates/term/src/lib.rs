//! Terminal presentation for the game.
//!
//! Renders [`core::GameSnapshot`]s into a framebuffer of styled characters and
//! flushes that framebuffer to the terminal. The engine never sees any of it.
//!
//! - [`fb`]: framebuffer and cell styles
//! - [`game_view`]: snapshot to framebuffer (pure, testable)
//! - [`renderer`]: framebuffer to terminal, diffing against the last frame

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
