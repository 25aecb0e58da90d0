//! Terminal input module.
//!
//! Maps `crossterm` key events onto the four [`crate::types::GameAction`]s
//! and recognizes the quit keys. Each key press is one discrete action; there
//! is no auto-repeat handling.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
