//! Shared data types and constants.
//!
//! Everything here is plain data with no external dependencies, so it can be
//! used from the engine, the terminal view and the input layer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Driver loop timestep (~60 FPS) |
//! | `GRAVITY_MS` | 500 | Time between forced downward moves |
//! | `GAME_OVER_FLASH_MS` | 200 | Duration of each phase of the game-over flash |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(ShapeKind::ALL[ShapeKind::I.index()], ShapeKind::I);
//! assert_eq!(GameAction::SoftDrop.offset(), Some((0, 1)));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep of the driver loop in milliseconds
pub const TICK_MS: u32 = 16;

/// Gravity interval: the active piece is pushed down one row once this much
/// time has accumulated.
pub const GRAVITY_MS: u32 = 500;

/// Points awarded per cleared line
pub const LINE_CLEAR_POINTS: u32 = 10;

/// Number of red/black cycles shown when the game ends
pub const GAME_OVER_FLASHES: u32 = 5;

/// Duration of one phase (red or black) of the game-over flash
pub const GAME_OVER_FLASH_MS: u32 = 200;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Cell on the board (None = empty, Some = frozen block of that color)
pub type Cell = Option<Rgb>;

/// The seven tetromino shapes, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    T,
    S,
    Z,
    I,
    O,
    L,
    J,
}

impl ShapeKind {
    /// All kinds in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::L,
        ShapeKind::J,
    ];

    /// Position of this kind in [`ShapeKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            ShapeKind::T => 0,
            ShapeKind::S => 1,
            ShapeKind::Z => 2,
            ShapeKind::I => 3,
            ShapeKind::O => 4,
            ShapeKind::L => 5,
            ShapeKind::J => 6,
        }
    }
}

/// Game actions.
///
/// These are the only commands the player can issue; there is no hold,
/// hard drop or pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

impl GameAction {
    /// Board offset `(dx, dy)` for translating actions; `None` for rotation.
    pub fn offset(&self) -> Option<(i8, i8)> {
        match self {
            GameAction::MoveLeft => Some((-1, 0)),
            GameAction::MoveRight => Some((1, 0)),
            GameAction::SoftDrop => Some((0, 1)),
            GameAction::Rotate => None,
        }
    }
}
