//! Game state module - the board/piece engine
//!
//! Owns the grid, the falling piece, the score and the high score. It is
//! driven from outside by gravity ticks, move requests and rotate requests,
//! all of which run to completion before the next one is processed.
//!
//! Legality of every placement goes through [`GameState::can_move`]. A move
//! that is blocked on the way down freezes the piece; blocked sideways or
//! upward moves do nothing.

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::gravity::Gravity;
use crate::pieces::{get_shape, spawn_column, Shape, COLORS};
use crate::rng::{Randomizer, SimpleRng};
use crate::scoring::{is_new_high_score, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::store::{HighScoreStore, MemoryStore};
use crate::types::{GameAction, Rgb, ShapeKind, BOARD_WIDTH};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    /// Current orientation; rotation replaces it with a new matrix.
    pub shape: Shape,
    pub color: Rgb,
    /// Column of the shape's top-left corner
    pub x: i8,
    /// Row of the shape's top-left corner
    pub y: i8,
}

impl Piece {
    /// Create a piece in spawn orientation, horizontally centered on row 0
    pub fn new(kind: ShapeKind, color: Rgb) -> Self {
        let shape = *get_shape(kind);
        Self {
            kind,
            shape,
            color,
            x: spawn_column(&shape, BOARD_WIDTH),
            y: 0,
        }
    }

    /// Board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Result of [`GameState::move_piece`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece was translated.
    Moved,
    /// The move was illegal and nothing changed.
    Blocked,
    /// A downward move was illegal; the piece froze and a new one spawned.
    Froze,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng, S = MemoryStore> {
    board: Board,
    active: Piece,
    score: u32,
    high_score: u32,
    game_over: bool,
    gravity: Gravity,
    rng: R,
    store: S,
}

impl GameState {
    /// Headless game with a seeded generator and an empty in-memory store
    pub fn with_seed(seed: u32) -> Self {
        GameState::new(SimpleRng::new(seed), MemoryStore::new())
    }
}

impl<R: Randomizer, S: HighScoreStore> GameState<R, S> {
    /// Start a new game: empty board, high score read from `store`, first
    /// piece drawn from `rng`.
    pub fn new(mut rng: R, store: S) -> Self {
        let high_score = store.load();
        let active = draw_piece(&mut rng);

        let mut state = Self {
            board: Board::new(),
            active,
            score: 0,
            high_score,
            game_over: false,
            gravity: Gravity::default(),
            rng,
            store,
        };
        state.check_spawn();

        debug!(high_score, kind = ?active.kind, "new game");
        state
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = if self.game_over {
            None
        } else {
            Some(ActiveSnapshot::from(self.active))
        };
        out.score = self.score;
        out.high_score = self.high_score;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Whether the active piece, or `shape` in its place, fits after an offset.
    ///
    /// Pure query. Filled cells must stay within the side walls and above the
    /// floor; cells still above the top edge never collide.
    pub fn can_move(&self, dx: i8, dy: i8, shape: Option<&Shape>) -> bool {
        let shape = shape.unwrap_or(&self.active.shape);
        let (Some(x), Some(y)) = (self.active.x.checked_add(dx), self.active.y.checked_add(dy))
        else {
            return false;
        };
        self.board.can_place(shape, x, y)
    }

    /// Translate the active piece, freezing it if a downward move is blocked.
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> MoveOutcome {
        if self.can_move(dx, dy, None) {
            self.active.x += dx;
            self.active.y += dy;
            MoveOutcome::Moved
        } else if dy > 0 {
            self.freeze();
            MoveOutcome::Froze
        } else {
            MoveOutcome::Blocked
        }
    }

    /// Rotate the active piece clockwise about its origin.
    ///
    /// Rejected without any offset search when the rotated shape does not fit.
    pub fn rotate_shape(&mut self) -> bool {
        let rotated = self.active.shape.rotated();
        if !self.can_move(0, 0, Some(&rotated)) {
            return false;
        }
        self.active.shape = rotated;
        true
    }

    /// Advance the gravity clock, pushing the piece down a row when it fires.
    ///
    /// Returns true if gravity fired. Does nothing once the game is over.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over {
            return false;
        }
        if !self.gravity.advance(elapsed_ms) {
            return false;
        }
        self.move_piece(0, 1);
        true
    }

    /// Apply a player action. Ignored once the game is over.
    ///
    /// Returns true if the game state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over {
            return false;
        }
        match action.offset() {
            Some((dx, dy)) => self.move_piece(dx, dy) != MoveOutcome::Blocked,
            None => self.rotate_shape(),
        }
    }

    /// Commit the active piece into the grid, clear lines and spawn the next.
    fn freeze(&mut self) {
        let piece = self.active;
        let dropped = self
            .board
            .stamp(&piece.shape, piece.x, piece.y, piece.color);
        if dropped > 0 {
            // The game does not end here; only a blocked spawn ends it.
            debug!(dropped, "cells above the board discarded on freeze");
        }

        let cleared = self.clear_lines();
        debug!(
            kind = ?piece.kind,
            x = piece.x,
            y = piece.y,
            cleared,
            score = self.score,
            "piece frozen"
        );

        self.spawn_piece();
    }

    /// Remove full rows and score them. Returns the number of rows removed.
    fn clear_lines(&mut self) -> usize {
        let cleared = self.board.clear_full_rows().len();
        self.score = self.score.saturating_add(line_clear_score(cleared));

        if is_new_high_score(self.score, self.high_score) {
            self.high_score = self.score;
            info!(high_score = self.high_score, "new high score");
            if let Err(err) = self.store.save(self.high_score) {
                warn!(error = %err, "failed to persist high score");
            }
        }

        cleared
    }

    /// Draw a new piece; the game ends if it does not fit where it spawns.
    fn spawn_piece(&mut self) {
        self.active = draw_piece(&mut self.rng);
        self.check_spawn();
    }

    fn check_spawn(&mut self) {
        if !self.can_move(0, 0, None) {
            self.game_over = true;
            info!(score = self.score, high_score = self.high_score, "game over");
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

/// Draw shape then color, independently and uniformly.
fn draw_piece<R: Randomizer>(rng: &mut R) -> Piece {
    let kind = ShapeKind::ALL[rng.next_index(ShapeKind::ALL.len())];
    let color = COLORS[rng.next_index(COLORS.len())];
    Piece::new(kind, color)
}
