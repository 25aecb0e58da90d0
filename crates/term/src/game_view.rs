//! GameView: draws a `core::GameSnapshot` into a framebuffer.
//!
//! No I/O happens here, so every frame can be checked in tests.
//!
//! Screen layout, left to right: the bordered well (each board cell is
//! `cell_w x cell_h` characters) and, when the terminal is wide enough, a
//! panel with the score and the high score.

use crate::core::{ActiveSnapshot, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(0, 0, 0);
const GRID_FG: Rgb = Rgb::new(50, 50, 50);
const BORDER_FG: Rgb = Rgb::new(255, 255, 255);
const TEXT_FG: Rgb = Rgb::new(200, 200, 200);
const GAME_OVER_FG: Rgb = Rgb::new(200, 0, 0);

const BLOCK: char = '█';
const GRID_DOT: char = '·';

/// Columns the panel needs to the right of the well
const PANEL_MIN_W: u16 = 10;
/// Gap between the well border and the panel
const PANEL_GAP: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Viewport { width, height }
    }
}

/// Vertical placement of the well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where things land on screen for one viewport.
#[derive(Debug, Clone, Copy)]
struct Layout {
    /// Top-left corner of the border
    left: u16,
    top: u16,
    /// Border size, including the border itself
    outer_w: u16,
    outer_h: u16,
    /// Panel column, if there is room for it
    panel_x: Option<u16>,
}

impl Layout {
    fn inner_left(&self) -> u16 {
        self.left.saturating_add(1)
    }

    fn inner_top(&self) -> u16 {
        self.top.saturating_add(1)
    }
}

pub struct GameView {
    cell_w: u16,
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    /// Two columns per cell so blocks look roughly square.
    fn default() -> Self {
        GameView::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        GameView {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(self, anchor_y: AnchorY) -> Self {
        GameView { anchor_y, ..self }
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let outer_w = (BOARD_WIDTH as u16 * self.cell_w).saturating_add(2);
        let outer_h = (BOARD_HEIGHT as u16 * self.cell_h).saturating_add(2);

        let left = viewport.width.saturating_sub(outer_w) / 2;
        let top = match self.anchor_y {
            AnchorY::Top => 0,
            AnchorY::Center => viewport.height.saturating_sub(outer_h) / 2,
        };

        let panel = left.saturating_add(outer_w).saturating_add(PANEL_GAP);
        let panel_x = (viewport.width.saturating_sub(panel) >= PANEL_MIN_W).then_some(panel);

        Layout {
            left,
            top,
            outer_w,
            outer_h,
            panel_x,
        }
    }

    /// Draw `snap` into `fb`, resizing it to `viewport` first.
    ///
    /// Reusing one framebuffer across frames keeps rendering allocation-free.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(viewport);
        self.draw_well(fb, &layout, snap);

        if let Some(active) = &snap.active {
            self.draw_active(fb, &layout, active);
        }
        if let Some(x) = layout.panel_x {
            draw_panel(fb, x, layout.top, snap);
        }
        if snap.game_over {
            draw_game_over(fb, &layout);
        }
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// One phase of the game-over flash: solid red when `lit`, black otherwise.
    pub fn render_flash_into(&self, viewport: Viewport, lit: bool, fb: &mut FrameBuffer) {
        let color = if lit { GAME_OVER_FG } else { WELL_BG };
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(color, color).into_cell(' '));
    }

    pub fn render_flash(&self, viewport: Viewport, lit: bool) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_flash_into(viewport, lit, &mut fb);
        fb
    }

    fn draw_well(&self, fb: &mut FrameBuffer, layout: &Layout, snap: &GameSnapshot) {
        draw_frame(fb, layout, CellStyle::new(BORDER_FG, WELL_BG));

        let empty = CellStyle {
            dim: true,
            ..CellStyle::new(GRID_FG, WELL_BG)
        };
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match *cell {
                    Some(color) => self.paint_cell(fb, layout, x, y, BLOCK, block_style(color)),
                    None => self.paint_cell(fb, layout, x, y, GRID_DOT, empty),
                }
            }
        }
    }

    fn draw_active(&self, fb: &mut FrameBuffer, layout: &Layout, active: &ActiveSnapshot) {
        let style = block_style(active.color);
        for (x, y) in active.cells() {
            // Rows above the top edge are not drawn.
            if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                self.paint_cell(fb, layout, x as u16, y as u16, BLOCK, style);
            }
        }
    }

    /// Fill the screen area of board cell `(x, y)`.
    fn paint_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        x: u16,
        y: u16,
        ch: char,
        style: CellStyle,
    ) {
        fb.fill_rect(
            layout.inner_left().saturating_add(x * self.cell_w),
            layout.inner_top().saturating_add(y * self.cell_h),
            self.cell_w,
            self.cell_h,
            ch,
            style,
        );
    }
}

fn block_style(color: Rgb) -> CellStyle {
    CellStyle {
        bold: true,
        ..CellStyle::new(color, WELL_BG)
    }
}

fn draw_frame(fb: &mut FrameBuffer, layout: &Layout, style: CellStyle) {
    let (x0, y0) = (layout.left, layout.top);
    let (w, h) = (layout.outer_w, layout.outer_h);
    if w < 2 || h < 2 {
        return;
    }
    let (x1, y1) = (x0.saturating_add(w - 1), y0.saturating_add(h - 1));

    fb.fill_rect(x0 + 1, y0, w - 2, 1, '─', style);
    fb.fill_rect(x0 + 1, y1, w - 2, 1, '─', style);
    fb.fill_rect(x0, y0 + 1, 1, h - 2, '│', style);
    fb.fill_rect(x1, y0 + 1, 1, h - 2, '│', style);

    for (x, y, corner) in [(x0, y0, '┌'), (x1, y0, '┐'), (x0, y1, '└'), (x1, y1, '┘')] {
        fb.put_char(x, y, corner, style);
    }
}

fn draw_panel(fb: &mut FrameBuffer, x: u16, top: u16, snap: &GameSnapshot) {
    let label = CellStyle {
        bold: true,
        ..CellStyle::default()
    };
    let value = CellStyle::new(TEXT_FG, WELL_BG);

    for (row, (name, amount)) in [("SCORE", snap.score), ("HIGH SCORE", snap.high_score)]
        .into_iter()
        .enumerate()
    {
        let y = top.saturating_add(row as u16 * 3);
        fb.put_str(x, y, name, label);
        fb.put_u32(x, y.saturating_add(1), amount, value);
    }
}

fn draw_game_over(fb: &mut FrameBuffer, layout: &Layout) {
    const TEXT: &str = "GAME OVER";
    let style = CellStyle {
        bold: true,
        ..CellStyle::new(GAME_OVER_FG, WELL_BG)
    };
    let x = layout
        .left
        .saturating_add(layout.outer_w.saturating_sub(TEXT.len() as u16) / 2);
    let y = layout.top.saturating_add(layout.outer_h / 2);
    fb.put_str(x, y, TEXT, style);
}
