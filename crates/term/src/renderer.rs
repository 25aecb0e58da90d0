//! TerminalRenderer: owns the real terminal and presents framebuffers on it.
//!
//! Raw mode and the alternate screen are held between `enter` and `exit`.
//! Each frame is compared row by row with the one presented before it, and
//! only runs of changed cells are written.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen; `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.write_out()
    }

    /// Undo `enter`. Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        let written = self.write_out();
        terminal::disable_raw_mode()?;
        self.shown = None;
        written
    }

    /// Forget what is on screen, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Present `fb`, then hand back the previously shown frame in its place.
    ///
    /// The caller keeps rendering into the same framebuffer every frame, so
    /// two buffers alternate and nothing is allocated once sizes settle.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();
        let mut previous = match self.shown.take() {
            Some(prev) if same_size(&prev, fb) => {
                encode_diff_into(&prev, fb, &mut self.out)?;
                prev
            }
            _ => {
                encode_full_into(fb, &mut self.out)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.write_out()?;

        std::mem::swap(&mut previous, fb);
        self.shown = Some(previous);
        Ok(())
    }

    fn write_out(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Queues glyphs, emitting style changes only when the style differs from the
/// last one written.
struct Encoder<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Encoder<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn cells(&mut self, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            if self.style != Some(cell.style) {
                set_style(self.out, cell.style)?;
                self.style = Some(cell.style);
            }
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a clear screen followed by every cell of `fb`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut enc = Encoder::new(out);
    for (y, row) in rows(fb).enumerate() {
        enc.move_to(0, y as u16)?;
        enc.cells(row)?;
    }
    enc.finish()
}

/// Encode only the runs of cells that differ between `prev` and `next`.
///
/// Both frames must have the same size.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut enc = Encoder::new(out);
    for (y, (old, new)) in rows(prev).zip(rows(next)).enumerate() {
        for (start, end) in changed_runs(old, new) {
            enc.move_to(start as u16, y as u16)?;
            enc.cells(&new[start..end])?;
        }
    }
    enc.finish()
}

fn rows(fb: &FrameBuffer) -> impl Iterator<Item = &[Cell]> {
    let width = (fb.width() as usize).max(1);
    fb.cells().chunks(width)
}

/// Half-open column ranges where `old` and `new` differ, maximal and in order.
fn changed_runs<'a>(old: &'a [Cell], new: &'a [Cell]) -> impl Iterator<Item = (usize, usize)> + 'a {
    let len = old.len().min(new.len());
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < len && old[x] == new[x] {
            x += 1;
        }
        if x == len {
            return None;
        }
        let start = x;
        while x < len && old[x] != new[x] {
            x += 1;
        }
        Some((start, x))
    })
}

fn set_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(ch: char) -> Cell {
        CellStyle::default().into_cell(ch)
    }

    fn trailer() -> Vec<u8> {
        let mut out = Vec::new();
        out.queue(ResetColor).unwrap();
        out.queue(SetAttribute(Attribute::Reset)).unwrap();
        out
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let old = [glyph(' '); 8];
        let mut new = old;
        new[1] = glyph('X');
        new[2] = glyph('X');
        new[3] = glyph('X');
        new[7] = glyph('Y');

        let runs: Vec<_> = changed_runs(&old, &new).collect();
        assert_eq!(runs, vec![(1, 4), (7, 8)]);
    }

    #[test]
    fn identical_frames_encode_only_the_trailer() {
        let a = FrameBuffer::new(4, 2);
        let b = FrameBuffer::new(4, 2);
        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        assert_eq!(out, trailer());
    }

    #[test]
    fn diff_writes_only_changed_glyphs() {
        let a = FrameBuffer::new(6, 3);
        let mut b = a.clone();
        b.set(4, 2, glyph('Q'));

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('Q'));
        assert!(!text.contains(' '));
    }

    #[test]
    fn full_encode_contains_every_glyph() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set(0, 0, glyph('A'));
        fb.set(1, 1, glyph('D'));

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('A'));
        assert!(text.contains('D'));
    }

    #[test]
    fn empty_framebuffer_encodes_without_panicking() {
        let fb = FrameBuffer::new(0, 0);
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        encode_diff_into(&fb, &fb, &mut out).unwrap();
    }
}
