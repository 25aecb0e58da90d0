//! Gravity module - turns elapsed time into forced downward moves

use crate::types::GRAVITY_MS;

/// Accumulates elapsed time against a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gravity {
    interval_ms: u32,
    elapsed_ms: u32,
}

impl Gravity {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0,
        }
    }

    /// Add `elapsed_ms` and report whether the piece should fall a row.
    ///
    /// Fires once the accumulated time is strictly greater than the interval,
    /// then starts counting from zero again (any excess is discarded).
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms > self.interval_ms {
            self.elapsed_ms = 0;
            return true;
        }
        false
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(GRAVITY_MS)
    }
}
