//! Scoring module - points for cleared lines
//!
//! Every cleared line is worth a flat [`LINE_CLEAR_POINTS`]; clearing several
//! at once earns no bonus.

use crate::types::LINE_CLEAR_POINTS;

/// Points for clearing `lines` rows with a single freeze
pub fn line_clear_score(lines: usize) -> u32 {
    (lines as u32).saturating_mul(LINE_CLEAR_POINTS)
}

/// Whether `score` beats the best one seen so far
pub fn is_new_high_score(score: u32, high_score: u32) -> bool {
    score > high_score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_score() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 10);
        assert_eq!(line_clear_score(2), 20);
        assert_eq!(line_clear_score(4), 40);
    }

    #[test]
    fn test_new_high_score_is_strict() {
        assert!(is_new_high_score(10, 0));
        assert!(!is_new_high_score(10, 10));
        assert!(!is_new_high_score(0, 0));
    }
}
