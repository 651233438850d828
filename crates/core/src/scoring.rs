//! Scoring module - line clear points, level brackets and gravity speed-up
//!
//! - 1/2/3/4 lines award 40/100/300/1200 points times the current level.
//!   Five or more simultaneous lines use the four-line value.
//! - The level bracket is `lines / lines_per_level`; crossing into a higher
//!   bracket sets the level to `bracket + 1`.
//! - Every level-up multiplies the fall interval by a fixed decay factor.

use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows at `level` (levels start at 1)
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let base = LINE_SCORES[lines.min(LINE_SCORES.len()) - 1];
    base.saturating_mul(level)
}

/// Level reached after `total_lines`
pub fn level_for_lines(total_lines: u32, lines_per_level: u32) -> u32 {
    total_lines / lines_per_level + 1
}

/// New level if going from `old_lines` to `new_lines` crosses a bracket
pub fn level_up(old_lines: u32, new_lines: u32, lines_per_level: u32) -> Option<u32> {
    let prior_bracket = old_lines / lines_per_level;
    let new_bracket = new_lines / lines_per_level;
    (new_bracket > prior_bracket).then_some(new_bracket + 1)
}

/// Fall interval after one level-up, clamped at `floor_ms` when one is set
pub fn next_fall_interval(current_ms: f64, decay: f64, floor_ms: Option<f64>) -> f64 {
    let next = current_ms * decay;
    match floor_ms {
        Some(floor) => next.max(floor),
        None => next,
    }
}
