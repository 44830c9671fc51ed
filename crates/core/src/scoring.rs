//! Scoring module - line-clear points, leveling and fall speed
//!
//! - Each cleared line is worth `100 * level`.
//! - The level goes up once cumulative lines reach `level * 10`
//!   (at most one level per lock).
//! - The fall interval starts at 1000ms and drops 70ms per level above 1,
//!   never below 100ms.

use crate::types::{
    DROP_TIME_DECREASE_PER_LEVEL_MS, INITIAL_DROP_TIME_MS, LINES_PER_LEVEL, MIN_DROP_TIME_MS,
    POINTS_PER_LINE,
};

/// Points for clearing `lines` rows at `level`
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    lines.saturating_mul(POINTS_PER_LINE).saturating_mul(level)
}

/// Whether `total_lines` cleared so far earns a promotion from `level`
pub fn reaches_next_level(total_lines: u32, level: u32) -> bool {
    total_lines >= level.saturating_mul(LINES_PER_LEVEL)
}

/// Fall interval for a level (1-based)
///
/// `max(100, 1000 - (level - 1) * 70)`: on a level-up from `L` this is
/// `1000 - L * 70`.
pub fn fall_interval_for_level(level: u32) -> u32 {
    let decrease = level
        .saturating_sub(1)
        .saturating_mul(DROP_TIME_DECREASE_PER_LEVEL_MS);
    INITIAL_DROP_TIME_MS
        .saturating_sub(decrease)
        .max(MIN_DROP_TIME_MS)
}

/// Result of applying a line clear to the progression counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearResult {
    pub score_gained: u32,
    pub total_lines: u32,
    pub level: u32,
    pub leveled_up: bool,
}

/// Apply `cleared` lines at `level` with `total_lines` already cleared
pub fn apply_line_clear(cleared: u32, level: u32, total_lines: u32) -> ClearResult {
    if cleared == 0 {
        return ClearResult {
            score_gained: 0,
            total_lines,
            level,
            leveled_up: false,
        };
    }

    let total_lines = total_lines.saturating_add(cleared);
    let leveled_up = reaches_next_level(total_lines, level);
    ClearResult {
        score_gained: calculate_line_score(cleared, level),
        total_lines,
        level: if leveled_up { level + 1 } else { level },
        leveled_up,
    }
}
