//! Window scores for Gomoku evaluation
//!
//! These constants define the scoring weights for 5-cell windows,
//! keyed by how many stones of one color the window holds and whether
//! the run can still extend past the window ends.

/// Per-window scores for evaluation
pub struct WindowScore;

impl WindowScore {
    /// Five in a window - won position
    pub const FIVE: i32 = 100_000;
    /// Four with room to extend beyond the window (_OOOO_)
    pub const OPEN_FOUR: i32 = 10_000;
    /// Four with both extension cells blocked or off-board
    pub const CLOSED_FOUR: i32 = 8_000;
    /// Three with an open extension
    pub const OPEN_THREE: i32 = 1_000;
    /// Three boxed in on both sides
    pub const CLOSED_THREE: i32 = 800;
    /// Two with three empties, room to grow
    pub const TWO: i32 = 100;
}

/// Reward for a window holding `count` stones of a single color.
///
/// `open` means at least one cell just beyond the window ends is on
/// the board and empty. Counts of 0 or 1 carry no signal and score 0.
#[inline]
pub fn window_reward(count: u8, open: bool) -> i32 {
    match count {
        5 => WindowScore::FIVE,
        4 if open => WindowScore::OPEN_FOUR,
        4 => WindowScore::CLOSED_FOUR,
        3 if open => WindowScore::OPEN_THREE,
        3 => WindowScore::CLOSED_THREE,
        2 => WindowScore::TWO,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_score_hierarchy() {
        // Verify score hierarchy makes sense
        assert!(WindowScore::FIVE > WindowScore::OPEN_FOUR);
        assert!(WindowScore::OPEN_FOUR > WindowScore::CLOSED_FOUR);
        assert!(WindowScore::CLOSED_FOUR > WindowScore::OPEN_THREE);
        assert!(WindowScore::OPEN_THREE > WindowScore::CLOSED_THREE);
        assert!(WindowScore::CLOSED_THREE > WindowScore::TWO);
        assert!(WindowScore::TWO > 0);
    }

    #[test]
    fn test_reward_mapping() {
        assert_eq!(window_reward(5, false), WindowScore::FIVE, "A five wins regardless of openness");
        assert_eq!(window_reward(4, true), WindowScore::OPEN_FOUR);
        assert_eq!(window_reward(4, false), WindowScore::CLOSED_FOUR);
        assert_eq!(window_reward(3, true), WindowScore::OPEN_THREE);
        assert_eq!(window_reward(3, false), WindowScore::CLOSED_THREE);
        assert_eq!(window_reward(2, true), WindowScore::TWO);
        assert_eq!(window_reward(2, false), WindowScore::TWO);
    }

    #[test]
    fn test_low_counts_score_zero() {
        assert_eq!(window_reward(0, true), 0);
        assert_eq!(window_reward(1, true), 0, "A lone stone carries no line signal");
        assert_eq!(window_reward(1, false), 0);
    }
}
