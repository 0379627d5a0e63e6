//! Heuristic evaluation function for Gomoku board positions
//!
//! The board is scored window by window: every run of 5 consecutive
//! cells (in each of the 4 line directions) contributes according to
//! how many stones of a single color it holds. Windows containing both
//! colors are dead lines and contribute nothing.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

use super::patterns::window_reward;

/// Evaluate the board from the perspective of `for_stone`.
///
/// Returns a score where:
/// - Positive values indicate advantage for `for_stone`
/// - Negative values indicate advantage for `against_stone`
/// - `WindowScore::FIVE` (or above) indicates a won position
///
/// Windows of the opposing color contribute the same rewards negated,
/// so `evaluate(b, a, b_stone) == -evaluate(b, b_stone, a)` always.
///
/// # Arguments
/// * `board` - The current board state
/// * `for_stone` - The color to evaluate for
/// * `against_stone` - The opposing color
#[must_use]
pub fn evaluate(board: &Board, for_stone: Stone, against_stone: Stone) -> i32 {
    debug_assert!(for_stone != Stone::Empty && against_stone != Stone::Empty);

    let size = board.size() as i32;
    let mut score = 0;

    for row in 0..size {
        for col in 0..size {
            for &(dr, dc) in &DIRECTIONS {
                score += window_score(board, row, col, dr, dc, for_stone, against_stone);
            }
        }
    }
    score
}

/// Score the 5-cell window starting at (row, col) along (dr, dc).
fn window_score(
    board: &Board,
    row: i32,
    col: i32,
    dr: i32,
    dc: i32,
    for_stone: Stone,
    against_stone: Stone,
) -> i32 {
    // Windows that run off the board score 0
    if !board.in_bounds(row + dr * 4, col + dc * 4) {
        return 0;
    }

    let mut for_count = 0u8;
    let mut against_count = 0u8;
    for i in 0..5 {
        let cell = board.get(Pos::new((row + dr * i) as u8, (col + dc * i) as u8));
        if cell == for_stone {
            for_count += 1;
        } else if cell == against_stone {
            against_count += 1;
        }
    }

    // Both colors present: nobody completes five through here
    if for_count > 0 && against_count > 0 {
        return 0;
    }
    if for_count == 0 && against_count == 0 {
        return 0;
    }

    let open = window_is_open(board, row, col, dr, dc);
    if for_count > 0 {
        window_reward(for_count, open)
    } else {
        -window_reward(against_count, open)
    }
}

/// A window is open when a cell just beyond either of its ends is on
/// the board and empty, so the run inside can still grow past it.
#[inline]
fn window_is_open(board: &Board, row: i32, col: i32, dr: i32, dc: i32) -> bool {
    let (br, bc) = (row - dr, col - dc);
    if board.in_bounds(br, bc) && board.get(Pos::new(br as u8, bc as u8)) == Stone::Empty {
        return true;
    }
    let (ar, ac) = (row + dr * 5, col + dc * 5);
    board.in_bounds(ar, ac) && board.get(Pos::new(ar as u8, ac as u8)) == Stone::Empty
}
