//! Win condition checking
//!
//! A game is won by five or more stones in a row running through the
//! most recently placed cell. A full board with no winner is a draw.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Fast five-in-a-row check through a specific position.
///
/// Only checks the 4 directions from the given position, stepping at
/// most 4 cells each way. No allocation.
#[inline]
pub fn has_five_from(board: &Board, pos: Pos, stone: Stone) -> bool {
    if stone == Stone::Empty {
        return false;
    }
    for &(dr, dc) in &DIRECTIONS {
        let mut count = 1;
        for i in 1..5 {
            let r = pos.row as i32 + dr * i;
            let c = pos.col as i32 + dc * i;
            if !board.in_bounds(r, c) || board.get(Pos::new(r as u8, c as u8)) != stone {
                break;
            }
            count += 1;
        }
        for i in 1..5 {
            let r = pos.row as i32 - dr * i;
            let c = pos.col as i32 - dc * i;
            if !board.in_bounds(r, c) || board.get(Pos::new(r as u8, c as u8)) != stone {
                break;
            }
            count += 1;
        }
        if count >= 5 {
            return true;
        }
    }
    false
}

/// Find the winning line through the last placed cell.
///
/// Extends outward from `last` in each direction, collecting the run of
/// same-colored stones in line order. Returns the first five positions
/// of the run (an overline yields its five cells nearest the negative
/// end), or `None` if no direction reaches five.
pub fn find_winning_line(board: &Board, last: Pos) -> Option<[Pos; 5]> {
    let stone = board.get(last);
    if stone == Stone::Empty {
        return None;
    }

    for &(dr, dc) in &DIRECTIONS {
        let mut line = vec![last];

        // Extend in negative direction first
        for i in 1..5 {
            let r = last.row as i32 - dr * i;
            let c = last.col as i32 - dc * i;
            if !board.in_bounds(r, c) {
                break;
            }
            let prev = Pos::new(r as u8, c as u8);
            if board.get(prev) == stone {
                line.insert(0, prev);
            } else {
                break;
            }
        }

        // Extend in positive direction
        for i in 1..5 {
            let r = last.row as i32 + dr * i;
            let c = last.col as i32 + dc * i;
            if !board.in_bounds(r, c) {
                break;
            }
            let next = Pos::new(r as u8, c as u8);
            if board.get(next) == stone {
                line.push(next);
            } else {
                break;
            }
        }

        if line.len() >= 5 {
            let mut five = [line[0]; 5];
            five.copy_from_slice(&line[..5]);
            return Some(five);
        }
    }
    None
}
