//! Candidate move generation
//!
//! Tactically relevant moves cluster near existing stones, so the
//! candidate set is the empty cells within a small Chebyshev radius of
//! any occupied cell. This keeps the branching factor bounded on every
//! board size. Oversized sets are capped either by uniform sampling
//! (fast modes) or by a 1-ply create/block ordering that improves
//! alpha-beta cutoffs.

use std::cmp::Reverse;

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Most candidates a single search node will consider
pub const CANDIDATE_CAP: usize = 25;

/// Weights indexed by the run length a placement would complete
const RUN_WEIGHTS: [i32; 6] = [0, 0, 40, 400, 4_000, 40_000];

/// Weights indexed by the opponent run length a placement would interrupt
const BLOCK_WEIGHTS: [i32; 6] = [0, 0, 20, 200, 2_000, 20_000];

/// Collect candidate moves: empty cells within `radius` of any stone.
///
/// An empty board yields only the center (deterministic opening). If
/// the whole neighborhood is taken the remaining empty cells are used,
/// and a full board yields an empty set.
pub fn candidates(board: &Board, radius: i32) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![board.center()];
    }

    let size = board.size();
    let mut seen = vec![false; size * size];
    let mut moves = Vec::new();

    for pos in board.occupied() {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                let r = pos.row as i32 + dr;
                let c = pos.col as i32 + dc;
                if !board.in_bounds(r, c) {
                    continue;
                }
                let near = Pos::new(r as u8, c as u8);
                let idx = near.to_index(size);
                if seen[idx] || !board.is_empty(near) {
                    continue;
                }
                seen[idx] = true;
                moves.push(near);
            }
        }
    }

    if moves.is_empty() {
        moves = all_empty_cells(board);
    }
    moves
}

fn all_empty_cells(board: &Board) -> Vec<Pos> {
    let size = board.size() as u8;
    let mut moves = Vec::new();
    for row in 0..size {
        for col in 0..size {
            let pos = Pos::new(row, col);
            if board.is_empty(pos) {
                moves.push(pos);
            }
        }
    }
    moves
}

/// Cap `moves` by a partial Fisher-Yates shuffle: each kept slot is
/// drawn uniformly from the remainder, so the surviving subset is an
/// unbiased sample.
pub fn sample_candidates(moves: &mut Vec<Pos>, cap: usize) {
    if moves.len() <= cap {
        return;
    }
    for i in 0..cap {
        let j = i + fastrand::usize(..moves.len() - i);
        moves.swap(i, j);
    }
    moves.truncate(cap);
}

/// Order `moves` strongest-first by `placement_score`, then cap.
///
/// Ordering only affects pruning efficiency; ties keep their generator
/// order, which fixes the tie-break the search relies on.
pub fn order_candidates(
    board: &Board,
    moves: &mut Vec<Pos>,
    cap: usize,
    for_stone: Stone,
    against_stone: Stone,
) {
    moves.sort_by_key(|&pos| Reverse(placement_score(board, pos, for_stone, against_stone)));
    moves.truncate(cap);
}

/// Fast 1-ply score of placing `for_stone` at `pos`: per direction, the
/// run the placement would complete plus the opponent run it would
/// interrupt. Completing a run always outweighs blocking the same run.
pub fn placement_score(board: &Board, pos: Pos, for_stone: Stone, against_stone: Stone) -> i32 {
    let mut score = 0;
    for &(dr, dc) in &DIRECTIONS {
        let own = 1 + run_through(board, pos, dr, dc, for_stone);
        let theirs = 1 + run_through(board, pos, dr, dc, against_stone);
        score += RUN_WEIGHTS[own.min(5)] + BLOCK_WEIGHTS[theirs.min(5)];
    }
    score
}

/// Count same-colored stones adjacent to `pos` along both ways of one
/// direction, stopping at the first gap.
fn run_through(board: &Board, pos: Pos, dr: i32, dc: i32, stone: Stone) -> usize {
    let mut count = 0;
    for sign in [1i32, -1] {
        for i in 1..5 {
            let r = pos.row as i32 + dr * i * sign;
            let c = pos.col as i32 + dc * i * sign;
            if !board.in_bounds(r, c) || board.get(Pos::new(r as u8, c as u8)) != stone {
                break;
            }
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_opens_at_center() {
        let board = Board::new(15);
        assert_eq!(candidates(&board, 2), vec![Pos::new(7, 7)]);

        let board = Board::new(9);
        assert_eq!(candidates(&board, 2), vec![Pos::new(4, 4)]);
    }

    #[test]
    fn test_neighborhood_counts() {
        let mut board = Board::new(15);
        board.place_stone(Pos::new(7, 7), Stone::Black);

        assert_eq!(candidates(&board, 1).len(), 8, "Radius 1 around one stone is the 3x3 ring");
        assert_eq!(candidates(&board, 2).len(), 24, "Radius 2 around one stone is the 5x5 ring");
    }

    #[test]
    fn test_neighborhood_clips_at_corner() {
        let mut board = Board::new(15);
        board.place_stone(Pos::new(0, 0), Stone::Black);
        assert_eq!(candidates(&board, 2).len(), 8, "Corner neighborhood is a 3x3 block minus the stone");
    }

    #[test]
    fn test_candidates_never_occupied() {
        let mut board = Board::new(15);
        for c in 5..9u8 {
            board.place_stone(Pos::new(7, c), Stone::Black);
            board.place_stone(Pos::new(8, c), Stone::White);
        }
        for pos in candidates(&board, 2) {
            assert!(board.is_empty(pos), "Candidate {:?} is occupied", pos);
        }
    }

    #[test]
    fn test_full_board_has_no_candidates() {
        let mut board = Board::new(9);
        for r in 0..9u8 {
            for c in 0..9u8 {
                board.place_stone(Pos::new(r, c), Stone::Black);
            }
        }
        assert!(candidates(&board, 2).is_empty());
    }

    #[test]
    fn test_sampling_caps_without_bias_artifacts() {
        fastrand::seed(42);
        let mut board = Board::new(19);
        for i in 0..6u8 {
            board.place_stone(Pos::new(4 + i, 4 + i), Stone::Black);
        }
        let full = candidates(&board, 2);
        assert!(full.len() > CANDIDATE_CAP);

        let mut sampled = full.clone();
        sample_candidates(&mut sampled, CANDIDATE_CAP);
        assert_eq!(sampled.len(), CANDIDATE_CAP);

        let mut unique = sampled.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), CANDIDATE_CAP, "Sampling must not duplicate cells");
        for pos in &sampled {
            assert!(full.contains(pos), "Sampled {:?} was not a candidate", pos);
        }
    }

    #[test]
    fn test_sampling_keeps_small_sets_intact() {
        let mut moves = vec![Pos::new(1, 1), Pos::new(2, 2)];
        sample_candidates(&mut moves, CANDIDATE_CAP);
        assert_eq!(moves, vec![Pos::new(1, 1), Pos::new(2, 2)]);
    }

    #[test]
    fn test_ordering_puts_open_four_block_first() {
        let mut board = Board::new(15);
        for c in 3..7u8 {
            board.place_stone(Pos::new(7, c), Stone::White);
        }
        // Black has a token stone so its own runs stay trivial
        board.place_stone(Pos::new(0, 0), Stone::Black);

        let mut moves = candidates(&board, 2);
        order_candidates(&board, &mut moves, CANDIDATE_CAP, Stone::Black, Stone::White);

        let first = moves[0];
        assert!(
            first == Pos::new(7, 2) || first == Pos::new(7, 7),
            "Blocking the open four should rank first, got {:?}",
            first
        );
    }

    #[test]
    fn test_completing_a_win_outranks_blocking_one() {
        let mut board = Board::new(15);
        for c in 3..7u8 {
            board.place_stone(Pos::new(5, c), Stone::Black);
            board.place_stone(Pos::new(9, c), Stone::White);
        }
        let win_cell = Pos::new(5, 7);
        let block_cell = Pos::new(9, 7);
        assert!(
            placement_score(&board, win_cell, Stone::Black, Stone::White)
                > placement_score(&board, block_cell, Stone::Black, Stone::White),
            "Completing five must outscore blocking the opponent's five"
        );
    }
}
