//! Fixed-depth minimax with alpha-beta pruning
//!
//! The classic max/min formulation: the AI maximizes, the opponent
//! minimizes, and a branch is abandoned once beta falls to alpha.
//! Leaves are scored by the window evaluator; wins found during
//! recursion short-circuit with a terminal score.

use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate, WindowScore};
use crate::movegen::{self, CANDIDATE_CAP};
use crate::rules::has_five_from;

/// Bound safely outside every reachable evaluation
pub const INF: i32 = i32::MAX / 2;

/// Score of a decided game found during recursion
pub const WIN_SCORE: i32 = WindowScore::FIVE;

/// Search result containing the chosen move and counters.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, `None` only when the board has no legal move
    pub best_move: Option<Pos>,
    /// Minimax value of the best move
    pub score: i32,
    /// Total nodes visited
    pub nodes: u64,
}

/// One-shot minimax searcher.
///
/// Depth fixes the policy knobs: deep searches shrink the candidate
/// neighborhood and order candidates for pruning, shallow ones keep the
/// wider neighborhood and cap it by uniform sampling.
pub struct Searcher {
    depth: u32,
    radius: i32,
    ordered: bool,
    nodes: u64,
}

impl Searcher {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            radius: if depth >= 3 { 1 } else { 2 },
            ordered: depth >= 3,
            nodes: 0,
        }
    }

    /// Search the position and return the best root move.
    ///
    /// Each root candidate is played on a scratch board and scored by
    /// the opponent's best reply line; ties keep the first-encountered
    /// candidate in generator order.
    pub fn search(&mut self, board: &Board, ai_stone: Stone, opponent_stone: Stone) -> SearchResult {
        self.nodes = 0;

        let mut work = board.clone();
        let mut moves = self.candidate_moves(&work, ai_stone, opponent_stone);
        if moves.is_empty() {
            return SearchResult {
                best_move: None,
                score: 0,
                nodes: self.nodes,
            };
        }

        let mut best_move = moves[0];
        let mut best_value = -INF;

        for &mv in &moves {
            work.place_stone(mv, ai_stone);
            let value =
                self.minimax(&mut work, mv, self.depth, -INF, INF, false, ai_stone, opponent_stone);
            work.remove_stone(mv);

            if value > best_value {
                best_value = value;
                best_move = mv;
            }
        }

        SearchResult {
            best_move: Some(best_move),
            score: best_value,
            nodes: self.nodes,
        }
    }

    /// Candidates for the node where `mover` is about to play.
    fn candidate_moves(&self, board: &Board, mover: Stone, other: Stone) -> Vec<Pos> {
        let mut moves = movegen::candidates(board, self.radius);
        if self.ordered {
            movegen::order_candidates(board, &mut moves, CANDIDATE_CAP, mover, other);
        } else {
            movegen::sample_candidates(&mut moves, CANDIDATE_CAP);
        }
        moves
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &mut self,
        board: &mut Board,
        last: Pos,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        ai_stone: Stone,
        opponent_stone: Stone,
    ) -> i32 {
        self.nodes += 1;

        // The stone just placed may have completed five
        let last_stone = board.get(last);
        if has_five_from(board, last, last_stone) {
            return if last_stone == ai_stone { WIN_SCORE } else { -WIN_SCORE };
        }

        if depth == 0 {
            return evaluate(board, ai_stone, opponent_stone);
        }

        let (mover, other) = if maximizing {
            (ai_stone, opponent_stone)
        } else {
            (opponent_stone, ai_stone)
        };
        let moves = self.candidate_moves(board, mover, other);
        if moves.is_empty() {
            // No cell left to play: drawn line
            return 0;
        }

        if maximizing {
            let mut best = -INF;
            for &mv in &moves {
                board.place_stone(mv, ai_stone);
                let value =
                    self.minimax(board, mv, depth - 1, alpha, beta, false, ai_stone, opponent_stone);
                board.remove_stone(mv);
                best = best.max(value);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break; // beta cutoff
                }
            }
            best
        } else {
            let mut best = INF;
            for &mv in &moves {
                board.place_stone(mv, opponent_stone);
                let value =
                    self.minimax(board, mv, depth - 1, alpha, beta, true, ai_stone, opponent_stone);
                board.remove_stone(mv);
                best = best.min(value);
                beta = beta.min(value);
                if beta <= alpha {
                    break; // alpha cutoff
                }
            }
            best
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_win_in_one() {
        let mut board = Board::new(15);
        for c in 3..7u8 {
            board.place_stone(Pos::new(7, c), Stone::Black);
        }
        board.place_stone(Pos::new(8, 4), Stone::White);

        let mut searcher = Searcher::new(3);
        let result = searcher.search(&board, Stone::Black, Stone::White);
        assert_eq!(result.score, WIN_SCORE, "A one-move win must search as a won position");
        let mv = result.best_move.expect("Board has legal moves");
        assert!(
            mv == Pos::new(7, 2) || mv == Pos::new(7, 7),
            "Expected a five-completing move, got {:?}",
            mv
        );
    }

    #[test]
    fn test_blocks_the_only_losing_threat() {
        let mut board = Board::new(15);
        // White four walled on the left: (7,7) is the lone completion
        for c in 3..7u8 {
            board.place_stone(Pos::new(7, c), Stone::White);
        }
        board.place_stone(Pos::new(7, 2), Stone::Black);
        board.place_stone(Pos::new(9, 9), Stone::Black);

        let mut searcher = Searcher::new(3);
        let result = searcher.search(&board, Stone::Black, Stone::White);
        assert_eq!(
            result.best_move,
            Some(Pos::new(7, 7)),
            "Every non-blocking move loses to the four"
        );
        assert!(
            result.score > -WIN_SCORE,
            "Blocking keeps the game alive, score was {}",
            result.score
        );
    }

    #[test]
    fn test_full_board_yields_no_move() {
        let mut board = Board::new(9);
        for r in 0..9u8 {
            for c in 0..9u8 {
                let stone = if (r + c) % 2 == 0 { Stone::Black } else { Stone::White };
                board.place_stone(Pos::new(r, c), stone);
            }
        }

        let mut searcher = Searcher::new(2);
        let result = searcher.search(&board, Stone::Black, Stone::White);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_opening_move_is_center() {
        let board = Board::new(15);
        let mut searcher = Searcher::new(2);
        let result = searcher.search(&board, Stone::Black, Stone::White);
        assert_eq!(result.best_move, Some(Pos::new(7, 7)));
    }

    #[test]
    fn test_counts_nodes() {
        let mut board = Board::new(15);
        board.place_stone(Pos::new(7, 7), Stone::White);

        let mut searcher = Searcher::new(2);
        let result = searcher.search(&board, Stone::Black, Stone::White);
        assert!(result.nodes > 0, "Search should visit nodes");
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_shallow_search_returns_legal_move() {
        fastrand::seed(7);
        let mut board = Board::new(15);
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::White);

        let mut searcher = Searcher::new(1);
        let result = searcher.search(&board, Stone::Black, Stone::White);
        let mv = result.best_move.expect("Non-full board must yield a move");
        assert!(board.is_empty(mv), "Chosen move must land on an empty cell");
    }
}
