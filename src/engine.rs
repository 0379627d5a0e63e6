//! Main AI engine integrating the search components
//!
//! The engine picks moves through a priority ladder:
//!
//! 1. **Instant win**: any candidate that completes five right now
//! 2. **Forced block**: any candidate the opponent would win with
//! 3. **Easy flavor**: at the easiest level, a 40% chance to play a
//!    uniformly random candidate (intentional weakening)
//! 4. **Search**: fixed-depth minimax, or MCTS at the extreme level
//!
//! Steps 1 and 2 run at every difficulty, so the engine never misses a
//! one-move win or loss regardless of depth or randomness.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::engine::{AiEngine, Difficulty};
//!
//! let mut engine = AiEngine::new(Difficulty::Medium);
//! let mut board = Board::new(15);
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let choice = engine.choose_move(&board, Stone::White, Stone::Black);
//! println!("Play at {:?}", choice.best_move);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone};
use crate::movegen;
use crate::rules::has_five_from;
use crate::search::{MctsResult, MctsSearcher, SearchResult, Searcher, WIN_SCORE};

/// Chance that the easiest level plays a random move instead of searching
const EASY_RANDOM_CHANCE: f64 = 0.4;

/// Default wall-clock budget for the MCTS level
pub const DEFAULT_MCTS_BUDGET_MS: u64 = 2_000;

/// Candidate radius for the step-0 scans and the random flavor
const SCAN_RADIUS: i32 = 2;

/// AI strength levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    VeryHard,
    Extreme,
}

impl Difficulty {
    /// Minimax depth for this level. The extreme level normally runs
    /// MCTS instead; its depth is the fallback equivalent.
    #[must_use]
    pub fn search_depth(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::VeryHard => 4,
            Difficulty::Extreme => 4,
        }
    }

    /// Whether this level uses the MCTS engine
    #[must_use]
    pub fn uses_mcts(self) -> bool {
        matches!(self, Difficulty::Extreme)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::VeryHard => "very-hard",
            Difficulty::Extreme => "extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "very-hard" => Ok(Difficulty::VeryHard),
            "extreme" => Ok(Difficulty::Extreme),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// Which rung of the ladder produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// A candidate completed five immediately
    InstantWin,
    /// The opponent had a one-move win that had to be taken away
    ForcedBlock,
    /// Easy-level random pick
    Random,
    /// Fixed-depth alpha-beta minimax
    Minimax,
    /// Monte Carlo tree search
    Mcts,
}

/// Result of a move decision with search metadata.
#[derive(Debug, Clone)]
pub struct MoveChoice {
    /// Chosen move, `None` only when the board has no legal move
    pub best_move: Option<Pos>,
    /// Score of the chosen move (search value, or permille winrate for MCTS)
    pub score: i32,
    /// Ladder rung that produced the move
    pub kind: SearchKind,
    /// Wall-clock time spent, in milliseconds
    pub time_ms: u64,
    /// Nodes searched (playouts for MCTS)
    pub nodes: u64,
}

impl MoveChoice {
    #[inline]
    fn instant_win(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: WIN_SCORE,
            kind: SearchKind::InstantWin,
            time_ms,
            nodes: 1,
        }
    }

    #[inline]
    fn forced_block(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            kind: SearchKind::ForcedBlock,
            time_ms,
            nodes: 1,
        }
    }

    #[inline]
    fn random(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            kind: SearchKind::Random,
            time_ms,
            nodes: 1,
        }
    }

    #[inline]
    fn from_minimax(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            kind: SearchKind::Minimax,
            time_ms,
            nodes: result.nodes,
        }
    }

    #[inline]
    fn from_mcts(result: MctsResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: (result.winrate * 1000.0).round() as i32,
            kind: SearchKind::Mcts,
            time_ms,
            nodes: result.playouts,
        }
    }

    #[inline]
    fn no_move(time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            kind: SearchKind::Minimax,
            time_ms,
            nodes: 0,
        }
    }
}

/// Move chooser for one AI seat.
///
/// Cheap to construct; rooms build one per decision.
pub struct AiEngine {
    difficulty: Difficulty,
    mcts_budget: Duration,
}

impl AiEngine {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            mcts_budget: Duration::from_millis(DEFAULT_MCTS_BUDGET_MS),
        }
    }

    /// Engine with a custom MCTS time budget (the minimax levels ignore it).
    #[must_use]
    pub fn with_budget(difficulty: Difficulty, mcts_budget: Duration) -> Self {
        Self {
            difficulty,
            mcts_budget,
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Pick a move for `ai_stone` on `board`.
    ///
    /// Returns `best_move: None` only when the board has no legal move;
    /// callers treat that as a full/drawn board.
    #[must_use]
    pub fn choose_move(&mut self, board: &Board, ai_stone: Stone, opponent_stone: Stone) -> MoveChoice {
        let start = Instant::now();

        let candidates = movegen::candidates(board, SCAN_RADIUS);
        if candidates.is_empty() {
            return MoveChoice::no_move(start.elapsed().as_millis() as u64);
        }

        // Step 0a: take a one-move win on the spot
        let mut work = board.clone();
        if let Some(mv) = find_winning_placement(&mut work, &candidates, ai_stone) {
            return MoveChoice::instant_win(mv, start.elapsed().as_millis() as u64);
        }

        // Step 0b: deny the opponent's one-move win
        if let Some(mv) = find_winning_placement(&mut work, &candidates, opponent_stone) {
            return MoveChoice::forced_block(mv, start.elapsed().as_millis() as u64);
        }

        // Easy flavor: sometimes just play something nearby
        if self.difficulty == Difficulty::Easy && fastrand::f64() < EASY_RANDOM_CHANCE {
            let mv = candidates[fastrand::usize(..candidates.len())];
            return MoveChoice::random(mv, start.elapsed().as_millis() as u64);
        }

        if self.difficulty.uses_mcts() {
            let mut searcher = MctsSearcher::new(self.mcts_budget);
            let result = searcher.search(board, ai_stone);
            return MoveChoice::from_mcts(result, start.elapsed().as_millis() as u64);
        }

        let mut searcher = Searcher::new(self.difficulty.search_depth());
        let result = searcher.search(board, ai_stone, opponent_stone);
        MoveChoice::from_minimax(result, start.elapsed().as_millis() as u64)
    }
}

/// First candidate that would complete five for `stone`, if any.
///
/// `work` is a scratch copy of the position; every probe is undone
/// before returning.
fn find_winning_placement(work: &mut Board, candidates: &[Pos], stone: Stone) -> Option<Pos> {
    for &mv in candidates {
        work.place_stone(mv, stone);
        let wins = has_five_from(work, mv, stone);
        work.remove_stone(mv);
        if wins {
            return Some(mv);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_LEVELS: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::VeryHard,
        Difficulty::Extreme,
    ];

    #[test]
    fn test_takes_win_in_one_at_every_level() {
        for difficulty in ALL_LEVELS {
            let mut board = Board::new(15);
            for c in 3..7u8 {
                board.place_stone(Pos::new(7, c), Stone::Black);
            }
            board.place_stone(Pos::new(8, 4), Stone::White);
            board.place_stone(Pos::new(8, 5), Stone::White);
            board.place_stone(Pos::new(8, 6), Stone::White);

            let mut engine = AiEngine::with_budget(difficulty, Duration::from_millis(20));
            let choice = engine.choose_move(&board, Stone::Black, Stone::White);
            let mv = choice.best_move.expect("Board has legal moves");
            assert!(
                mv == Pos::new(7, 2) || mv == Pos::new(7, 7),
                "{difficulty}: expected the winning cell, got {:?}",
                mv
            );
            assert_eq!(choice.kind, SearchKind::InstantWin, "{difficulty} skipped the win scan");
            assert_eq!(choice.score, WIN_SCORE);
        }
    }

    #[test]
    fn test_blocks_loss_in_one_at_every_level() {
        for difficulty in ALL_LEVELS {
            let mut board = Board::new(15);
            for c in 3..7u8 {
                board.place_stone(Pos::new(7, c), Stone::White);
            }
            board.place_stone(Pos::new(9, 5), Stone::Black);

            let mut engine = AiEngine::with_budget(difficulty, Duration::from_millis(20));
            let choice = engine.choose_move(&board, Stone::Black, Stone::White);
            let mv = choice.best_move.expect("Board has legal moves");
            assert!(
                mv == Pos::new(7, 2) || mv == Pos::new(7, 7),
                "{difficulty}: expected a blocking cell, got {:?}",
                mv
            );
            assert_eq!(choice.kind, SearchKind::ForcedBlock);
        }
    }

    #[test]
    fn test_own_win_preferred_over_block() {
        // Both sides threaten five; taking the win ends the game first
        let mut board = Board::new(15);
        for c in 3..7u8 {
            board.place_stone(Pos::new(5, c), Stone::Black);
            board.place_stone(Pos::new(9, c), Stone::White);
        }

        let mut engine = AiEngine::new(Difficulty::Medium);
        let choice = engine.choose_move(&board, Stone::Black, Stone::White);
        let mv = choice.best_move.expect("Board has legal moves");
        assert_eq!(mv.row, 5, "Winning beats blocking, got {:?}", mv);
        assert_eq!(choice.kind, SearchKind::InstantWin);
    }

    #[test]
    fn test_empty_board_opens_center_at_every_level() {
        for difficulty in ALL_LEVELS {
            let board = Board::new(15);
            let mut engine = AiEngine::with_budget(difficulty, Duration::from_millis(20));
            let choice = engine.choose_move(&board, Stone::Black, Stone::White);
            assert_eq!(
                choice.best_move,
                Some(Pos::new(7, 7)),
                "{difficulty} should open at the center"
            );
        }
    }

    #[test]
    fn test_easy_level_plays_legal_moves() {
        fastrand::seed(99);
        let mut board = Board::new(15);
        board.place_stone(Pos::new(7, 7), Stone::White);
        board.place_stone(Pos::new(7, 8), Stone::Black);

        // Roll the dice often enough to hit the random branch
        for _ in 0..20 {
            let mut engine = AiEngine::new(Difficulty::Easy);
            let choice = engine.choose_move(&board, Stone::Black, Stone::White);
            let mv = choice.best_move.expect("Board has legal moves");
            assert!(board.is_empty(mv), "Easy level played an occupied cell {:?}", mv);
        }
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

        let mut engine = AiEngine::new(Difficulty::Medium);
        let choice = engine.choose_move(&board, Stone::Black, Stone::White);
        assert_eq!(choice.best_move, None);
    }

    #[test]
    fn test_depth_mapping() {
        assert_eq!(Difficulty::Easy.search_depth(), 1);
        assert_eq!(Difficulty::Medium.search_depth(), 2);
        assert_eq!(Difficulty::Hard.search_depth(), 3);
        assert_eq!(Difficulty::VeryHard.search_depth(), 4);
        assert!(Difficulty::Extreme.uses_mcts());
        assert!(!Difficulty::Hard.uses_mcts());
    }

    #[test]
    fn test_difficulty_names_round_trip() {
        for difficulty in ALL_LEVELS {
            let parsed: Difficulty = difficulty.name().parse().expect("Name should parse back");
            assert_eq!(parsed, difficulty);
        }
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_reports_timing_and_nodes() {
        let mut board = Board::new(15);
        board.place_stone(Pos::new(7, 7), Stone::White);

        let mut engine = AiEngine::new(Difficulty::Medium);
        let choice = engine.choose_move(&board, Stone::Black, Stone::White);
        assert_eq!(choice.kind, SearchKind::Minimax);
        assert!(choice.nodes > 0);
    }
}
