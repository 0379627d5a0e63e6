//! Search module for Gomoku AI
//!
//! Contains:
//! - Fixed-depth minimax with alpha-beta pruning
//! - Monte Carlo Tree Search with UCB1 selection over an index arena

pub mod mcts;
pub mod minimax;

pub use mcts::{MctsResult, MctsSearcher};
pub use minimax::{SearchResult, Searcher, INF, WIN_SCORE};
