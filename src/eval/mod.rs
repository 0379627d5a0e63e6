//! Board evaluation for Gomoku
//!
//! Scores positions by scanning every 5-cell window on the board.
//! Used as the leaf heuristic by the search and as a tie-breaker for
//! move ordering.

pub mod heuristic;
pub mod patterns;

// Re-exports
pub use heuristic::evaluate;
pub use patterns::{window_reward, WindowScore};
