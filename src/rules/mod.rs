//! Game rules for Gomoku
//!
//! Win detection scans outward from the most recently placed stone;
//! a full board with no winner is a draw.

pub mod win;

// Re-exports for convenient access
pub use win::{find_winning_line, has_five_from};
