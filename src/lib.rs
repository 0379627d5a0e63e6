//! Gomoku game-server core
//!
//! The authoritative logic of a real-time two-player Gomoku server:
//! rooms, rules, timers, spectators, undo negotiation, and the AI
//! opponents, with no transport attached. A host (socket layer, CLI,
//! tests) drives a [`registry::RoomRegistry`], broadcasts the
//! [`registry::Update`]s it returns, and calls `tick` whenever
//! `next_deadline` comes due.
//!
//! # Architecture
//!
//! - [`board`]: Board representation with dynamic sizes
//! - [`rules`]: Win and draw detection
//! - [`eval`]: Position evaluation over stone windows
//! - [`movegen`]: Candidate generation and ordering
//! - [`search`]: Minimax with alpha-beta, and Monte Carlo tree search
//! - [`engine`]: Difficulty levels tying the search stack together
//! - [`room`]: One match: seats, moves, timers, undo, reconnection
//! - [`registry`]: All live rooms plus the lobby listing
//! - [`config`]: Server settings pushed into rooms
//!
//! # Quick Start
//!
//! ```
//! use std::time::Instant;
//! use gomoku::{ClientId, GameMode, RoomRegistry, Settings};
//!
//! # fn main() -> Result<(), gomoku::registry::RegistryError> {
//! let now = Instant::now();
//! let mut registry = RoomRegistry::new(Settings::default());
//!
//! // Create a room, seat both players, and play the opening move
//! let created = registry.create_room(ClientId(1), "alice", 15, GameMode::Pvp, now)?;
//! registry.join_room(&created.room, ClientId(1), "alice", now)?;
//! registry.join_room(&created.room, ClientId(2), "bob", now)?;
//!
//! let update = registry.make_move(&created.room, ClientId(1), 7, 7, now)?;
//! assert_eq!(update.snapshot.current_player, 1);
//! # Ok(())
//! # }
//! ```
//!
//! The engine is usable on its own:
//!
//! ```
//! use gomoku::{AiEngine, Board, Difficulty, Pos, Stone};
//!
//! let mut board = Board::new(15);
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let mut engine = AiEngine::new(Difficulty::Medium);
//! let choice = engine.choose_move(&board, Stone::White, Stone::Black);
//! assert!(choice.best_move.is_some());
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod movegen;
pub mod registry;
pub mod room;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone};
pub use config::Settings;
pub use engine::{AiEngine, Difficulty, MoveChoice};
pub use registry::{RoomRegistry, Update};
pub use room::{ClientId, GameMode, GameRoom, RoomEvent, RoomId, RoomSnapshot};
