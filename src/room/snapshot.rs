//! Outbound room state and transient events
//!
//! A [`RoomSnapshot`] is the full picture pushed to every participant
//! after each accepted change; [`RoomEvent`]s are the one-shot
//! notifications that accompany it.

use serde::{Deserialize, Serialize};

use crate::board::{Pos, Stone};

use super::{ClientId, GameMode, RoomId, RoomStatus};

/// Wire form of one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    /// Connection behind the seat; `None` for AI seats
    pub id: Option<ClientId>,
    pub name: String,
    pub symbol: char,
    pub is_ai: bool,
}

/// Wire form of the turn timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub enabled: bool,
    pub duration_secs: u64,
    /// Whole seconds left for the seat on turn; `None` when no
    /// countdown is running
    pub remaining_secs: Option<u64>,
}

/// Full room state as seen by players and spectators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub board: Vec<Vec<Stone>>,
    pub board_size: usize,
    pub seats: Vec<SeatSnapshot>,
    pub spectators: Vec<String>,
    pub status: RoomStatus,
    pub current_player: usize,
    pub game_over: bool,
    /// Winning seat index; `None` while running or on a draw
    pub winner: Option<usize>,
    pub winning_line: Option<[Pos; 5]>,
    pub is_draw: bool,
    pub last_move: Option<Pos>,
    pub can_undo: bool,
    pub timer: TimerSnapshot,
    pub undo_enabled: bool,
    pub game_mode: GameMode,
}

/// Why a room is shutting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// A seated player left on purpose
    PlayerLeft,
    /// The creator abandoned a room they were not seated in
    OwnerLeft,
    /// A disconnected player's reconnect window ran out
    GraceExpired,
    /// The owner deleted the room
    Deleted,
}

/// One-shot notifications produced by room operations and ticks.
///
/// Broadcast to the whole room alongside the snapshot, then dropped;
/// they are never part of the persistent state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoomEvent {
    PlayerJoined { seat: usize, name: String },
    GameStarted,
    SpectatorJoined { name: String },
    SpectatorLeft { name: String },
    MoveApplied { seat: usize, pos: Pos },
    GameWon { seat: usize, line: [Pos; 5], moves: usize },
    GameDrawn { moves: usize },
    /// The seat on turn ran out of time
    TurnSkipped { from: usize, to: usize },
    UndoRequested { by: usize },
    UndoAccepted { plies: usize },
    UndoDeclined,
    NewGameRequested { by: usize },
    NewGameStarted,
    NewGameDeclined,
    /// The AI could not produce a move; the turn stalls
    AiFailed { seat: usize },
    /// Seat held open for reconnection
    PlayerDisconnected { seat: usize, name: String },
    PlayerReconnected { seat: usize, name: String },
    RoomClosing { reason: CloseReason },
}
