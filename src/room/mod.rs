//! Game rooms and everything that lives inside one
//!
//! A [`GameRoom`] owns the authoritative state of a single match:
//! board, seats, spectators, move history, the turn timer and every
//! piece of deferred work. Rooms never talk to a transport; operations
//! return [`RoomEvent`]s for the host to broadcast and typed errors
//! for the caller alone.

pub mod error;
pub mod game;
pub mod snapshot;
pub mod timer;

pub use error::{CapacityError, IllegalMoveError, IllegalUndoError, NewGameError};
pub use game::{GameRoom, TickReport};
pub use snapshot::{CloseReason, RoomEvent, RoomSnapshot, SeatSnapshot, TimerSnapshot};
pub use timer::{
    DisconnectGrace, PendingAiMove, TurnTimer, AI_MOVE_DELAY, AI_VS_AI_FIRST_MOVE_DELAY,
    AI_VS_AI_PACING, DISCONNECT_GRACE,
};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Pos, Stone};
use crate::engine::Difficulty;

/// Connection identity assigned by the host transport.
///
/// Ids are opaque to the room; reconnecting clients come back with a
/// fresh one, which is why grace-window rebinding matches on name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client-{}", self.0)
    }
}

/// Room code handed out at creation and used for all routing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the two seats of a room are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Two humans
    Pvp,
    /// Human against an AI of the given strength
    Ai(Difficulty),
    /// Two AIs playing each other, humans may only watch
    AiVsAi,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Pvp => f.write_str("pvp"),
            GameMode::Ai(difficulty) => write!(f, "ai-{difficulty}"),
            GameMode::AiVsAi => f.write_str("ai-vs-ai"),
        }
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pvp" => Ok(GameMode::Pvp),
            "ai-vs-ai" => Ok(GameMode::AiVsAi),
            other => other
                .strip_prefix("ai-")
                .and_then(|name| name.parse::<Difficulty>().ok())
                .map(GameMode::Ai)
                .ok_or_else(|| format!("unknown game mode '{other}'")),
        }
    }
}

impl Serialize for GameMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Who holds a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatOccupant {
    Human { id: ClientId },
    Ai { difficulty: Difficulty },
}

impl SeatOccupant {
    #[must_use]
    pub fn is_ai(&self) -> bool {
        matches!(self, SeatOccupant::Ai { .. })
    }

    #[must_use]
    pub fn client_id(&self) -> Option<ClientId> {
        match self {
            SeatOccupant::Human { id } => Some(*id),
            SeatOccupant::Ai { .. } => None,
        }
    }
}

/// One of the two player seats. Seat 0 plays Black, seat 1 White.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub occupant: SeatOccupant,
    pub name: String,
    pub stone: Stone,
}

impl Seat {
    /// Transcript symbol for this seat's stone.
    #[must_use]
    pub fn symbol(&self) -> char {
        if self.stone == Stone::Black {
            'X'
        } else {
            'O'
        }
    }
}

/// Watcher admitted while a game is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spectator {
    pub id: ClientId,
    pub name: String,
}

/// One applied move; history keeps these newest-last.
///
/// Replaying the records of a room onto an empty board reproduces its
/// board exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub pos: Pos,
    pub stone: Stone,
    pub seat: usize,
}

/// Whether the room is still collecting players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Waiting,
    InProgress,
}

/// Terminal result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Win { seat: usize, line: [Pos; 5] },
    Draw,
}
