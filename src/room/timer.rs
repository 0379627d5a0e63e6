//! Deadline data for everything a room defers
//!
//! There are no callbacks here. Each kind of deferred work is a plain
//! value holding its deadline; [`GameRoom::tick`](super::GameRoom::tick)
//! checks them against the current instant and performs the
//! transition itself.

use std::time::{Duration, Instant};

/// Delay before an AI answers a human move
pub const AI_MOVE_DELAY: Duration = Duration::from_millis(500);

/// Delay between moves when both seats are AI
pub const AI_VS_AI_PACING: Duration = Duration::from_millis(800);

/// Delay before the opening move of an AI-vs-AI game
pub const AI_VS_AI_FIRST_MOVE_DELAY: Duration = Duration::from_millis(1000);

/// How long a dropped player's seat is held for reconnection
pub const DISCONNECT_GRACE: Duration = Duration::from_secs(10);

/// Running per-turn countdown.
///
/// At most one exists per room; replacing the `Option` holding it is
/// the cancel, so a fired timer can never leak into the next turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnTimer {
    pub deadline: Instant,
    pub total: Duration,
}

impl TurnTimer {
    #[must_use]
    pub fn start(now: Instant, total: Duration) -> Self {
        Self {
            deadline: now + total,
            total,
        }
    }

    /// Whole seconds left, rounded up; 0 once expired.
    #[must_use]
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let left = self.deadline.saturating_duration_since(now);
        left.as_secs() + u64::from(left.subsec_nanos() > 0)
    }
}

/// AI move scheduled for later.
///
/// `generation` pins the room state the schedule was made against; if
/// the room moved on by the due time, the move is dropped unplayed.
#[derive(Debug, Clone, Copy)]
pub struct PendingAiMove {
    pub due: Instant,
    pub generation: u64,
}

/// Window during which a disconnected player's seat is held open.
#[derive(Debug, Clone, Copy)]
pub struct DisconnectGrace {
    pub seat: usize,
    pub deadline: Instant,
}
