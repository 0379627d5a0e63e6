//! Server-wide settings pushed into rooms by the registry
//!
//! One `Settings` value lives in the [`RoomRegistry`](crate::registry::RoomRegistry);
//! changing it pushes the new value into every open room through
//! `apply_settings`, so a mid-game timer toggle takes effect on the
//! turn in progress.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::DEFAULT_MCTS_BUDGET_MS;

/// Runtime-adjustable server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-turn timer on/off
    pub timer_enabled: bool,
    /// Length of one turn when the timer is on
    pub timer_duration_secs: u64,
    /// Whether undo requests are accepted at all
    pub undo_enabled: bool,
    /// Whether AI-vs-AI rooms may be created
    pub ai_vs_ai_enabled: bool,
    /// Wall-clock budget for the extreme (MCTS) difficulty
    pub mcts_budget_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timer_enabled: false,
            timer_duration_secs: 60,
            undo_enabled: true,
            ai_vs_ai_enabled: true,
            mcts_budget_ms: DEFAULT_MCTS_BUDGET_MS,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn timer_duration(&self) -> Duration {
        Duration::from_secs(self.timer_duration_secs)
    }

    #[must_use]
    pub fn mcts_budget(&self) -> Duration {
        Duration::from_millis(self.mcts_budget_ms)
    }
}
