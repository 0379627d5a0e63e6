//! Room registry
//!
//! Owns every live room plus the server settings, and is the single
//! entry point a host (socket layer, CLI, tests) talks to. Every call
//! that changes a room returns an [`Update`] carrying the events to
//! broadcast and a fresh snapshot; errors go back to the caller alone.
//! Rooms that finish closing are dropped right after their final
//! update is built.

use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::board::normalize_size;
use crate::config::Settings;
use crate::room::{
    CapacityError, ClientId, CloseReason, GameMode, GameRoom, IllegalMoveError, IllegalUndoError,
    NewGameError, RoomEvent, RoomId, RoomSnapshot, RoomStatus,
};

const CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_LEN: usize = 6;

/// What a registry call asks the host to broadcast: the transient
/// events plus the room state everyone should now render.
#[derive(Debug, Clone)]
pub struct Update {
    pub room: RoomId,
    pub events: Vec<RoomEvent>,
    pub snapshot: RoomSnapshot,
}

/// One lobby row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomListing {
    pub room_id: RoomId,
    pub player_count: usize,
    pub spectator_count: usize,
    pub status: RoomStatus,
    pub game_mode: GameMode,
    pub board_size: usize,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("room not found")]
    RoomNotFound,
    #[error("AI-vs-AI rooms are disabled")]
    AiVsAiDisabled,
    #[error("only the room owner can do that")]
    NotRoomOwner,
    #[error("the game has already started")]
    RoomStarted,
    #[error(transparent)]
    Move(#[from] IllegalMoveError),
    #[error(transparent)]
    Undo(#[from] IllegalUndoError),
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    #[error(transparent)]
    NewGame(#[from] NewGameError),
}

/// All live rooms, keyed by their join code.
pub struct RoomRegistry {
    rooms: HashMap<RoomId, GameRoom>,
    settings: Settings,
}

impl RoomRegistry {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            rooms: HashMap::new(),
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    #[must_use]
    pub fn room(&self, id: &RoomId) -> Option<&GameRoom> {
        self.rooms.get(id)
    }

    /// Creates a room under a fresh join code. The creator still joins
    /// separately; AI-vs-AI rooms start on their own straight away.
    pub fn create_room(
        &mut self,
        client: ClientId,
        name: &str,
        size: usize,
        mode: GameMode,
        now: Instant,
    ) -> Result<Update, RegistryError> {
        if mode == GameMode::AiVsAi && !self.settings.ai_vs_ai_enabled {
            return Err(RegistryError::AiVsAiDisabled);
        }
        let size = normalize_size(size);
        let id = self.fresh_code();
        let room = GameRoom::new(
            id.clone(),
            size,
            client,
            name,
            mode,
            self.settings.clone(),
            now,
        );
        info!(room = %id, %mode, size, owner = %client, "room created");

        let events = if mode == GameMode::AiVsAi {
            vec![RoomEvent::GameStarted]
        } else {
            Vec::new()
        };
        let update = Self::update_for(&room, events, now);
        self.rooms.insert(id, room);
        Ok(update)
    }

    pub fn join_room(
        &mut self,
        id: &RoomId,
        client: ClientId,
        name: &str,
        now: Instant,
    ) -> Result<Update, RegistryError> {
        let room = self.room_mut(id)?;
        let events = room.add_player(client, name, now)?;
        Ok(Self::update_for(room, events, now))
    }

    pub fn watch_room(
        &mut self,
        id: &RoomId,
        client: ClientId,
        name: &str,
        now: Instant,
    ) -> Result<Update, RegistryError> {
        let room = self.room_mut(id)?;
        let events = room.add_spectator(client, name)?;
        Ok(Self::update_for(room, events, now))
    }

    pub fn make_move(
        &mut self,
        id: &RoomId,
        client: ClientId,
        row: i32,
        col: i32,
        now: Instant,
    ) -> Result<Update, RegistryError> {
        let room = self.room_mut(id)?;
        let events = room.make_move(client, row, col, now)?;
        Ok(Self::update_for(room, events, now))
    }

    pub fn request_undo(
        &mut self,
        id: &RoomId,
        client: ClientId,
        now: Instant,
    ) -> Result<Update, RegistryError> {
        let room = self.room_mut(id)?;
        let events = room.request_undo(client, now)?;
        Ok(Self::update_for(room, events, now))
    }

    pub fn respond_undo(
        &mut self,
        id: &RoomId,
        client: ClientId,
        accept: bool,
        now: Instant,
    ) -> Result<Update, RegistryError> {
        let room = self.room_mut(id)?;
        let events = room.respond_undo(client, accept, now)?;
        Ok(Self::update_for(room, events, now))
    }

    pub fn request_new_game(
        &mut self,
        id: &RoomId,
        client: ClientId,
        now: Instant,
    ) -> Result<Update, RegistryError> {
        let room = self.room_mut(id)?;
        let events = room.request_new_game(client, now)?;
        Ok(Self::update_for(room, events, now))
    }

    pub fn respond_new_game(
        &mut self,
        id: &RoomId,
        client: ClientId,
        accept: bool,
        now: Instant,
    ) -> Result<Update, RegistryError> {
        let room = self.room_mut(id)?;
        let events = room.respond_new_game(client, accept, now)?;
        Ok(Self::update_for(room, events, now))
    }

    /// Explicit leave. May close the room, in which case the returned
    /// update is its last word and the room is gone afterwards.
    pub fn leave_room(
        &mut self,
        id: &RoomId,
        client: ClientId,
        now: Instant,
    ) -> Result<Update, RegistryError> {
        let room = self.room_mut(id)?;
        let events = room.handle_leave(client);
        let update = Self::update_for(room, events, now);
        self.prune(id);
        Ok(update)
    }

    /// Connection drop, routed to every room the client touches. Each
    /// affected room yields one update.
    pub fn handle_disconnect(&mut self, client: ClientId, now: Instant) -> Vec<Update> {
        let ids: Vec<RoomId> = self.rooms.keys().cloned().collect();
        let mut updates = Vec::new();
        for id in ids {
            let room = match self.rooms.get_mut(&id) {
                Some(room) => room,
                None => continue,
            };
            let events = room.handle_disconnect(client, now);
            if !events.is_empty() {
                updates.push(Self::update_for(room, events, now));
                self.prune(&id);
            }
        }
        updates
    }

    /// Owner-only teardown, refused once a game is running unless the
    /// room is AI-vs-AI.
    pub fn delete_room(
        &mut self,
        id: &RoomId,
        client: ClientId,
        now: Instant,
    ) -> Result<Update, RegistryError> {
        let room = self.room_mut(id)?;
        if room.owner() != client {
            return Err(RegistryError::NotRoomOwner);
        }
        if room.mode() != GameMode::AiVsAi && room.status() == RoomStatus::InProgress {
            return Err(RegistryError::RoomStarted);
        }
        let events = room.close(CloseReason::Deleted);
        let update = Self::update_for(room, events, now);
        self.prune(id);
        Ok(update)
    }

    /// Adopts new settings and pushes them into every live room.
    pub fn apply_settings(&mut self, settings: Settings, now: Instant) {
        info!(?settings, "settings updated");
        self.settings = settings;
        for room in self.rooms.values_mut() {
            room.apply_settings(self.settings.clone(), now);
        }
    }

    /// Lobby view, sorted by join code for stable output.
    #[must_use]
    pub fn list_rooms(&self) -> Vec<RoomListing> {
        let mut listings: Vec<RoomListing> = self
            .rooms
            .values()
            .map(|room| RoomListing {
                room_id: room.id().clone(),
                player_count: room
                    .seats()
                    .iter()
                    .filter(|seat| !seat.occupant.is_ai())
                    .count(),
                spectator_count: room.spectators().len(),
                status: room.status(),
                game_mode: room.mode(),
                board_size: room.board().size(),
            })
            .collect();
        listings.sort_by(|a, b| a.room_id.0.cmp(&b.room_id.0));
        listings
    }

    /// Earliest deadline across all rooms; when the host should call
    /// [`Self::tick`] next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.rooms.values().filter_map(GameRoom::next_deadline).min()
    }

    /// Drives every room's deferred work and sweeps out rooms that
    /// closed in the process.
    pub fn tick(&mut self, now: Instant) -> Vec<Update> {
        let ids: Vec<RoomId> = self.rooms.keys().cloned().collect();
        let mut updates = Vec::new();
        for id in ids {
            let room = match self.rooms.get_mut(&id) {
                Some(room) => room,
                None => continue,
            };
            let report = room.tick(now);
            if !report.is_empty() {
                updates.push(Self::update_for(room, report.events, now));
                self.prune(&id);
            }
        }
        updates
    }

    fn update_for(room: &GameRoom, events: Vec<RoomEvent>, now: Instant) -> Update {
        Update {
            room: room.id().clone(),
            events,
            snapshot: room.snapshot(now),
        }
    }

    fn room_mut(&mut self, id: &RoomId) -> Result<&mut GameRoom, RegistryError> {
        self.rooms.get_mut(id).ok_or(RegistryError::RoomNotFound)
    }

    fn prune(&mut self, id: &RoomId) {
        if self.rooms.get(id).map_or(false, GameRoom::is_closing) {
            self.rooms.remove(id);
        }
    }

    fn fresh_code(&self) -> RoomId {
        loop {
            let code: String = (0..CODE_LEN)
                .map(|_| CODE_CHARS[fastrand::usize(..CODE_CHARS.len())] as char)
                .collect();
            let id = RoomId(code);
            if !self.rooms.contains_key(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use super::*;
    use crate::room::DISCONNECT_GRACE;

    const ALICE: ClientId = ClientId(1);
    const BOB: ClientId = ClientId(2);
    const CAROL: ClientId = ClientId(3);

    fn pvp_started(registry: &mut RoomRegistry, now: Instant) -> RoomId {
        let update = registry
            .create_room(ALICE, "alice", 15, GameMode::Pvp, now)
            .expect("create");
        let id = update.room;
        registry.join_room(&id, ALICE, "alice", now).expect("alice");
        registry.join_room(&id, BOB, "bob", now).expect("bob");
        id
    }

    #[test]
    fn test_create_join_and_play() {
        let now = Instant::now();
        let mut registry = RoomRegistry::new(Settings::default());

        let update = registry
            .create_room(ALICE, "alice", 15, GameMode::Pvp, now)
            .expect("create");
        assert_eq!(update.room.0.len(), CODE_LEN);
        assert!(update.events.is_empty(), "Creation alone starts nothing");
        assert_eq!(update.snapshot.status, RoomStatus::Waiting);
        let id = update.room;

        registry.join_room(&id, ALICE, "alice", now).expect("alice");
        let update = registry.join_room(&id, BOB, "bob", now).expect("bob");
        assert!(update.events.contains(&RoomEvent::GameStarted));

        let update = registry.make_move(&id, ALICE, 7, 7, now).expect("move");
        assert_eq!(update.snapshot.current_player, 1);
        assert_eq!(update.snapshot.last_move.map(|p| (p.row, p.col)), Some((7, 7)));

        let listings = registry.list_rooms();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].player_count, 2);
        assert_eq!(listings[0].status, RoomStatus::InProgress);
        assert_eq!(listings[0].board_size, 15);
    }

    #[test]
    fn test_room_codes_are_unique_and_well_formed() {
        fastrand::seed(42);
        let now = Instant::now();
        let mut registry = RoomRegistry::new(Settings::default());

        let mut codes = HashSet::new();
        for i in 0..50 {
            let update = registry
                .create_room(ClientId(i), "host", 15, GameMode::Pvp, now)
                .expect("create");
            let code = update.room.0.clone();
            assert_eq!(code.len(), CODE_LEN);
            assert!(
                code.bytes().all(|b| CODE_CHARS.contains(&b)),
                "Unexpected character in code {code}"
            );
            codes.insert(code);
        }
        assert_eq!(codes.len(), 50, "Join codes must not collide");
        assert_eq!(registry.len(), 50);
    }

    #[test]
    fn test_unknown_room_is_an_error() {
        let now = Instant::now();
        let mut registry = RoomRegistry::new(Settings::default());
        let bogus = RoomId("NOSUCH".to_string());
        assert_eq!(
            registry.join_room(&bogus, ALICE, "alice", now).unwrap_err(),
            RegistryError::RoomNotFound
        );
        assert_eq!(
            registry.make_move(&bogus, ALICE, 7, 7, now).unwrap_err(),
            RegistryError::RoomNotFound
        );
    }

    #[test]
    fn test_room_errors_pass_through_wrapped() {
        let now = Instant::now();
        let mut registry = RoomRegistry::new(Settings::default());
        let id = pvp_started(&mut registry, now);

        let err = registry.make_move(&id, BOB, 7, 7, now).unwrap_err();
        assert_eq!(err, RegistryError::Move(IllegalMoveError::NotYourTurn));

        let err = registry.join_room(&id, CAROL, "carol", now).unwrap_err();
        assert_eq!(err, RegistryError::Capacity(CapacityError::RoomFull));
    }

    #[test]
    fn test_ai_vs_ai_gate_and_self_start() {
        let now = Instant::now();
        let disabled = Settings {
            ai_vs_ai_enabled: false,
            ..Settings::default()
        };
        let mut registry = RoomRegistry::new(disabled);
        assert_eq!(
            registry
                .create_room(ALICE, "alice", 15, GameMode::AiVsAi, now)
                .unwrap_err(),
            RegistryError::AiVsAiDisabled
        );

        let mut registry = RoomRegistry::new(Settings::default());
        let update = registry
            .create_room(ALICE, "alice", 15, GameMode::AiVsAi, now)
            .expect("create");
        assert_eq!(update.events, vec![RoomEvent::GameStarted]);
        assert_eq!(update.snapshot.status, RoomStatus::InProgress);
        assert!(
            registry.next_deadline().is_some(),
            "AI-vs-AI room schedules its own opening move"
        );
        assert_eq!(registry.list_rooms()[0].player_count, 0);
    }

    #[test]
    fn test_delete_room_rules() {
        let now = Instant::now();
        let mut registry = RoomRegistry::new(Settings::default());

        let waiting = registry
            .create_room(ALICE, "alice", 15, GameMode::Pvp, now)
            .expect("create")
            .room;
        assert_eq!(
            registry.delete_room(&waiting, BOB, now).unwrap_err(),
            RegistryError::NotRoomOwner
        );
        let update = registry.delete_room(&waiting, ALICE, now).expect("delete");
        assert_eq!(
            update.events,
            vec![RoomEvent::RoomClosing {
                reason: CloseReason::Deleted
            }]
        );
        assert!(registry.is_empty());

        let started = pvp_started(&mut registry, now);
        assert_eq!(
            registry.delete_room(&started, ALICE, now).unwrap_err(),
            RegistryError::RoomStarted
        );

        let ai_vs_ai = registry
            .create_room(CAROL, "carol", 15, GameMode::AiVsAi, now)
            .expect("create")
            .room;
        registry
            .delete_room(&ai_vs_ai, CAROL, now)
            .expect("AI-vs-AI rooms are deletable while running");
        assert_eq!(registry.len(), 1, "Only the pvp room remains");
    }

    #[test]
    fn test_disconnect_reaches_every_room_the_client_is_in() {
        let now = Instant::now();
        let mut registry = RoomRegistry::new(Settings::default());
        let seated = pvp_started(&mut registry, now);
        let watched = registry
            .create_room(CAROL, "carol", 15, GameMode::AiVsAi, now)
            .expect("create")
            .room;
        registry
            .watch_room(&watched, ALICE, "alice", now)
            .expect("watch");

        let updates = registry.handle_disconnect(ALICE, now);
        assert_eq!(updates.len(), 2, "Both rooms react to the drop");

        let seated_update = updates
            .iter()
            .find(|u| u.room == seated)
            .expect("seated room update");
        assert!(matches!(
            seated_update.events[0],
            RoomEvent::PlayerDisconnected { seat: 0, .. }
        ));

        let watched_update = updates
            .iter()
            .find(|u| u.room == watched)
            .expect("watched room update");
        assert_eq!(
            watched_update.events,
            vec![RoomEvent::SpectatorLeft {
                name: "alice".to_string()
            }]
        );
        assert_eq!(registry.len(), 2, "Neither room closed yet");
    }

    #[test]
    fn test_leave_removes_closed_room() {
        let now = Instant::now();
        let mut registry = RoomRegistry::new(Settings::default());
        let id = pvp_started(&mut registry, now);

        let update = registry.leave_room(&id, ALICE, now).expect("leave");
        assert_eq!(
            update.events,
            vec![RoomEvent::RoomClosing {
                reason: CloseReason::PlayerLeft
            }]
        );
        assert!(registry.is_empty(), "Closed room is swept out");
    }

    #[test]
    fn test_tick_fans_out_and_prunes() {
        fastrand::seed(3);
        let now = Instant::now();
        let mut registry = RoomRegistry::new(Settings::default());

        let graced = pvp_started(&mut registry, now);
        registry.handle_disconnect(BOB, now);

        let driven = registry
            .create_room(CAROL, "carol", 9, GameMode::AiVsAi, now)
            .expect("create")
            .room;

        let first_due = registry.next_deadline().expect("opening move queued");
        let updates = registry.tick(first_due);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].room, driven);
        assert!(matches!(
            updates[0].events[0],
            RoomEvent::MoveApplied { seat: 0, .. }
        ));

        let updates = registry.tick(now + DISCONNECT_GRACE);
        let closed = updates
            .iter()
            .find(|u| u.room == graced)
            .expect("grace expiry update");
        assert_eq!(
            closed.events,
            vec![RoomEvent::RoomClosing {
                reason: CloseReason::GraceExpired
            }]
        );
        assert_eq!(registry.len(), 1, "Expired room was removed");
        assert!(registry.room(&driven).is_some());
    }

    #[test]
    fn test_apply_settings_reaches_live_rooms() {
        let now = Instant::now();
        let mut registry = RoomRegistry::new(Settings::default());
        let id = pvp_started(&mut registry, now);
        assert!(registry.next_deadline().is_none());

        let timed = Settings {
            timer_enabled: true,
            timer_duration_secs: 20,
            ..Settings::default()
        };
        registry.apply_settings(timed, now);
        assert_eq!(
            registry.next_deadline(),
            Some(now + Duration::from_secs(20)),
            "Enabling the timer arms the countdown in the running room"
        );
        assert!(registry.room(&id).is_some());
    }
}
