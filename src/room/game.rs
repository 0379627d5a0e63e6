//! Room state machine
//!
//! All deferred work (turn timer, delayed AI replies, disconnect
//! grace) is plain deadline data held in the room. The host asks
//! [`GameRoom::next_deadline`] when to wake up and calls
//! [`GameRoom::tick`]; every transition happens inside that call and
//! is reported back as events. Nothing here spawns threads, holds
//! callbacks, or touches a transport.

use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::board::{Board, Pos, Stone};
use crate::config::Settings;
use crate::engine::{AiEngine, Difficulty};
use crate::rules::find_winning_line;

use super::error::{CapacityError, IllegalMoveError, IllegalUndoError, NewGameError};
use super::snapshot::{CloseReason, RoomEvent, RoomSnapshot, SeatSnapshot, TimerSnapshot};
use super::timer::{
    DisconnectGrace, PendingAiMove, TurnTimer, AI_MOVE_DELAY, AI_VS_AI_FIRST_MOVE_DELAY,
    AI_VS_AI_PACING, DISCONNECT_GRACE,
};
use super::{
    ClientId, GameMode, GameOutcome, MoveRecord, RoomId, RoomStatus, Seat, SeatOccupant, Spectator,
};

/// Strength of the seats in an AI-vs-AI room. Deep enough to look like
/// a real game, shallow enough that the pacing delay dominates.
const AI_VS_AI_DIFFICULTY: Difficulty = Difficulty::Medium;

/// Transitions applied by one [`GameRoom::tick`] call.
#[derive(Debug, Default)]
pub struct TickReport {
    pub events: Vec<RoomEvent>,
}

impl TickReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Authoritative state of one match.
pub struct GameRoom {
    id: RoomId,
    mode: GameMode,
    owner: ClientId,
    owner_name: String,
    board: Board,
    seats: Vec<Seat>,
    spectators: Vec<Spectator>,
    status: RoomStatus,
    current: usize,
    outcome: Option<GameOutcome>,
    last_move: Option<Pos>,
    history: Vec<MoveRecord>,
    timer: Option<TurnTimer>,
    pending_ai: Option<PendingAiMove>,
    graces: Vec<DisconnectGrace>,
    undo_request: Option<usize>,
    new_game_request: Option<usize>,
    settings: Settings,
    /// Bumped on every accepted state change; pins scheduled AI moves
    generation: u64,
    closing: bool,
}

impl GameRoom {
    /// New room. AI-vs-AI rooms seat both AIs and start immediately;
    /// everything else waits for players.
    #[must_use]
    pub fn new(
        id: RoomId,
        size: usize,
        owner: ClientId,
        owner_name: &str,
        mode: GameMode,
        settings: Settings,
        now: Instant,
    ) -> Self {
        let mut room = Self {
            id,
            mode,
            owner,
            owner_name: owner_name.to_string(),
            board: Board::new(size),
            seats: Vec::new(),
            spectators: Vec::new(),
            status: RoomStatus::Waiting,
            current: 0,
            outcome: None,
            last_move: None,
            history: Vec::new(),
            timer: None,
            pending_ai: None,
            graces: Vec::new(),
            undo_request: None,
            new_game_request: None,
            settings,
            generation: 0,
            closing: false,
        };

        if room.mode == GameMode::AiVsAi {
            room.seats.push(Seat {
                occupant: SeatOccupant::Ai {
                    difficulty: AI_VS_AI_DIFFICULTY,
                },
                name: "AI-1".to_string(),
                stone: Stone::Black,
            });
            room.seats.push(Seat {
                occupant: SeatOccupant::Ai {
                    difficulty: AI_VS_AI_DIFFICULTY,
                },
                name: "AI-2".to_string(),
                stone: Stone::White,
            });
            room.status = RoomStatus::InProgress;
            room.start_timer(now);
            room.schedule_ai(now + AI_VS_AI_FIRST_MOVE_DELAY);
            info!(room = %room.id, "AI-vs-AI game scheduled");
        }
        room
    }

    #[must_use]
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn status(&self) -> RoomStatus {
        self.status
    }

    #[must_use]
    pub fn owner(&self) -> ClientId {
        self.owner
    }

    #[must_use]
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    #[must_use]
    pub fn spectators(&self) -> &[Spectator] {
        &self.spectators
    }

    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[must_use]
    pub fn current_player(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Whether the registry should drop this room after broadcasting.
    #[must_use]
    pub fn is_closing(&self) -> bool {
        self.closing
    }

    // ---- joining ------------------------------------------------------

    /// Seats a player, or rebinds a seat whose occupant is inside the
    /// reconnect window and joins under the same display name.
    pub fn add_player(
        &mut self,
        client: ClientId,
        name: &str,
        now: Instant,
    ) -> Result<Vec<RoomEvent>, CapacityError> {
        // A matching name during grace is the same player on a new
        // connection.
        if let Some(idx) = self
            .graces
            .iter()
            .position(|g| self.seats[g.seat].name == name)
        {
            let grace = self.graces.remove(idx);
            let seat = grace.seat;
            self.seats[seat].occupant = SeatOccupant::Human { id: client };
            info!(room = %self.id, seat, name, "player reconnected");
            return Ok(vec![RoomEvent::PlayerReconnected {
                seat,
                name: name.to_string(),
            }]);
        }

        if self.mode == GameMode::AiVsAi {
            return Err(CapacityError::AiOnlyRoom);
        }
        if self.seats.len() >= 2 {
            return Err(CapacityError::RoomFull);
        }

        let seat_index = self.seats.len();
        let stone = if seat_index == 0 {
            Stone::Black
        } else {
            Stone::White
        };
        self.seats.push(Seat {
            occupant: SeatOccupant::Human { id: client },
            name: name.to_string(),
            stone,
        });
        info!(room = %self.id, seat = seat_index, name, "player joined");
        let mut events = vec![RoomEvent::PlayerJoined {
            seat: seat_index,
            name: name.to_string(),
        }];

        // The first human in an AI room brings the AI with them
        if let GameMode::Ai(difficulty) = self.mode {
            if self.seats.len() == 1 {
                self.seats.push(Seat {
                    occupant: SeatOccupant::Ai { difficulty },
                    name: "AI".to_string(),
                    stone: Stone::White,
                });
                events.push(RoomEvent::PlayerJoined {
                    seat: 1,
                    name: "AI".to_string(),
                });
            }
        }

        if self.seats.len() == 2 {
            self.status = RoomStatus::InProgress;
            self.start_timer(now);
            events.push(RoomEvent::GameStarted);
            info!(room = %self.id, "game started");
        }
        Ok(events)
    }

    /// Admits a watcher. Only running games can be watched.
    pub fn add_spectator(
        &mut self,
        client: ClientId,
        name: &str,
    ) -> Result<Vec<RoomEvent>, CapacityError> {
        if self.status != RoomStatus::InProgress {
            return Err(CapacityError::NotInProgress);
        }
        if self.spectators.iter().any(|s| s.id == client) {
            return Err(CapacityError::AlreadyWatching);
        }
        self.spectators.push(Spectator {
            id: client,
            name: name.to_string(),
        });
        debug!(room = %self.id, name, "spectator joined");
        Ok(vec![RoomEvent::SpectatorJoined {
            name: name.to_string(),
        }])
    }

    fn remove_spectator(&mut self, client: ClientId) -> Option<RoomEvent> {
        let idx = self.spectators.iter().position(|s| s.id == client)?;
        let spectator = self.spectators.remove(idx);
        debug!(room = %self.id, name = %spectator.name, "spectator left");
        Some(RoomEvent::SpectatorLeft {
            name: spectator.name,
        })
    }

    // ---- moves --------------------------------------------------------

    /// Validates and applies a move from a connection.
    ///
    /// Rejections are side-effect-free and go to the caller only.
    pub fn make_move(
        &mut self,
        client: ClientId,
        row: i32,
        col: i32,
        now: Instant,
    ) -> Result<Vec<RoomEvent>, IllegalMoveError> {
        if self.outcome.is_some() {
            return Err(IllegalMoveError::GameOver);
        }
        if self.seats.len() < 2 {
            return Err(IllegalMoveError::WaitingForOpponent);
        }
        if self.seats[self.current].occupant.client_id() != Some(client) {
            return Err(IllegalMoveError::NotYourTurn);
        }
        let size = self.board.size() as i32;
        if row < 0 || row >= size || col < 0 || col >= size {
            return Err(IllegalMoveError::OutOfBounds);
        }
        let pos = Pos::new(row as u8, col as u8);
        if !self.board.is_empty(pos) {
            return Err(IllegalMoveError::CellOccupied);
        }
        Ok(self.commit_move(pos, now))
    }

    /// Applies a move for the seat on turn: place, record, decide
    /// win/draw/continue, switch, restart the timer, and queue an AI
    /// reply when the new mover is an AI. Shared by human moves and
    /// AI moves alike.
    fn commit_move(&mut self, pos: Pos, now: Instant) -> Vec<RoomEvent> {
        let seat = self.current;
        let stone = self.seats[seat].stone;
        self.board.place_stone(pos, stone);
        self.last_move = Some(pos);
        self.history.push(MoveRecord { pos, stone, seat });
        self.generation += 1;
        self.timer = None;

        let mut events = vec![RoomEvent::MoveApplied { seat, pos }];
        debug!(room = %self.id, seat, row = pos.row, col = pos.col, "move applied");

        if let Some(line) = find_winning_line(&self.board, pos) {
            self.outcome = Some(GameOutcome::Win { seat, line });
            self.pending_ai = None;
            events.push(RoomEvent::GameWon {
                seat,
                line,
                moves: self.history.len(),
            });
            info!(room = %self.id, winner = seat, moves = self.history.len(), "game won");
            return events;
        }

        if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
            self.pending_ai = None;
            events.push(RoomEvent::GameDrawn {
                moves: self.history.len(),
            });
            info!(room = %self.id, moves = self.history.len(), "game drawn");
            return events;
        }

        self.current = 1 - self.current;
        self.start_timer(now);
        self.schedule_ai_reply(now);
        events
    }

    // ---- undo ---------------------------------------------------------

    /// Takes back exactly one ply and hands the turn to its mover.
    /// Cancels the timer and any queued AI reply.
    pub fn undo_last(&mut self) -> Result<MoveRecord, IllegalUndoError> {
        if self.history.is_empty() {
            return Err(IllegalUndoError::NothingToUndo);
        }
        if self.outcome.is_some() {
            return Err(IllegalUndoError::GameAlreadyOver);
        }
        let record = self.history.pop().ok_or(IllegalUndoError::NothingToUndo)?;
        self.board.remove_stone(record.pos);
        self.current = record.seat;
        self.last_move = self.history.last().map(|r| r.pos);
        self.generation += 1;
        self.timer = None;
        self.pending_ai = None;
        debug!(room = %self.id, seat = record.seat, row = record.pos.row, col = record.pos.col, "move undone");
        Ok(record)
    }

    /// Opens (or, against an AI, immediately settles) an undo request.
    ///
    /// AI rooms auto-accept and pop until the requester's own move is
    /// off the board, at most two plies. In pvp the requester must not
    /// be on turn; the opposing seat answers via [`Self::respond_undo`].
    pub fn request_undo(
        &mut self,
        client: ClientId,
        now: Instant,
    ) -> Result<Vec<RoomEvent>, IllegalUndoError> {
        if !self.settings.undo_enabled {
            return Err(IllegalUndoError::UndoDisabled);
        }
        let seat = self
            .seat_of(client)
            .ok_or(IllegalUndoError::NotYourMoveToUndo)?;

        if let GameMode::Ai(_) = self.mode {
            let mut plies = 0;
            loop {
                let record = self.undo_last()?;
                plies += 1;
                if plies == 2 || record.seat == seat || self.history.is_empty() {
                    break;
                }
            }
            self.start_timer(now);
            info!(room = %self.id, seat, plies, "undo auto-accepted");
            return Ok(vec![RoomEvent::UndoAccepted { plies }]);
        }

        if self.outcome.is_some() {
            return Err(IllegalUndoError::GameAlreadyOver);
        }
        if self.history.is_empty() {
            return Err(IllegalUndoError::NothingToUndo);
        }
        if self.current == seat {
            return Err(IllegalUndoError::NotYourMoveToUndo);
        }
        if self.undo_request.is_some() {
            return Err(IllegalUndoError::AlreadyRequested);
        }
        self.undo_request = Some(seat);
        debug!(room = %self.id, seat, "undo requested");
        Ok(vec![RoomEvent::UndoRequested { by: seat }])
    }

    /// Settles a pending pvp undo request. Only the seat that did not
    /// ask may answer; a decline just clears the request.
    pub fn respond_undo(
        &mut self,
        client: ClientId,
        accept: bool,
        now: Instant,
    ) -> Result<Vec<RoomEvent>, IllegalUndoError> {
        let requester = self
            .undo_request
            .ok_or(IllegalUndoError::NoPendingRequest)?;
        let seat = self
            .seat_of(client)
            .ok_or(IllegalUndoError::NotYourResponse)?;
        if seat == requester {
            return Err(IllegalUndoError::NotYourResponse);
        }

        if accept {
            self.undo_last()?;
            self.undo_request = None;
            self.start_timer(now);
            info!(room = %self.id, requester, "undo accepted");
            Ok(vec![RoomEvent::UndoAccepted { plies: 1 }])
        } else {
            self.undo_request = None;
            debug!(room = %self.id, requester, "undo declined");
            Ok(vec![RoomEvent::UndoDeclined])
        }
    }

    // ---- new game -----------------------------------------------------

    /// Asks for a fresh game on the same board and seats.
    ///
    /// AI rooms reset immediately; AI-vs-AI rooms only for their
    /// owner. Pvp mirrors the undo handshake.
    pub fn request_new_game(
        &mut self,
        client: ClientId,
        now: Instant,
    ) -> Result<Vec<RoomEvent>, NewGameError> {
        match self.mode {
            GameMode::AiVsAi => {
                if client != self.owner {
                    return Err(NewGameError::NotASeat);
                }
                Ok(self.reset(now))
            }
            GameMode::Ai(_) => {
                self.seat_of(client).ok_or(NewGameError::NotASeat)?;
                Ok(self.reset(now))
            }
            GameMode::Pvp => {
                let seat = self.seat_of(client).ok_or(NewGameError::NotASeat)?;
                if self.new_game_request.is_some() {
                    return Err(NewGameError::AlreadyRequested);
                }
                self.new_game_request = Some(seat);
                debug!(room = %self.id, seat, "new game requested");
                Ok(vec![RoomEvent::NewGameRequested { by: seat }])
            }
        }
    }

    /// Settles a pending pvp new-game request.
    pub fn respond_new_game(
        &mut self,
        client: ClientId,
        accept: bool,
        now: Instant,
    ) -> Result<Vec<RoomEvent>, NewGameError> {
        let requester = self
            .new_game_request
            .ok_or(NewGameError::NoPendingRequest)?;
        let seat = self.seat_of(client).ok_or(NewGameError::NotYourResponse)?;
        if seat == requester {
            return Err(NewGameError::NotYourResponse);
        }
        self.new_game_request = None;
        if accept {
            Ok(self.reset(now))
        } else {
            debug!(room = %self.id, requester, "new game declined");
            Ok(vec![RoomEvent::NewGameDeclined])
        }
    }

    /// Fresh board, same seats, Black starts. Restarts the timer and,
    /// in AI-vs-AI rooms, schedules the opening move.
    pub fn reset(&mut self, now: Instant) -> Vec<RoomEvent> {
        self.board = Board::new(self.board.size());
        self.current = 0;
        self.outcome = None;
        self.last_move = None;
        self.history.clear();
        self.undo_request = None;
        self.new_game_request = None;
        self.generation += 1;
        self.timer = None;
        self.pending_ai = None;
        info!(room = %self.id, "new game started");

        if self.status == RoomStatus::InProgress {
            self.start_timer(now);
        }
        if self.mode == GameMode::AiVsAi {
            self.schedule_ai(now + AI_VS_AI_FIRST_MOVE_DELAY);
        }
        vec![RoomEvent::NewGameStarted]
    }

    // ---- leaving ------------------------------------------------------

    /// Voluntary exit. A seated player leaving ends the room for
    /// everyone at once; spectators just slip out, except that the
    /// owner of an AI-vs-AI room takes it down with them.
    pub fn handle_leave(&mut self, client: ClientId) -> Vec<RoomEvent> {
        if self.seat_of(client).is_some() {
            return self.close(CloseReason::PlayerLeft);
        }
        if client == self.owner && self.mode == GameMode::AiVsAi {
            return self.close(CloseReason::OwnerLeft);
        }
        match self.remove_spectator(client) {
            Some(event) => vec![event],
            None => Vec::new(),
        }
    }

    /// Connection drop. Seated players get a reconnect window instead
    /// of losing the game outright.
    pub fn handle_disconnect(&mut self, client: ClientId, now: Instant) -> Vec<RoomEvent> {
        if let Some(seat) = self.seat_of(client) {
            if self.graces.iter().any(|g| g.seat == seat) {
                return Vec::new();
            }
            self.graces.push(DisconnectGrace {
                seat,
                deadline: now + DISCONNECT_GRACE,
            });
            let name = self.seats[seat].name.clone();
            warn!(room = %self.id, seat, name = %name, "player disconnected, holding seat");
            return vec![RoomEvent::PlayerDisconnected { seat, name }];
        }

        if let Some(event) = self.remove_spectator(client) {
            return vec![event];
        }

        // A creator who never sat down takes their unstarted room (or
        // their AI-vs-AI room) with them.
        if client == self.owner
            && (self.status == RoomStatus::Waiting || self.mode == GameMode::AiVsAi)
        {
            return self.close(CloseReason::OwnerLeft);
        }
        Vec::new()
    }

    /// Marks the room finished. The registry broadcasts the closing
    /// events with a final snapshot, then drops the room.
    pub(crate) fn close(&mut self, reason: CloseReason) -> Vec<RoomEvent> {
        self.closing = true;
        self.timer = None;
        self.pending_ai = None;
        self.graces.clear();
        info!(room = %self.id, ?reason, "room closing");
        vec![RoomEvent::RoomClosing { reason }]
    }

    // ---- settings -----------------------------------------------------

    /// Adopts new server settings mid-flight, starting or stopping the
    /// live countdown to match.
    pub fn apply_settings(&mut self, settings: Settings, now: Instant) {
        self.settings = settings;
        if !self.settings.timer_enabled {
            self.timer = None;
        } else if self.timer.is_none()
            && self.status == RoomStatus::InProgress
            && self.outcome.is_none()
        {
            self.start_timer(now);
        }
    }

    // ---- scheduling ---------------------------------------------------

    /// Starts the countdown for the seat on turn, replacing any running
    /// timer. No-op while disabled, waiting, or finished.
    fn start_timer(&mut self, now: Instant) {
        self.timer = None;
        if self.settings.timer_enabled && self.seats.len() == 2 && self.outcome.is_none() {
            self.timer = Some(TurnTimer::start(now, self.settings.timer_duration()));
            debug!(room = %self.id, seat = self.current, secs = self.settings.timer_duration_secs, "turn timer started");
        }
    }

    /// Queues a deferred AI move when the seat on turn is an AI.
    fn schedule_ai_reply(&mut self, now: Instant) {
        self.pending_ai = None;
        if self.outcome.is_some() || self.seats.len() < 2 {
            return;
        }
        if !self.seats[self.current].occupant.is_ai() {
            return;
        }
        let delay = if self.mode == GameMode::AiVsAi {
            AI_VS_AI_PACING
        } else {
            AI_MOVE_DELAY
        };
        self.schedule_ai(now + delay);
    }

    fn schedule_ai(&mut self, due: Instant) {
        self.pending_ai = Some(PendingAiMove {
            due,
            generation: self.generation,
        });
    }

    /// Earliest instant at which [`Self::tick`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer
            .map(|t| t.deadline)
            .into_iter()
            .chain(self.pending_ai.map(|p| p.due))
            .chain(self.graces.iter().map(|g| g.deadline))
            .min()
    }

    /// Processes every deadline that has come due.
    ///
    /// Order matters: an expired grace closes the room outright; an
    /// expired timer skips the turn (which invalidates any queued AI
    /// move); a due AI move plays only if the room state it was
    /// scheduled against is still current.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let mut report = TickReport::default();
        if self.closing {
            return report;
        }

        if let Some(idx) = self.graces.iter().position(|g| g.deadline <= now) {
            let grace = self.graces[idx];
            let name = self.seats[grace.seat].name.clone();
            warn!(room = %self.id, seat = grace.seat, name = %name, "reconnect window expired");
            report.events.extend(self.close(CloseReason::GraceExpired));
            return report;
        }

        if let Some(timer) = self.timer {
            if timer.deadline <= now && self.outcome.is_none() {
                report.events.extend(self.skip_turn(now));
            }
        }

        if let Some(pending) = self.pending_ai {
            if pending.due <= now {
                self.pending_ai = None;
                if pending.generation == self.generation {
                    report.events.extend(self.play_ai_move(now));
                } else {
                    debug!(
                        room = %self.id,
                        scheduled = pending.generation,
                        current = self.generation,
                        "dropping stale AI move"
                    );
                }
            }
        }
        report
    }

    /// Timer expiry: the seat on turn forfeits it. The timer restarts
    /// for the other seat, and an AI picks the turn up as usual.
    fn skip_turn(&mut self, now: Instant) -> Vec<RoomEvent> {
        let from = self.current;
        self.current = 1 - self.current;
        self.generation += 1;
        info!(room = %self.id, from, to = self.current, "turn timer expired, turn skipped");
        let events = vec![RoomEvent::TurnSkipped {
            from,
            to: self.current,
        }];
        self.start_timer(now);
        self.schedule_ai_reply(now);
        events
    }

    /// Runs the engine for the AI seat on turn and commits its move
    /// through the normal path. A failed search stalls the turn.
    fn play_ai_move(&mut self, now: Instant) -> Vec<RoomEvent> {
        let seat = self.current;
        let difficulty = match self.seats[seat].occupant {
            SeatOccupant::Ai { difficulty } => difficulty,
            SeatOccupant::Human { .. } => return Vec::new(),
        };
        let ai_stone = self.seats[seat].stone;

        let mut engine = AiEngine::with_budget(difficulty, self.settings.mcts_budget());
        let choice = engine.choose_move(&self.board, ai_stone, ai_stone.opponent());
        let pos = match choice.best_move {
            Some(pos) => pos,
            None => {
                error!(room = %self.id, seat, %difficulty, "AI failed to produce a move");
                return vec![RoomEvent::AiFailed { seat }];
            }
        };
        debug!(
            room = %self.id,
            seat,
            row = pos.row,
            col = pos.col,
            kind = ?choice.kind,
            nodes = choice.nodes,
            time_ms = choice.time_ms,
            "AI move chosen"
        );
        self.commit_move(pos, now)
    }

    // ---- views --------------------------------------------------------

    #[must_use]
    pub fn snapshot(&self, now: Instant) -> RoomSnapshot {
        let (winner, winning_line, is_draw) = match self.outcome {
            Some(GameOutcome::Win { seat, line }) => (Some(seat), Some(line), false),
            Some(GameOutcome::Draw) => (None, None, true),
            None => (None, None, false),
        };
        RoomSnapshot {
            room_id: self.id.clone(),
            board: self.board.rows(),
            board_size: self.board.size(),
            seats: self
                .seats
                .iter()
                .map(|seat| SeatSnapshot {
                    id: seat.occupant.client_id(),
                    name: seat.name.clone(),
                    symbol: seat.symbol(),
                    is_ai: seat.occupant.is_ai(),
                })
                .collect(),
            spectators: self.spectators.iter().map(|s| s.name.clone()).collect(),
            status: self.status,
            current_player: self.current,
            game_over: self.outcome.is_some(),
            winner,
            winning_line,
            is_draw,
            last_move: self.last_move,
            can_undo: !self.history.is_empty() && self.outcome.is_none(),
            timer: TimerSnapshot {
                enabled: self.settings.timer_enabled,
                duration_secs: self.settings.timer_duration_secs,
                remaining_secs: self.timer.as_ref().map(|t| t.remaining_secs(now)),
            },
            undo_enabled: self.settings.undo_enabled,
            game_mode: self.mode,
        }
    }

    fn seat_of(&self, client: ClientId) -> Option<usize> {
        self.seats
            .iter()
            .position(|seat| seat.occupant.client_id() == Some(client))
    }
}
