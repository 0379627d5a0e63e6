//! Typed failures for room operations
//!
//! All of these are recoverable: a rejected operation reports why and
//! leaves the room untouched. Errors go to the caller only, never into
//! the room's event stream.

use thiserror::Error;

/// Why a move was rejected. The checks run in exactly this order.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveError {
    #[error("game is over")]
    GameOver,
    #[error("waiting for opponent")]
    WaitingForOpponent,
    #[error("not your turn")]
    NotYourTurn,
    #[error("position is outside the board")]
    OutOfBounds,
    #[error("cell already occupied")]
    CellOccupied,
}

/// Why an undo request or response was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalUndoError {
    #[error("no moves to undo")]
    NothingToUndo,
    #[error("cannot undo after the game is over")]
    GameAlreadyOver,
    #[error("you can only take back your own last move")]
    NotYourMoveToUndo,
    #[error("undo is currently disabled")]
    UndoDisabled,
    #[error("an undo request is already pending")]
    AlreadyRequested,
    #[error("there is no pending undo request")]
    NoPendingRequest,
    #[error("the undo request is not yours to answer")]
    NotYourResponse,
}

/// Why a join or watch was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    #[error("room is full")]
    RoomFull,
    #[error("only AI players are seated in this room")]
    AiOnlyRoom,
    #[error("game has not started yet")]
    NotInProgress,
    #[error("already watching this room")]
    AlreadyWatching,
}

/// Why a new-game request or response was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NewGameError {
    #[error("a new-game request is already pending")]
    AlreadyRequested,
    #[error("there is no pending new-game request")]
    NoPendingRequest,
    #[error("the new-game request is not yours to answer")]
    NotYourResponse,
    #[error("only players can start a new game here")]
    NotASeat,
}
