//! UseCase errors.
//!
//! `Display` の文言は Gateway がそのまま `error` envelope の message に使う。

use thiserror::Error;

use crate::domain::RepositoryError;

/// join_room のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Room is full")]
    RoomFull,
}

impl From<RepositoryError> for JoinRoomError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::RoomNotFound(_) => Self::RoomNotFound,
            RepositoryError::RoomFull(_) => Self::RoomFull,
        }
    }
}

/// game_state_update のエラー（Gateway では黙って破棄する）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateGameStateError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Broadcast failed: {0}")]
    BroadcastFailed(String),
}

/// player_ready のエラー（Gateway では黙って破棄する）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerReadyError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Broadcast failed: {0}")]
    BroadcastFailed(String),
}
