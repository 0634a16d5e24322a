//! Domain errors.

use thiserror::Error;

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// ConnectionId が空
    #[error("Connection ID must not be empty")]
    ConnectionIdEmpty,

    /// RoomCode の形式が不正
    #[error("Room code must be {expected} uppercase letters, got '{actual}'")]
    InvalidRoomCode { expected: usize, actual: String },
}

/// Room エンティティの操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// 参加人数の上限に達している
    #[error("Room is full (capacity: {0})")]
    Full(usize),
}

/// Repository の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("Room '{0}' is full")]
    RoomFull(String),
}

/// メッセージ配信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 配信先の接続が登録されていない
    #[error("Connection '{0}' not found")]
    ClientNotFound(String),

    /// チャンネルへの送信に失敗（受信側がクローズ済み）
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
