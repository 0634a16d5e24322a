//! ドメイン層
//!
//! Room・接続 ID・ゲーム状態などのドメインモデルと、
//! 外部依存（ストレージ・メッセージ配信）のインターフェースを定義します。

pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{MAX_PLAYERS, Room, Session};
pub use error::{MessagePushError, RepositoryError, RoomError, ValueObjectError};
pub use factory::{RandomRoomCodeGenerator, RoomCodeGenerator, SequenceRoomCodeGenerator};
pub use message_pusher::{Delivery, MessagePusher, PusherChannel, RoomEvent};
pub use repository::RoomRepository;
pub use value_object::{ConnectionId, GameState, GroupKey, RoomCode};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
