//! UseCase: 準備完了通知処理
//!
//! game_state_update と異なり、送信者自身にも通知が届く。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Delivery, GroupKey, MessagePusher, RoomCode, RoomEvent, RoomRepository,
};

use super::error::PlayerReadyError;

/// 準備完了通知のユースケース
pub struct PlayerReadyUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl PlayerReadyUseCase {
    /// 新しい PlayerReadyUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 準備完了通知を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 配信を受け付けたチャンネル数
    /// * `Err(PlayerReadyError)` - ルームが存在しない、または配信に失敗
    pub async fn execute(
        &self,
        player: ConnectionId,
        code: RoomCode,
    ) -> Result<usize, PlayerReadyError> {
        if !self.repository.contains_room(&code).await {
            return Err(PlayerReadyError::RoomNotFound);
        }

        self.message_pusher
            .publish(
                &GroupKey::for_room(&code),
                Delivery::to_all(RoomEvent::PlayerReady(player)),
            )
            .await
            .map_err(|e| PlayerReadyError::BroadcastFailed(e.to_string()))
    }
}
