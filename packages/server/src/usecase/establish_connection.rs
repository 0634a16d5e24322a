//! UseCase: 接続確立処理

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, RoomEvent};

/// 接続確立のユースケース
pub struct EstablishConnectionUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl EstablishConnectionUseCase {
    /// 新しい EstablishConnectionUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続確立を実行
    ///
    /// 新しい接続 ID を採番して送信チャンネルを登録し、`connection_established` を送る。
    ///
    /// # Returns
    ///
    /// 採番した接続 ID（確立通知の送信に失敗してもチャンネルは登録済み）
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();

        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;
        if let Err(e) = self
            .message_pusher
            .push_to(&connection_id, RoomEvent::ConnectionEstablished)
            .await
        {
            tracing::warn!(
                "Failed to send connection_established to '{}': {}",
                connection_id,
                e
            );
        }

        connection_id
    }

    /// 接続元だけに `error` envelope を送る
    pub async fn notify_error(&self, connection_id: &ConnectionId, message: String) {
        if let Err(e) = self
            .message_pusher
            .push_to(connection_id, RoomEvent::Error(message))
            .await
        {
            tracing::warn!("Failed to send error to '{}': {}", connection_id, e);
        }
    }
}
