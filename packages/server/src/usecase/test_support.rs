//! UseCase テスト用のヘルパー

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, Delivery, MessagePusher, RoomCode, RoomEvent},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
};

pub fn conn(value: &str) -> ConnectionId {
    ConnectionId::new(value.to_string()).unwrap()
}

pub fn code(value: &str) -> RoomCode {
    RoomCode::new(value.to_string()).unwrap()
}

pub fn create_test_repository() -> Arc<InMemoryRoomRepository> {
    Arc::new(InMemoryRoomRepository::new())
}

pub fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::new())
}

/// 接続を MessagePusher に登録し、その接続の受信側を返す
pub async fn connect(
    pusher: &WebSocketMessagePusher,
    connection_id: &ConnectionId,
) -> mpsc::UnboundedReceiver<Delivery> {
    let (tx, rx) = mpsc::unbounded_channel();
    pusher.register_client(connection_id.clone(), tx).await;
    rx
}

/// Gateway と同じ規則で、`recipient` に描画されるイベントだけを取り出す
pub fn drain_rendered(
    rx: &mut mpsc::UnboundedReceiver<Delivery>,
    recipient: &ConnectionId,
) -> Vec<RoomEvent> {
    let mut events = Vec::new();
    while let Ok(delivery) = rx.try_recv() {
        if !delivery.is_echo_for(recipient) {
            events.push(delivery.event);
        }
    }
    events
}
