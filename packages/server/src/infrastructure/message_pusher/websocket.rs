//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` の管理
//! - グループ（`game_{code}`）の購読者管理
//! - 個別送信（push_to）とグループ配信（publish）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信者自身へのエコーの除外は、受信側の Gateway が `Delivery::is_echo_for` で行います。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Delivery, GroupKey, MessagePushError, MessagePusher, PusherChannel, RoomEvent,
};

/// 接続とグループの対応表
#[derive(Default)]
struct Routing {
    /// 接続中のクライアントの送信チャンネル
    clients: HashMap<ConnectionId, PusherChannel>,
    /// グループ名 → 購読者（購読順）
    groups: HashMap<GroupKey, Vec<ConnectionId>>,
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(connection_id.clone(), tx).await;
/// pusher.subscribe(&GroupKey::for_room(&code), &connection_id).await;
/// pusher.publish(&GroupKey::for_room(&code), Delivery::to_all(event)).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    routing: Mutex<Routing>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// グループの現在の購読者数
    pub async fn subscriber_count(&self, group: &GroupKey) -> usize {
        let routing = self.routing.lock().await;
        routing.groups.get(group).map_or(0, Vec::len)
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut routing = self.routing.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        routing.clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut routing = self.routing.lock().await;
        routing.clients.remove(connection_id);
        for members in routing.groups.values_mut() {
            members.retain(|member| member != connection_id);
        }
        routing.groups.retain(|_, members| !members.is_empty());
        tracing::debug!("Connection '{}' unregistered from MessagePusher", connection_id);
    }

    async fn subscribe(&self, group: &GroupKey, connection_id: &ConnectionId) {
        let mut routing = self.routing.lock().await;
        let members = routing.groups.entry(group.clone()).or_default();
        if !members.contains(connection_id) {
            members.push(connection_id.clone());
        }
        tracing::debug!("Connection '{}' subscribed to '{}'", connection_id, group);
    }

    async fn unsubscribe(&self, group: &GroupKey, connection_id: &ConnectionId) {
        let mut routing = self.routing.lock().await;
        if let Some(members) = routing.groups.get_mut(group) {
            members.retain(|member| member != connection_id);
            if members.is_empty() {
                routing.groups.remove(group);
            }
        }
        tracing::debug!("Connection '{}' unsubscribed from '{}'", connection_id, group);
    }

    async fn discard_group(&self, group: &GroupKey) {
        let mut routing = self.routing.lock().await;
        if routing.groups.remove(group).is_some() {
            tracing::debug!("Group '{}' discarded", group);
        }
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: RoomEvent,
    ) -> Result<(), MessagePushError> {
        let routing = self.routing.lock().await;

        let sender = routing
            .clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.as_str().to_string()))?;
        sender
            .send(Delivery::to_all(event))
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;

        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn publish(
        &self,
        group: &GroupKey,
        delivery: Delivery,
    ) -> Result<usize, MessagePushError> {
        let routing = self.routing.lock().await;

        let Some(members) = routing.groups.get(group) else {
            tracing::debug!("Group '{}' has no subscribers", group);
            return Ok(0);
        };

        let mut delivered = 0;
        for member in members {
            match routing.clients.get(member) {
                // 配信では一部の送信失敗を許容
                Some(sender) => match sender.send(delivery.clone()) {
                    Ok(()) => delivered += 1,
                    Err(e) => tracing::warn!(
                        "Failed to publish message to connection '{}': {}",
                        member,
                        e
                    ),
                },
                None => tracing::debug!(
                    "Connection '{}' in '{}' is gone, skipping",
                    member,
                    group
                ),
            }
        }

        tracing::debug!("Published message to {} connection(s) in '{}'", delivered, group);
        Ok(delivered)
    }
}
