//! MessagePusher trait 定義
//!
//! 接続へのメッセージ配信（個別送信・グループ配信）のインターフェースを定義します。
//!
//! ## 自分宛てのエコーの除外
//!
//! グループ配信は購読者を絞り込まない。代わりに `Delivery` に送信者の ID を付け、
//! 受信側の Gateway が自分の ID と比較して描画するかどうかを決める。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, GameState, GroupKey, MessagePushError, RoomCode};

/// 接続ごとの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<Delivery>;

/// 接続へ届けるイベント
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    ConnectionEstablished,
    RoomCreated(RoomCode),
    RoomJoined(RoomCode),
    GameStateUpdated(GameState),
    /// 参加したプレイヤーの番号（1 始まり）
    PlayerJoined(u8),
    PlayerReady(ConnectionId),
    Error(String),
}

/// 配信単位
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub event: RoomEvent,
    /// 送信者。設定されていれば送信者自身には描画しない
    pub sender: Option<ConnectionId>,
}

impl Delivery {
    /// 受信者全員に描画される配信
    pub fn to_all(event: RoomEvent) -> Self {
        Self {
            event,
            sender: None,
        }
    }

    /// 送信者自身には描画されない配信
    pub fn excluding_sender(event: RoomEvent, sender: ConnectionId) -> Self {
        Self {
            event,
            sender: Some(sender),
        }
    }

    /// `recipient` にとって自分自身の送信のエコーかどうか
    pub fn is_echo_for(&self, recipient: &ConnectionId) -> bool {
        self.sender.as_ref() == Some(recipient)
    }
}

/// MessagePusher trait
///
/// UseCase 層はこの trait に依存し、WebSocket などの具体的な配信手段には依存しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除し、全グループから外す
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// グループに接続を追加
    async fn subscribe(&self, group: &GroupKey, connection_id: &ConnectionId);

    /// グループから接続を外す（空になったグループは削除）
    async fn unsubscribe(&self, group: &GroupKey, connection_id: &ConnectionId);

    /// グループを削除
    async fn discard_group(&self, group: &GroupKey);

    /// 1 つの接続に送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// グループの現在の購読者全員に配信し、受け付けたチャンネル数を返す
    ///
    /// 配信中に切断された購読者はスキップされ、エラーにはならない。
    async fn publish(&self, group: &GroupKey, delivery: Delivery)
    -> Result<usize, MessagePushError>;
}
