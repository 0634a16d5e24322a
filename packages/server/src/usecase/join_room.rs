//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加の可否判定（存在しない・満員）と、参加時の通知の順序
//!
//! ### なぜこのテストが必要か
//! - 参加者には room_joined → （状態があれば）game_state_update → player_joined の順で届く必要がある
//! - player_joined は参加者本人を含むグループ全員に届く
//!
//! ### どのような状況を想定しているか
//! - 正常系：状態なしのルームへの参加、状態ありのルームへの途中参加
//! - 異常系：存在しないコード、満員のルーム
//! - 競合：参加の途中でホストが切断した場合（グループに古い購読者を残さない）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Delivery, GroupKey, MessagePusher, RoomCode, RoomEvent, RoomRepository,
};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `player` - 参加する接続の ID（Domain Model）
    /// * `code` - 参加先のルームコード（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(RoomCode)` - 参加成功（セッションにバインドするコード）
    /// * `Err(JoinRoomError)` - 参加失敗（どのルームも変更されない）
    pub async fn execute(
        &self,
        player: ConnectionId,
        code: RoomCode,
    ) -> Result<RoomCode, JoinRoomError> {
        // 1. Repository で定員チェックと追加を不可分に行う
        let room = self.repository.add_player(&code, player.clone()).await?;
        let player_number = room.players.len() as u8;

        // 2. グループに登録
        let group = GroupKey::for_room(&code);
        self.message_pusher.subscribe(&group, &player).await;

        // 3. 購読後に Room を読み直す
        //    その間にホストが切断して Room が消えていたら購読を取り消す
        let room = match self.repository.get_room(&code).await {
            Ok(room) if room.players.contains(&player) => room,
            _ => {
                self.message_pusher.unsubscribe(&group, &player).await;
                tracing::info!("Room '{}' closed while '{}' was joining", code, player);
                return Err(JoinRoomError::RoomNotFound);
            }
        };

        // 4. 参加者に room_joined を送信
        self.push(&player, RoomEvent::RoomJoined(code.clone())).await;

        // 5. 状態があれば参加者だけに送る
        //    購読後に読み直した状態なので、登録の直前に届いた更新も取りこぼさない
        if let Some(state) = room.current_game_state().cloned() {
            self.push(&player, RoomEvent::GameStateUpdated(state)).await;
        }

        // 6. グループ全員（参加者本人を含む）に player_joined を配信
        if let Err(e) = self
            .message_pusher
            .publish(
                &group,
                Delivery::to_all(RoomEvent::PlayerJoined(player_number)),
            )
            .await
        {
            tracing::warn!("Failed to publish player_joined to '{}': {}", group, e);
        }

        tracing::info!("'{}' joined room '{}' as player {}", player, code, player_number);
        Ok(code)
    }

    async fn push(&self, connection_id: &ConnectionId, event: RoomEvent) {
        if let Err(e) = self.message_pusher.push_to(connection_id, event).await {
            tracing::warn!("Failed to push to '{}': {}", connection_id, e);
        }
    }
}
