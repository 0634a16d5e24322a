//! UseCase: ゲーム状態更新処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateGameStateUseCase::execute() メソッド
//! - 状態の上書きと、送信者を除いたグループへの配信
//!
//! ### どのような状況を想定しているか
//! - 正常系：相手にだけ状態が届く（送信者にはエコーされない）
//! - エッジケース：存在しないルームへの更新（何もしない）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Delivery, GameState, GroupKey, MessagePusher, RoomCode, RoomEvent,
    RoomRepository,
};

use super::error::UpdateGameStateError;

/// ゲーム状態更新のユースケース
pub struct UpdateGameStateUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl UpdateGameStateUseCase {
    /// 新しい UpdateGameStateUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ゲーム状態更新を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 配信を受け付けたチャンネル数（送信者自身を含む）
    /// * `Err(UpdateGameStateError)` - ルームが存在しない、または配信に失敗
    pub async fn execute(
        &self,
        sender: ConnectionId,
        code: RoomCode,
        state: GameState,
    ) -> Result<usize, UpdateGameStateError> {
        // 1. Repository 経由で状態を上書き
        self.repository
            .update_game_state(&code, state.clone())
            .await
            .map_err(|_| UpdateGameStateError::RoomNotFound)?;

        // 2. 送信者タグを付けてグループに配信（送信者への描画は受信側で抑止される）
        self.message_pusher
            .publish(
                &GroupKey::for_room(&code),
                Delivery::excluding_sender(RoomEvent::GameStateUpdated(state), sender),
            )
            .await
            .map_err(|e| UpdateGameStateError::BroadcastFailed(e.to_string()))
    }
}
