//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectConnectionUseCase::execute() メソッド
//! - ホストの切断でルームが削除されること、ホスト以外の切断ではルームが残ること
//!
//! ### どのような状況を想定しているか
//! - 正常系：ホストの切断（ルーム削除、残った参加者には通知しない）
//! - エッジケース：ホスト以外の切断（players は変更しない）、ルーム未所属の切断

use std::sync::Arc;

use crate::domain::{GroupKey, MessagePusher, RoomCode, RoomRepository, Session};

/// 切断のユースケース
pub struct DisconnectConnectionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectConnectionUseCase {
    /// 新しい DisconnectConnectionUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// セッションのバインド先に関わらず、切断した接続がホストの全ルームを削除する
    /// （create の完了直後に切断された場合も取りこぼさない）。
    ///
    /// # Returns
    ///
    /// 削除したルームのコード
    pub async fn execute(&self, session: &Session) -> Vec<RoomCode> {
        let connection_id = &session.connection_id;

        // 1. ホストとして所有するルームを削除
        let removed = self.repository.remove_rooms_hosted_by(connection_id).await;

        // 2. 削除したルームのグループを破棄（残った参加者には通知しない）
        for code in &removed {
            self.message_pusher
                .discard_group(&GroupKey::for_room(code))
                .await;
            tracing::info!("Room '{}' removed because host '{}' left", code, connection_id);
        }

        // 3. 送信チャンネルを登録解除
        self.message_pusher.unregister_client(connection_id).await;

        if removed.is_empty()
            && let Some(code) = &session.room_code
        {
            tracing::debug!(
                "'{}' left room '{}' without cleanup (not the host)",
                connection_id,
                code
            );
        }

        removed
    }
}
