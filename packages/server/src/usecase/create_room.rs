//! UseCase: ルーム作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//! - コードの採番（重複時の引き直し）、ホストのグループ登録、room_created の送信
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム作成
//! - エッジケース：既存ルームと同じコードを引いた場合
//! - エッジケース：削除済みルームと同じコードのグループに古い購読者が残っていた場合

use std::sync::Arc;

use crate::domain::{
    ConnectionId, GroupKey, MessagePusher, RoomCode, RoomCodeGenerator, RoomEvent,
    RoomRepository,
};

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// ルームコードの生成器
    generator: Arc<dyn RoomCodeGenerator>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        generator: Arc<dyn RoomCodeGenerator>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            generator,
        }
    }

    /// ルーム作成を実行
    ///
    /// # Arguments
    ///
    /// * `host` - ルームを作成する接続の ID（Domain Model）
    ///
    /// # Returns
    ///
    /// 採番されたルームコード。生存中の他のルームとは重複しない。
    pub async fn execute(&self, host: ConnectionId) -> RoomCode {
        // 1. Repository でコードを採番して Room を登録
        let code = self
            .repository.create_room(host.clone(), self.generator.as_ref()).await;

        // 2. グループを作り直してホストを登録
        //    同じコードの削除済みルームの購読者が残っていても引き継がない
        let group = GroupKey::for_room(&code);
        self.message_pusher.discard_group(&group).await;
        self.message_pusher.subscribe(&group, &host).await;

        // 3. 作成者に room_created を送信
        if let Err(e) = self
            .message_pusher
            .push_to(&host, RoomEvent::RoomCreated(code.clone()))
            .await
        {
            tracing::warn!("Failed to send room_created to '{}': {}", host, e);
        }

        tracing::info!("Room '{}' created by '{}'", code, host);
        code
    }
}
