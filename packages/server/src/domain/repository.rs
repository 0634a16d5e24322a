//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, GameState, RepositoryError, Room, RoomCode, RoomCodeGenerator};

/// Room Repository trait
///
/// 全ての Room を保持するレジストリへのインターフェース。
/// 各メソッドは 1 つの操作を不可分に実行しなければならない
/// （同時に create した 2 接続が同じコードを得たり、残り 1 枠に 2 人が join できたりしないこと）。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 未使用のコードを引くまで `generator` を呼び続け、新しい Room を登録する
    async fn create_room(
        &self,
        host: ConnectionId,
        generator: &dyn RoomCodeGenerator,
    ) -> RoomCode;

    /// プレイヤーを追加し、追加後の Room を返す
    async fn add_player(
        &self,
        code: &RoomCode,
        player: ConnectionId,
    ) -> Result<Room, RepositoryError>;

    /// ゲーム状態を上書き
    async fn update_game_state(
        &self,
        code: &RoomCode,
        state: GameState,
    ) -> Result<(), RepositoryError>;

    /// 指定した接続がホストの Room を全て削除し、削除したコードを返す
    async fn remove_rooms_hosted_by(&self, host: &ConnectionId) -> Vec<RoomCode>;

    /// Room が存在するか
    async fn contains_room(&self, code: &RoomCode) -> bool;

    /// Room を取得
    async fn get_room(&self, code: &RoomCode) -> Result<Room, RepositoryError>;

    /// Room 数を取得
    async fn count_rooms(&self) -> usize;
}
