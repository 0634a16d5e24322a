//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## 排他制御
//!
//! レジストリ全体を 1 つの `Mutex` で保護し、各操作はロックを保持したまま完了させます。
//! コードの採番と登録、定員チェックと追加がそれぞれ同じクリティカルセクションで行われるため、
//! 同時リクエストで重複コードや定員超過が発生しません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, GameState, RepositoryError, Room, RoomCode, RoomCodeGenerator, RoomError,
    RoomRepository,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// ルームコード → Room
    rooms: Mutex<HashMap<RoomCode, Room>>,
}

impl InMemoryRoomRepository {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(
        &self,
        host: ConnectionId,
        generator: &dyn RoomCodeGenerator,
    ) -> RoomCode {
        let mut rooms = self.rooms.lock().await;

        let mut code = generator.next_code();
        while rooms.contains_key(&code) {
            tracing::debug!("Room code '{}' already in use, drawing again", code);
            code = generator.next_code();
        }

        rooms.insert(code.clone(), Room::new(code.clone(), host));
        code
    }

    async fn add_player(
        &self,
        code: &RoomCode,
        player: ConnectionId,
    ) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(code)
            .ok_or_else(|| RepositoryError::RoomNotFound(code.as_str().to_string()))?;

        room.add_player(player).map_err(|e| match e {
            RoomError::Full(_) => RepositoryError::RoomFull(code.as_str().to_string()),
        })?;

        Ok(room.clone())
    }

    async fn update_game_state(
        &self,
        code: &RoomCode,
        state: GameState,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(code)
            .ok_or_else(|| RepositoryError::RoomNotFound(code.as_str().to_string()))?;
        room.update_game_state(state);
        Ok(())
    }

    async fn remove_rooms_hosted_by(&self, host: &ConnectionId) -> Vec<RoomCode> {
        let mut rooms = self.rooms.lock().await;
        let hosted: Vec<RoomCode> = rooms
            .values()
            .filter(|room| room.is_hosted_by(host))
            .map(|room| room.code.clone())
            .collect();

        for code in &hosted {
            rooms.remove(code);
        }

        hosted
    }

    async fn contains_room(&self, code: &RoomCode) -> bool {
        let rooms = self.rooms.lock().await;
        rooms.contains_key(code)
    }

    async fn get_room(&self, code: &RoomCode) -> Result<Room, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(code)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(code.as_str().to_string()))
    }

    async fn count_rooms(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}
