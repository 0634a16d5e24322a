//! Server state.

use std::sync::Arc;

use crate::{
    domain::{MessagePusher, RoomCodeGenerator, RoomRepository},
    usecase::{
        CreateRoomUseCase, DisconnectConnectionUseCase, EstablishConnectionUseCase,
        JoinRoomUseCase, PlayerReadyUseCase, UpdateGameStateUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// EstablishConnectionUseCase（接続確立・エラー通知）
    pub establish_connection_usecase: Arc<EstablishConnectionUseCase>,
    /// CreateRoomUseCase（ルーム作成）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// JoinRoomUseCase（ルーム参加）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// UpdateGameStateUseCase（ゲーム状態更新）
    pub update_game_state_usecase: Arc<UpdateGameStateUseCase>,
    /// PlayerReadyUseCase（準備完了通知）
    pub player_ready_usecase: Arc<PlayerReadyUseCase>,
    /// DisconnectConnectionUseCase（切断）
    pub disconnect_connection_usecase: Arc<DisconnectConnectionUseCase>,
}

impl AppState {
    /// Repository・MessagePusher などの依存から全ての UseCase を組み立てる
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        generator: Arc<dyn RoomCodeGenerator>,
    ) -> Self {
        Self {
            establish_connection_usecase: Arc::new(EstablishConnectionUseCase::new(
                message_pusher.clone(),
            )),
            create_room_usecase: Arc::new(CreateRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                generator,
            )),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            update_game_state_usecase: Arc::new(UpdateGameStateUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            player_ready_usecase: Arc::new(PlayerReadyUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            disconnect_connection_usecase: Arc::new(DisconnectConnectionUseCase::new(
                repository,
                message_pusher,
            )),
        }
    }
}
