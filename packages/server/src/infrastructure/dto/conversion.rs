//! Conversion logic between DTOs and domain models.

use crate::{domain::RoomEvent, infrastructure::dto::websocket::ServerMessage};

// ========================================
// Domain Event → WebSocket DTO
// ========================================

impl From<RoomEvent> for ServerMessage {
    fn from(event: RoomEvent) -> Self {
        match event {
            RoomEvent::ConnectionEstablished => Self::ConnectionEstablished,
            RoomEvent::RoomCreated(code) => Self::RoomCreated {
                room_code: code.into_string(),
            },
            RoomEvent::RoomJoined(code) => Self::RoomJoined {
                room_code: code.into_string(),
            },
            RoomEvent::GameStateUpdated(state) => Self::GameStateUpdate {
                game_state: state.into_value(),
            },
            RoomEvent::PlayerJoined(player) => Self::PlayerJoined { player },
            RoomEvent::PlayerReady(connection_id) => Self::PlayerReady {
                player: connection_id.into_string(),
            },
            RoomEvent::Error(message) => Self::Error { message },
        }
    }
}
