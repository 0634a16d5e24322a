//! UseCase 層
//!
//! 受信した envelope の種類ごとに 1 つのユースケースを提供します。
//! Room の存在・参加者・ゲーム状態に関する判断は全てこの層で行います。

mod create_room;
mod disconnect_connection;
mod error;
mod establish_connection;
mod join_room;
mod player_ready;
mod update_game_state;

pub use create_room::CreateRoomUseCase;
pub use disconnect_connection::DisconnectConnectionUseCase;
pub use error::{JoinRoomError, PlayerReadyError, UpdateGameStateError};
pub use establish_connection::EstablishConnectionUseCase;
pub use join_room::JoinRoomUseCase;
pub use player_ready::PlayerReadyUseCase;
pub use update_game_state::UpdateGameStateUseCase;

#[cfg(test)]
mod test_support;
