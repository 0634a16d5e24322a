//! Entities
//!
//! ライフサイクルを持ち、ID で識別されるドメインオブジェクトを定義します。

use super::{
    error::RoomError,
    value_object::{ConnectionId, GameState, RoomCode},
};

/// 1 つの Room に参加できる最大人数
pub const MAX_PLAYERS: usize = 2;

/// Room エンティティ
///
/// ## 不変条件
///
/// - `players[0]` は常に `host`
/// - `players.len()` は 1 以上 `MAX_PLAYERS` 以下
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub code: RoomCode,
    pub host: ConnectionId,
    pub players: Vec<ConnectionId>,
    pub game_state: Option<GameState>,
}

impl Room {
    /// ホストだけが参加した新しい Room を作成
    pub fn new(code: RoomCode, host: ConnectionId) -> Self {
        Self {
            code,
            players: vec![host.clone()],
            host,
            game_state: None,
        }
    }

    /// プレイヤーを追加
    ///
    /// 参加後のプレイヤー番号（1 始まり）を返す。
    pub fn add_player(&mut self, player: ConnectionId) -> Result<u8, RoomError> {
        if self.is_full() {
            return Err(RoomError::Full(MAX_PLAYERS));
        }
        self.players.push(player);
        Ok(self.players.len() as u8)
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    pub fn is_hosted_by(&self, connection_id: &ConnectionId) -> bool {
        &self.host == connection_id
    }

    /// ゲーム状態を上書き
    pub fn update_game_state(&mut self, state: GameState) {
        self.game_state = Some(state);
    }

    /// 途中参加者へ送るべきゲーム状態（未設定なら `None`）
    pub fn current_game_state(&self) -> Option<&GameState> {
        self.game_state.as_ref().filter(|state| state.is_set())
    }
}

/// 接続ごとのセッション記録
///
/// Gateway が所有し、現在バインドされているルームコードを保持する。
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub room_code: Option<RoomCode>,
}

impl Session {
    pub fn new(connection_id: ConnectionId) -> Self {
        Self {
            connection_id,
            room_code: None,
        }
    }

    /// create / join に成功したルームへバインドする（以前のバインドは上書き）
    pub fn bind(&mut self, room_code: RoomCode) {
        self.room_code = Some(room_code);
    }
}
