//! Value Objects
//!
//! 不変で、値そのものが同一性を表すドメインの型を定義します。

use std::fmt;

use rand::Rng;
use serde_json::Value;
use uuid::Uuid;

use super::error::ValueObjectError;

/// 接続 ID
///
/// 1 本の WebSocket 接続を識別する。接続の生存期間中は不変で、プロセス外では意味を持たない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        Ok(Self(value))
    }

    /// UUID v4 から新しい接続 ID を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ルームコード（英大文字 4 文字）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomCode(String);

impl RoomCode {
    /// コードの文字数
    pub const LENGTH: usize = 4;

    /// コードに使う文字集合
    pub const ALPHABET: &'static [u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let valid = value.len() == Self::LENGTH && value.bytes().all(|b| b.is_ascii_uppercase());
        if !valid {
            return Err(ValueObjectError::InvalidRoomCode {
                expected: Self::LENGTH,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// 乱数源からコードを 1 つ引く
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let code = (0..Self::LENGTH)
            .map(|_| Self::ALPHABET[rng.random_range(0..Self::ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomCode {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ブロードキャストグループ名
///
/// Room ごとに `game_{code}` の形式で 1 つ存在する。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn for_room(code: &RoomCode) -> Self {
        Self(format!("game_{}", code.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ゲーム状態
///
/// 中身は検証しない不透明なペイロード。
#[derive(Debug, Clone, PartialEq)]
pub struct GameState(Value);

impl GameState {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// 途中参加者に送る価値のある状態か
    ///
    /// `null`・`false`・`0`・空文字列・空配列・空オブジェクトは未設定として扱う。
    pub fn is_set(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(value) => *value,
            Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
            Value::String(value) => !value.is_empty(),
            Value::Array(values) => !values.is_empty(),
            Value::Object(fields) => !fields.is_empty(),
        }
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}
