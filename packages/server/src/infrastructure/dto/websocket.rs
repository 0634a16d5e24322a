//! WebSocket envelope DTOs.
//!
//! Every envelope is a JSON object with a `type` discriminator.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Inbound envelope (client → server)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    CreateRoom,
    JoinRoom {
        #[serde(default, deserialize_with = "string_or_none")]
        room_code: Option<String>,
    },
    GameStateUpdate {
        #[serde(default, deserialize_with = "string_or_none")]
        room_code: Option<String>,
        #[serde(rename = "gameState", default)]
        game_state: Value,
    },
    PlayerReady {
        #[serde(default, deserialize_with = "string_or_none")]
        room_code: Option<String>,
    },
    /// Unrecognized `type`; ignored by the gateway
    #[serde(other)]
    Unknown,
}

/// A `room_code` that is not a JSON string is treated as absent
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(Some(value)),
        _ => Ok(None),
    }
}

/// Outbound envelope (server → client)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    ConnectionEstablished,
    RoomCreated {
        room_code: String,
    },
    RoomJoined {
        room_code: String,
    },
    GameStateUpdate {
        #[serde(rename = "gameState")]
        game_state: Value,
    },
    PlayerJoined {
        player: u8,
    },
    PlayerReady {
        player: String,
    },
    Error {
        message: String,
    },
}

/// Failure to decode an inbound envelope
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Message must be a JSON object")]
    NotAnObject,

    #[error("Invalid message: {0}")]
    InvalidMessage(#[source] serde_json::Error),
}

/// Decode a text frame into a [`ClientMessage`].
///
/// A frame whose `type` is missing or not a string decodes to [`ClientMessage::Unknown`].
pub fn decode_client_message(text: &str) -> Result<ClientMessage, DecodeError> {
    let value: Value = serde_json::from_str(text).map_err(DecodeError::InvalidJson)?;

    let Some(object) = value.as_object() else {
        return Err(DecodeError::NotAnObject);
    };
    if !object.get("type").is_some_and(Value::is_string) {
        return Ok(ClientMessage::Unknown);
    }

    serde_json::from_value(value).map_err(DecodeError::InvalidMessage)
}
