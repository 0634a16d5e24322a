//! WebSocket connection handlers.
//!
//! 1 接続につき受信タスクと送信タスク（pusher_loop）を 1 つずつ起動し、
//! どちらかが終了した時点で切断処理を行う。

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{ConnectionId, Delivery, GameState, RoomCode, Session},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage, decode_client_message},
    ui::state::AppState,
    usecase::JoinRoomError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives deliveries from the rx channel and writes them to the WebSocket.
///
/// Deliveries tagged with this connection as the sender are dropped here, so a group
/// publish never echoes back to its originator.
///
/// # Arguments
///
/// * `connection_id` - The connection this loop writes to
/// * `rx` - Channel receiver registered with the MessagePusher
/// * `sender` - WebSocket sink for this connection
fn pusher_loop(
    connection_id: ConnectionId,
    mut rx: mpsc::UnboundedReceiver<Delivery>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(delivery) = rx.recv().await {
            let Some(text) = render_delivery(&connection_id, delivery) else {
                continue;
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Render a delivery as the JSON text frame `recipient` should see.
///
/// Returns `None` when the delivery is the recipient's own echo.
fn render_delivery(recipient: &ConnectionId, delivery: Delivery) -> Option<String> {
    if delivery.is_echo_for(recipient) {
        return None;
    }

    // Domain Event から DTO への変換
    let message = ServerMessage::from(delivery.event);
    match serde_json::to_string(&message) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::error!("Failed to serialize message for '{}': {}", recipient, e);
            None
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive deliveries
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state.establish_connection_usecase.execute(tx).await;
    tracing::info!("Connection '{}' established", connection_id);

    let session = Arc::new(Mutex::new(Session::new(connection_id.clone())));

    let state_clone = state.clone();
    let session_clone = session.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive messages from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection_id_clone, text);
                    handle_text(&state_clone, &session_clone, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to write deliveries to this connection
    let mut send_task = pusher_loop(connection_id.clone(), rx, sender);

    // If any one of the tasks completes, abort the other
    let recv_finished = tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            true
        }
        _ = &mut send_task => {
            recv_task.abort();
            false
        }
    };
    // An in-flight create must settle before the disconnect scan
    if !recv_finished {
        let _ = recv_task.await;
    }

    let session = session.lock().await.clone();
    let removed = state
        .disconnect_connection_usecase
        .execute(&session)
        .await;
    tracing::info!(
        "Connection '{}' closed ({} room(s) removed)",
        connection_id,
        removed.len()
    );
}

/// Dispatch one inbound text frame.
///
/// Malformed frames produce an `error` envelope for the sender only. Unknown
/// `type`s are ignored, as are game_state_update / player_ready for rooms
/// that do not exist.
async fn handle_text(state: &AppState, session: &Mutex<Session>, text: &str) {
    let connection_id = session.lock().await.connection_id.clone();

    let message = match decode_client_message(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Failed to decode message from '{}': {}", connection_id, e);
            state
                .establish_connection_usecase
                .notify_error(&connection_id, e.to_string())
                .await;
            return;
        }
    };

    match message {
        ClientMessage::CreateRoom => {
            let code = state
                .create_room_usecase
                .execute(connection_id.clone())
                .await;
            session.lock().await.bind(code);
        }
        ClientMessage::JoinRoom { room_code } => {
            let result = match room_code.map(RoomCode::try_from) {
                Some(Ok(code)) => {
                    state
                        .join_room_usecase
                        .execute(connection_id.clone(), code)
                        .await
                }
                _ => Err(JoinRoomError::RoomNotFound),
            };
            match result {
                Ok(code) => session.lock().await.bind(code),
                Err(e) => {
                    tracing::info!("'{}' failed to join: {}", connection_id, e);
                    state
                        .establish_connection_usecase
                        .notify_error(&connection_id, e.to_string())
                        .await;
                }
            }
        }
        ClientMessage::GameStateUpdate {
            room_code,
            game_state,
        } => {
            let Some(Ok(code)) = room_code.map(RoomCode::try_from) else {
                tracing::debug!("Ignoring game_state_update without a valid room_code");
                return;
            };
            if let Err(e) = state
                .update_game_state_usecase
                .execute(connection_id.clone(), code.clone(), GameState::new(game_state))
                .await
            {
                tracing::debug!(
                    "Dropped game_state_update from '{}' for '{}': {}",
                    connection_id,
                    code,
                    e
                );
            }
        }
        ClientMessage::PlayerReady { room_code } => {
            let Some(Ok(code)) = room_code.map(RoomCode::try_from) else {
                tracing::debug!("Ignoring player_ready without a valid room_code");
                return;
            };
            if let Err(e) = state
                .player_ready_usecase
                .execute(connection_id.clone(), code.clone())
                .await
            {
                tracing::debug!(
                    "Dropped player_ready from '{}' for '{}': {}",
                    connection_id,
                    code,
                    e
                );
            }
        }
        ClientMessage::Unknown => {
            tracing::debug!("Ignoring message of unknown type from '{}'", connection_id);
        }
    }
}
