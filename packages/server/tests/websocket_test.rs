//! End-to-end tests over real WebSocket connections.
//!
//! Each test starts an in-process server on an ephemeral port and drives it with
//! tokio-tungstenite clients.

use std::{sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use pairroom_server::{
    domain::SequenceRoomCodeGenerator,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::{AppState, Server},
};
use serde_json::{Value, json};
use tokio::{net::TcpStream, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Start a server whose room codes come from `codes` in order
async fn start_server(codes: &[&str]) -> String {
    let state = AppState::new(
        Arc::new(InMemoryRoomRepository::new()),
        Arc::new(WebSocketMessagePusher::new()),
        Arc::new(SequenceRoomCodeGenerator::from_strs(codes).unwrap()),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(Server::new(state).serve(listener, std::future::pending()));
    format!("ws://{}/ws/game", addr)
}

struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect and consume the `connection_established` envelope
    async fn connect(url: &str) -> Self {
        let (stream, _) = connect_async(url).await.unwrap();
        let mut client = Self { stream };
        assert_eq!(
            client.recv().await,
            json!({"type": "connection_established"})
        );
        client
    }

    async fn send(&mut self, value: Value) {
        self.send_text(value.to_string()).await;
    }

    async fn send_text(&mut self, text: String) {
        self.stream.send(Message::Text(text.into())).await.unwrap();
    }

    /// Next JSON text frame (panics on timeout)
    async fn recv(&mut self) -> Value {
        loop {
            let msg = timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("timed out waiting for a message")
                .expect("stream ended")
                .unwrap();
            if let Message::Text(text) = msg {
                return serde_json::from_str(text.as_str()).unwrap();
            }
        }
    }

    /// Assert that no text frame arrives within a short window
    async fn expect_silence(&mut self) {
        let result = timeout(Duration::from_millis(200), self.stream.next()).await;
        assert!(result.is_err(), "unexpected message: {:?}", result);
    }

    async fn close(mut self) {
        self.stream.close(None).await.unwrap();
    }
}

#[tokio::test]
async fn test_two_player_session() {
    // テスト項目: 作成 → 参加 → 状態中継 → 準備完了 → ホスト切断 の一連の流れ
    // given (前提条件):
    let url = start_server(&["ABCD"]).await;
    let mut host = TestClient::connect(&url).await;
    let mut guest = TestClient::connect(&url).await;

    // when (操作): ホストがルームを作成
    host.send(json!({"type": "create_room"})).await;

    // then (期待する結果):
    assert_eq!(
        host.recv().await,
        json!({"type": "room_created", "room_code": "ABCD"})
    );

    // when (操作): ゲストが参加
    guest
        .send(json!({"type": "join_room", "room_code": "ABCD"}))
        .await;

    // then (期待する結果):
    assert_eq!(
        guest.recv().await,
        json!({"type": "room_joined", "room_code": "ABCD"})
    );
    assert_eq!(
        guest.recv().await,
        json!({"type": "player_joined", "player": 2})
    );
    assert_eq!(
        host.recv().await,
        json!({"type": "player_joined", "player": 2})
    );

    // when (操作): ホストが状態を更新
    host.send(json!({
        "type": "game_state_update",
        "room_code": "ABCD",
        "gameState": {"board": [1, 0, 2], "turn": 3}
    }))
    .await;

    // then (期待する結果): ゲストには届く
    assert_eq!(
        guest.recv().await,
        json!({"type": "game_state_update", "gameState": {"board": [1, 0, 2], "turn": 3}})
    );

    // when (操作): ホストが準備完了
    host.send(json!({"type": "player_ready", "room_code": "ABCD"}))
        .await;

    // then (期待する結果): ホストに次に届くのは player_ready（状態更新はエコーされていない）
    let host_ready = host.recv().await;
    assert_eq!(host_ready["type"], "player_ready");
    let guest_ready = guest.recv().await;
    assert_eq!(guest_ready, host_ready);

    // when (操作): ホストが切断
    host.close().await;

    // then (期待する結果): ルームが消え、以後の参加は "Room not found" になる
    // 切断処理は非同期なので、満員の間は再試行する
    let mut late = TestClient::connect(&url).await;
    let mut last_error = Value::Null;
    for _ in 0..50 {
        late.send(json!({"type": "join_room", "room_code": "ABCD"}))
            .await;
        last_error = late.recv().await;
        if last_error["message"] != "Room is full" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(
        last_error,
        json!({"type": "error", "message": "Room not found"})
    );
    // 残ったゲストには何も通知されない
    guest.expect_silence().await;
}

#[tokio::test]
async fn test_late_joiner_receives_current_state() {
    // テスト項目: 状態のあるルームに参加すると room_joined の直後に現在の状態が届く
    // given (前提条件):
    let url = start_server(&["WXYZ"]).await;
    let mut host = TestClient::connect(&url).await;
    host.send(json!({"type": "create_room"})).await;
    host.recv().await;
    host.send(json!({
        "type": "game_state_update",
        "room_code": "WXYZ",
        "gameState": {"phase": "setup"}
    }))
    .await;
    host.expect_silence().await;

    // when (操作):
    let mut guest = TestClient::connect(&url).await;
    guest
        .send(json!({"type": "join_room", "room_code": "WXYZ"}))
        .await;

    // then (期待する結果):
    assert_eq!(
        guest.recv().await,
        json!({"type": "room_joined", "room_code": "WXYZ"})
    );
    assert_eq!(
        guest.recv().await,
        json!({"type": "game_state_update", "gameState": {"phase": "setup"}})
    );
    assert_eq!(
        guest.recv().await,
        json!({"type": "player_joined", "player": 2})
    );
}

#[tokio::test]
async fn test_third_player_is_rejected() {
    // テスト項目: 2 人いるルームへの参加は "Room is full" になり、既存の 2 人には何も届かない
    // given (前提条件):
    let url = start_server(&["ABCD"]).await;
    let mut host = TestClient::connect(&url).await;
    let mut guest = TestClient::connect(&url).await;
    host.send(json!({"type": "create_room"})).await;
    host.recv().await;
    guest
        .send(json!({"type": "join_room", "room_code": "ABCD"}))
        .await;
    guest.recv().await;
    guest.recv().await;
    host.recv().await;

    // when (操作):
    let mut third = TestClient::connect(&url).await;
    third
        .send(json!({"type": "join_room", "room_code": "ABCD"}))
        .await;

    // then (期待する結果):
    assert_eq!(
        third.recv().await,
        json!({"type": "error", "message": "Room is full"})
    );
    host.expect_silence().await;
    guest.expect_silence().await;
}

#[tokio::test]
async fn test_malformed_and_unknown_messages() {
    // テスト項目: 不正な JSON には error が返り、未知・文字列でない type や不正なコードは無視され、接続は使い続けられる
    // given (前提条件):
    let url = start_server(&["ABCD"]).await;
    let mut client = TestClient::connect(&url).await;

    // when (操作):
    client.send_text("{not json".to_string()).await;
    let error = client.recv().await;
    client.send(json!({"type": "dance"})).await;
    client.send(json!({"type": 1})).await;
    client
        .send(json!({"type": "player_ready", "room_code": 1234}))
        .await;
    client.send(json!({"type": "create_room"})).await;

    // then (期待する結果):
    assert_eq!(error["type"], "error");
    assert!(error["message"].as_str().unwrap().starts_with("Invalid JSON"));
    assert_eq!(
        client.recv().await,
        json!({"type": "room_created", "room_code": "ABCD"})
    );
}

#[tokio::test]
async fn test_http_exposes_only_health() {
    // テスト項目: HTTP はヘルスチェックだけを公開し、ルームの情報は返さない
    // given (前提条件):
    let url = start_server(&["ABCD"]).await;
    let mut host = TestClient::connect(&url).await;
    host.send(json!({"type": "create_room"})).await;
    host.recv().await;

    // when (操作):
    let http_base = url.replace("ws://", "").replace("/ws/game", "");
    let health = http_get(&http_base, "/api/health").await;
    let rooms = http_get(&http_base, "/api/rooms").await;

    // then (期待する結果):
    assert!(health.starts_with("HTTP/1.1 200"));
    assert!(health.contains(r#""status":"ok""#));
    assert!(rooms.starts_with("HTTP/1.1 404"));
    assert!(!rooms.contains("ABCD"));
}

/// Minimal HTTP/1.1 GET over a raw TCP stream
async fn http_get(addr: &str, path: &str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, addr
    );
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    timeout(RECV_TIMEOUT, stream.read_to_string(&mut response))
        .await
        .unwrap()
        .unwrap();
    response
}
