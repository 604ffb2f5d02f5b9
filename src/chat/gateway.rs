//! Chat Gateway (stub)
//! Mission: accept WebSocket connections and answer chat events with
//! placeholder payloads until the chat-tracking service is wired in

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::Response,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Incoming chat frame: `{"event": "...", "data": ...}`.
#[derive(Debug, Deserialize)]
struct ChatFrame {
    event: String,
    #[serde(default)]
    data: Value,
}

/// GET /ws
pub async fn chat_handler(ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(handle_socket)
}

async fn handle_socket(mut socket: WebSocket) {
    info!("💬 Chat client connected");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                if let Some(reply) = dispatch(&text) {
                    if socket.send(Message::Text(reply)).await.is_err() {
                        break;
                    }
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    info!("💬 Chat client disconnected");
}

/// Route one chat event to its stub reply. Unknown events and unparseable
/// frames are ignored.
fn dispatch(raw: &str) -> Option<String> {
    let frame: ChatFrame = match serde_json::from_str(raw) {
        Ok(frame) => frame,
        Err(e) => {
            debug!("Ignoring malformed chat frame: {}", e);
            return None;
        }
    };

    let reply = match frame.event.as_str() {
        // Echoes, as the gateway contract promises
        "identity" | "events" => frame.data,
        "user-connected" => json!({ "message": "User connected" }),
        "unread" => json!({ "unReadCount": 0 }),
        "send-message" => json!({ "delivered": false, "message": frame.data }),
        "chat-listing" | "chat-history" => json!({
            "items": [],
            "page": {
                "page": frame.data.get("page").cloned().unwrap_or(Value::from(1)),
                "limit": frame.data.get("limit").cloned().unwrap_or(Value::from(10)),
            },
        }),
        _ => return None,
    };

    serde_json::to_string(&json!({ "event": frame.event, "data": reply })).ok()
}
