//! WebSocket upgrade and per-connection handler for the named-message protocol.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::stream::StreamExt;
use tracing::{debug, info, warn};

use crate::metrics::{collect_hardware, drive_devices};
use crate::smart::smart_reports;
use crate::state::AppState;
use crate::types::{Reply, Request};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn send_reply(socket: &mut WebSocket, reply: &Reply) -> Result<(), axum::Error> {
    match serde_json::to_string(reply) {
        Ok(js) => socket.send(Message::Text(js)).await,
        Err(e) => {
            warn!("cannot encode reply: {e}");
            Ok(())
        }
    }
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    // Greet with the current config so the dashboard can seed its session
    let greeting = Reply::ClientData(state.client_data.read().await.clone());
    if send_reply(&mut socket, &greeting).await.is_err() {
        return;
    }
    info!("dashboard connected");

    while let Some(Ok(msg)) = socket.next().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };
        let reply = match serde_json::from_str::<Request>(&text) {
            Ok(Request::GetHardwareData) => Reply::HardwareData(collect_hardware(&state).await),
            Ok(Request::GetSmartData) => Reply::SmartData(smart_reports(&drive_devices(&state).await).await),
            Ok(Request::SetClientData(c)) => {
                info!(effect = %c.effect, "client data updated");
                *state.client_data.write().await = c;
                continue;
            }
            Err(e) => {
                warn!("ignoring malformed request: {e}");
                continue;
            }
        };
        if send_reply(&mut socket, &reply).await.is_err() {
            break;
        }
    }
    debug!("dashboard disconnected");
}
