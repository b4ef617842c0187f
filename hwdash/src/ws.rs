//! Minimal WebSocket client for the named-message protocol.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use crate::error::SyncResult;
use crate::proto::{Inbound, Outbound};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// Connect to the agent and return the WS stream
pub async fn connect(url: &str) -> SyncResult<WsStream> {
    let (ws, _) = connect_async(url).await?;
    debug!(%url, "connected");
    Ok(ws)
}

pub async fn send(ws: &mut WsStream, msg: &Outbound) -> SyncResult<()> {
    let text = msg.encode()?;
    ws.send(Message::Text(text)).await?;
    Ok(())
}

/// Next decodable inbound message. `None` once the server closes the stream.
///
/// Frames that fail to decode are logged and skipped.
pub async fn recv(ws: &mut WsStream) -> SyncResult<Option<Inbound>> {
    while let Some(frame) = ws.next().await {
        match frame? {
            Message::Text(text) => match Inbound::decode(&text) {
                Ok(msg) => return Ok(Some(msg)),
                Err(e) => warn!(error = %e, "skipping undecodable frame"),
            },
            Message::Close(_) => return Ok(None),
            _ => {}
        }
    }
    Ok(None)
}
