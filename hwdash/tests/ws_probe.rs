use hwdash::proto::{Inbound, Outbound};
use hwdash::ws::{connect, recv, send};

// Integration probe: only runs when HWDASH_WS is set to an agent WebSocket URL.
// Example: HWDASH_WS=ws://127.0.0.1:7681/ws cargo test -p hwdash --test ws_probe -- --nocapture
#[tokio::test]
async fn probe_handshake_and_snapshot() {
    let url = match std::env::var("HWDASH_WS") {
        Ok(v) if !v.is_empty() => v,
        _ => {
            eprintln!("skipping ws_probe: set HWDASH_WS=ws://host:port/ws to run this integration test");
            return;
        }
    };

    let mut ws = connect(&url).await.expect("connect ws");

    // The server greets with its config
    let first = recv(&mut ws).await.expect("recv").expect("message");
    assert!(matches!(first, Inbound::ClientData(_)), "got {}", first.name());

    send(&mut ws, &Outbound::GetHardwareData).await.expect("send");
    let hw = recv(&mut ws).await.expect("recv").expect("message");
    assert!(matches!(hw, Inbound::HardwareData(_)), "got {}", hw.name());
}
