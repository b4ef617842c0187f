//! hwdash_agent: serves hardware snapshots to hwdash dashboards over WebSocket.

mod gpu;
mod hwmon;
mod metrics;
mod smart;
mod state;
mod types;
mod ws;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use sysinfo::{Components, CpuRefreshKind, RefreshKind, System};
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;
use crate::types::ClientData;
use crate::ws::ws_handler;

const DEFAULT_PORT: u16 = 7681;

fn parse_port<I: IntoIterator<Item = String>>(args: I, default_port: u16) -> u16 {
    let mut it = args.into_iter();
    let _ = it.next(); // program name
    let mut long: Option<String> = None;
    let mut short: Option<String> = None;
    while let Some(a) = it.next() {
        match a.as_str() {
            "--port" => long = it.next(),
            "-p" => short = it.next(),
            _ if a.starts_with("--port=") => {
                if let Some((_, v)) = a.split_once('=') {
                    long = Some(v.to_string());
                }
            }
            _ => {}
        }
    }
    long.or(short)
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(default_port)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = parse_port(std::env::args(), DEFAULT_PORT);

    let mut sys = System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()));
    // Prime cpu usage so the first snapshot has a delta to work from
    sys.refresh_cpu_usage();
    let components = Components::new_with_refreshed_list();
    let drives = hwmon::drives(Path::new(hwmon::HWMON_ROOT));
    let gpus = gpu::enumerate();
    info!("found {} drive sensor(s), {} GPU(s)", drives.len(), gpus.len());

    let hostname = hostname::get()
        .ok()
        .and_then(|s| s.into_string().ok())
        .unwrap_or_else(|| "unknown".into());

    let state = AppState {
        sys: Arc::new(Mutex::new(sys)),
        components: Arc::new(Mutex::new(components)),
        drives: Arc::new(Mutex::new(drives)),
        gpus: Arc::new(Mutex::new(gpus)),
        client_data: Arc::new(RwLock::new(ClientData::default())),
        hostname,
    };

    let app = Router::new().route("/ws", get(ws_handler)).with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("hwdash_agent listening on ws://{}/ws", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_port;

    #[test]
    fn port_long_short_and_assign() {
        assert_eq!(
            parse_port(vec!["agent".into(), "--port".into(), "9001".into()], 7681),
            9001
        );
        assert_eq!(
            parse_port(vec!["agent".into(), "-p".into(), "9002".into()], 7681),
            9002
        );
        assert_eq!(
            parse_port(vec!["agent".into(), "--port=9003".into()], 7681),
            9003
        );
        assert_eq!(parse_port(vec!["agent".into()], 7681), 7681);
        assert_eq!(parse_port(vec!["agent".into(), "-p".into(), "x".into()], 7681), 7681);
    }
}
