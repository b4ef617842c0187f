//! One-shot SMART reports through `smartctl`, one per drive device.

use once_cell::sync::OnceCell;
use tokio::process::Command;
use tracing::debug;

fn smart_enabled() -> bool {
    static ON: OnceCell<bool> = OnceCell::new();
    *ON.get_or_init(|| {
        std::env::var("HWDASH_AGENT_SMART")
            .map(|v| v != "0")
            .unwrap_or(true)
    })
}

pub async fn smart_reports(devices: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(devices.len());
    for dev in devices {
        out.push(report(dev).await);
    }
    out
}

async fn report(dev: &str) -> String {
    if !smart_enabled() {
        return format!("S.M.A.R.T. disabled for {dev}");
    }
    // smartctl sets status bits in its exit code even on success; judge by output
    match Command::new("smartctl")
        .args(["-H", "-A", &format!("/dev/{dev}")])
        .output()
        .await
    {
        Ok(o) if !o.stdout.is_empty() => String::from_utf8_lossy(&o.stdout).trim().to_string(),
        Ok(_) => format!("S.M.A.R.T. unavailable for {dev}"),
        Err(e) => {
            debug!("smartctl failed for {dev}: {e}");
            format!("S.M.A.R.T. unavailable for {dev}")
        }
    }
}
