//! Persistent settings: JSON file under the XDG config dir,
//! $XDG_CONFIG_HOME/hwdash/settings.json (fallback ~/.config/hwdash/settings.json).

use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::widget::DEFAULT_HISTORY_CAP;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7681;
pub const DEFAULT_TICK_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    // how often repeating requests are re-sent
    pub tick_ms: u64,
    // samples kept per chart
    pub history_cap: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            tick_ms: DEFAULT_TICK_MS,
            history_cap: DEFAULT_HISTORY_CAP,
        }
    }
}

impl Settings {
    pub fn url(&self) -> String {
        format!("ws://{}:{}/ws", self.host, self.port)
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("hwdash")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hwdash")
    }
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn log_path() -> PathBuf {
    config_dir().join("hwdash.log")
}

pub fn load_settings() -> Settings {
    match fs::read_to_string(settings_path()) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring malformed settings file");
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

pub fn save_settings(s: &Settings) -> std::io::Result<()> {
    let path = settings_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(path, data)
}

/// Command-line values that override the settings file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tick_ms: Option<u64>,
}

impl Overrides {
    pub fn apply(self, mut s: Settings) -> Settings {
        if let Some(h) = self.host {
            s.host = h;
        }
        if let Some(p) = self.port {
            s.port = p;
        }
        if let Some(t) = self.tick_ms {
            s.tick_ms = t.max(1);
        }
        s
    }
}
