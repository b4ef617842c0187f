//! Data types exchanged with the dashboard over WebSocket.
//! Keep this module minimal and stable: it defines the wire format.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Motherboard {
    pub name: String,
    pub fan_list: Vec<f64>,
    pub temp_list: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Cpu {
    pub name: String,
    pub load: f64,
    pub temp: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hdd {
    pub name: String,
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gpu {
    pub name: String,
    pub load: f64,
    pub temp: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HardwareData {
    pub mb: Motherboard,
    pub cpu: Cpu,
    pub hdd_list: Vec<Hdd>,
    pub gpu_list: Vec<Gpu>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientData {
    pub effect: String,
}

impl Default for ClientData {
    fn default() -> Self {
        Self {
            effect: "none".into(),
        }
    }
}

/// `{"name": ..., "data": ...}` requests from the dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "name", content = "data", rename_all = "snake_case")]
pub enum Request {
    SetClientData(ClientData),
    GetHardwareData,
    GetSmartData,
}

/// Replies and greetings sent to the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "name", content = "data", rename_all = "snake_case")]
pub enum Reply {
    ClientData(ClientData),
    HardwareData(HardwareData),
    SmartData(Vec<String>),
}
