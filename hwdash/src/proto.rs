//! Named-message envelope: `{"name": "...", "data": ...}` per text frame.

use serde::{Deserialize, Serialize};

use crate::error::SyncResult;
use crate::types::{ClientData, HardwareData, SmartData};

/// Messages delivered by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "data", rename_all = "snake_case")]
pub enum Inbound {
    ClientData(ClientData),
    HardwareData(HardwareData),
    SmartData(SmartData),
}

/// Messages sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "data", rename_all = "snake_case")]
pub enum Outbound {
    SetClientData(ClientData),
    GetHardwareData,
    GetSmartData,
}

impl Inbound {
    pub fn decode(text: &str) -> SyncResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Inbound::ClientData(_) => "client_data",
            Inbound::HardwareData(_) => "hardware_data",
            Inbound::SmartData(_) => "smart_data",
        }
    }
}

impl Outbound {
    pub fn encode(&self) -> SyncResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Requests the transport keeps re-sending every tick.
    pub fn is_repeating(&self) -> bool {
        matches!(self, Outbound::GetHardwareData)
    }
}
