//! Types that mirror the agent's JSON schema.

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motherboard {
    pub name: String,
    // RPM
    pub fan_list: Vec<f64>,
    // degrees C
    pub temp_list: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cpu {
    pub name: String,
    pub load: f64,
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hdd {
    pub name: String,
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gpu {
    pub name: String,
    pub load: f64,
    pub temp: f64,
}

/// One `hardware_data` push. Every field is required; a payload missing one
/// fails to decode instead of being defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareData {
    pub mb: Motherboard,
    pub cpu: Cpu,
    pub hdd_list: Vec<Hdd>,
    pub gpu_list: Vec<Gpu>,
}

/// Cardinality of every list-valued field of a snapshot. Fixed for a session
/// once the first snapshot has been seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shape {
    pub fans: usize,
    pub temps: usize,
    pub hdds: usize,
    pub gpus: usize,
}

impl HardwareData {
    pub fn shape(&self) -> Shape {
        Shape {
            fans: self.mb.fan_list.len(),
            temps: self.mb.temp_list.len(),
            hdds: self.hdd_list.len(),
            gpus: self.gpu_list.len(),
        }
    }

    /// Reject a snapshot whose list lengths differ from `expected`.
    pub fn check_shape(&self, expected: Shape) -> Result<(), SyncError> {
        let actual = self.shape();
        let fields = [
            ("mb.fan_list", expected.fans, actual.fans),
            ("mb.temp_list", expected.temps, actual.temps),
            ("hdd_list", expected.hdds, actual.hdds),
            ("gpu_list", expected.gpus, actual.gpus),
        ];
        for (field, expected, actual) in fields {
            if expected != actual {
                return Err(SyncError::ShapeMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Per-session configuration exchanged as `client_data` / `set_client_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientData {
    pub effect: String,
}

impl ClientData {
    pub fn new(effect: impl Into<String>) -> Self {
        Self {
            effect: effect.into(),
        }
    }
}

// One free-text report per disk, in `hdd_list` order
pub type SmartData = Vec<String>;
