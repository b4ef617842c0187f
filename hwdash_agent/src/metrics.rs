//! Snapshot collection using sysinfo, hwmon and NVML for hwdash_agent.

use crate::gpu;
use crate::hwmon;
use crate::state::AppState;
use crate::types::{Cpu, HardwareData, Hdd, Motherboard};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Cpu,
    Drive,
    Gpu,
    Board,
}

// Component labels look like "coretemp Package id 0", "nvme Composite", "amdgpu edge"
pub fn classify(label: &str) -> SensorKind {
    let l = label.to_ascii_lowercase();
    if ["cpu", "package", "tctl", "tdie", "coretemp", "k10temp"]
        .iter()
        .any(|k| l.contains(k))
    {
        SensorKind::Cpu
    } else if l.contains("nvme") || l.contains("drivetemp") {
        SensorKind::Drive
    } else if ["amdgpu", "nouveau", "radeon", "gpu"].iter().any(|k| l.contains(k)) {
        SensorKind::Gpu
    } else {
        SensorKind::Board
    }
}

/// Block devices that have a temperature sensor; also the SMART targets.
pub async fn drive_devices(state: &AppState) -> Vec<String> {
    state.drives.lock().await.iter().map(|d| d.dev.clone()).collect()
}

pub async fn collect_hardware(state: &AppState) -> HardwareData {
    let (cpu_name, cpu_load) = {
        let mut sys = state.sys.lock().await;
        sys.refresh_cpu_usage();
        let name = sys
            .cpus()
            .first()
            .map(|c| c.brand().trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "CPU".into());
        (name, sys.global_cpu_usage() as f64)
    };

    // Keep the component list fixed after startup so temp_list never changes length
    let (cpu_temp, board_temps) = {
        let mut components = state.components.lock().await;
        components.refresh(false);
        let mut cpu_temp: Option<f32> = None;
        let mut board = Vec::new();
        for c in components.iter() {
            match classify(c.label()) {
                SensorKind::Cpu => {
                    if let Some(t) = c.temperature() {
                        cpu_temp = Some(cpu_temp.map_or(t, |m| m.max(t)));
                    }
                }
                SensorKind::Board => board.push(c.temperature().unwrap_or(0.0) as f64),
                SensorKind::Drive | SensorKind::Gpu => {}
            }
        }
        (cpu_temp.unwrap_or(0.0) as f64, board)
    };

    let hdd_list = state
        .drives
        .lock()
        .await
        .iter_mut()
        .map(|d| Hdd {
            temp: round1(d.read()),
            name: d.dev.clone(),
        })
        .collect();

    let gpu_list = {
        let mut gpus = state.gpus.lock().await;
        gpu::refresh(&mut gpus);
        gpus.clone()
    };

    let root = Path::new(hwmon::HWMON_ROOT);
    let mb_name = hwmon::board_name(Path::new(hwmon::DMI_ROOT)).unwrap_or_else(|| state.hostname.clone());

    HardwareData {
        mb: Motherboard {
            name: mb_name,
            fan_list: hwmon::fans(root),
            temp_list: board_temps,
        },
        cpu: Cpu {
            name: cpu_name,
            load: round1(cpu_load),
            temp: round1(cpu_temp),
        },
        hdd_list,
        gpu_list,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
