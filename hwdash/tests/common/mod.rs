#![allow(dead_code)]

use hwdash::types::{Cpu, Gpu, HardwareData, Hdd, Motherboard};

pub fn snapshot(fans: usize, temps: usize, hdds: usize, gpus: usize) -> HardwareData {
    HardwareData {
        mb: Motherboard {
            name: "Board".into(),
            fan_list: (0..fans).map(|i| 1000.0 + i as f64).collect(),
            temp_list: (0..temps).map(|i| 30.0 + i as f64).collect(),
        },
        cpu: Cpu {
            name: "Cpu".into(),
            load: 12.0,
            temp: 48.5,
        },
        hdd_list: (0..hdds)
            .map(|i| Hdd {
                name: format!("disk{i}"),
                temp: 33.0 + i as f64,
            })
            .collect(),
        gpu_list: (0..gpus)
            .map(|i| Gpu {
                name: format!("gpu{i}"),
                load: 70.0 + i as f64,
                temp: 65.0 + i as f64,
            })
            .collect(),
    }
}

// The single-disk example used across the dashboard tests
pub fn example() -> HardwareData {
    HardwareData {
        mb: Motherboard {
            name: "X".into(),
            fan_list: vec![1200.0],
            temp_list: vec![40.0],
        },
        cpu: Cpu {
            name: "C".into(),
            load: 55.0,
            temp: 60.0,
        },
        hdd_list: vec![Hdd {
            name: "D1".into(),
            temp: 35.0,
        }],
        gpu_list: vec![],
    }
}
