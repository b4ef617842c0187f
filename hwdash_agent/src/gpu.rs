// gpu.rs
use nvml_wrapper::enum_wrappers::device::TemperatureSensor;
use nvml_wrapper::error::NvmlError;
use nvml_wrapper::Nvml;
use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::types::Gpu;

// Runtime toggle (read once)
fn gpu_enabled() -> bool {
    static ON: OnceCell<bool> = OnceCell::new();
    *ON.get_or_init(|| {
        std::env::var("HWDASH_AGENT_GPU")
            .map(|v| v != "0")
            .unwrap_or(true)
    })
}

// NVML is loaded once; absence (no driver, no NVIDIA card) is remembered as None
fn nvml() -> Option<&'static Nvml> {
    static NVML: OnceCell<Option<Nvml>> = OnceCell::new();
    NVML.get_or_init(|| match Nvml::init() {
        Ok(n) => Some(n),
        Err(e) => {
            info!("NVML unavailable, reporting no GPUs: {e}");
            None
        }
    })
    .as_ref()
}

fn read_device(nvml: &Nvml, index: u32) -> Result<Gpu, NvmlError> {
    let dev = nvml.device_by_index(index)?;
    Ok(Gpu {
        name: dev.name()?,
        load: dev.utilization_rates()?.gpu as f64,
        temp: dev.temperature(TemperatureSensor::Gpu)? as f64,
    })
}

/// The GPU set, fixed at startup. Devices that fail their first read are
/// still listed so gpu_list keeps the same length for the agent's lifetime.
pub fn enumerate() -> Vec<Gpu> {
    if !gpu_enabled() {
        return Vec::new();
    }
    let Some(nvml) = nvml() else {
        return Vec::new();
    };
    let count = match nvml.device_count() {
        Ok(n) => n,
        Err(e) => {
            warn!("NVML device count failed, reporting no GPUs: {e}");
            return Vec::new();
        }
    };
    let mut gpus: Vec<Gpu> = (0..count)
        .map(|i| Gpu {
            name: format!("GPU {i}"),
            load: 0.0,
            temp: 0.0,
        })
        .collect();
    refresh_with(&mut gpus, |i| read_device(nvml, i));
    gpus
}

/// Re-read every enumerated GPU in place.
pub fn refresh(gpus: &mut [Gpu]) {
    if let Some(nvml) = nvml() {
        refresh_with(gpus, |i| read_device(nvml, i));
    }
}

// A failed device keeps its previous reading
fn refresh_with<E, F>(gpus: &mut [Gpu], mut read: F)
where
    E: std::fmt::Display,
    F: FnMut(u32) -> Result<Gpu, E>,
{
    for (i, slot) in gpus.iter_mut().enumerate() {
        match read(i as u32) {
            Ok(g) => *slot = g,
            Err(e) => warn!("gpu {i} read failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gpu(name: &str, load: f64, temp: f64) -> Gpu {
        Gpu {
            name: name.into(),
            load,
            temp,
        }
    }

    #[test]
    fn failed_read_keeps_previous_value() {
        let mut gpus = vec![gpu("RTX 3080", 10.0, 50.0), gpu("RTX 3060", 20.0, 55.0)];
        refresh_with(&mut gpus, |i| match i {
            0 => Ok(gpu("RTX 3080", 90.0, 71.0)),
            _ => Err("GPU is lost"),
        });
        assert_eq!(gpus, vec![gpu("RTX 3080", 90.0, 71.0), gpu("RTX 3060", 20.0, 55.0)]);

        refresh_with(&mut gpus, |_| Err::<Gpu, _>("driver reset"));
        assert_eq!(gpus.len(), 2);
        assert_eq!(gpus[0].load, 90.0);
    }
}
