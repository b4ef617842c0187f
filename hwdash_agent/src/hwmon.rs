//! Linux hwmon/DMI readers for the sensors sysinfo does not expose: fan
//! speeds, per-drive temperatures keyed by block device, and the board name.
//! Missing directories simply yield nothing, so other platforms report empty lists.

use std::fs;
use std::path::{Path, PathBuf};

pub const HWMON_ROOT: &str = "/sys/class/hwmon";
pub const DMI_ROOT: &str = "/sys/class/dmi/id";

fn read_trimmed(p: &Path) -> Option<String> {
    fs::read_to_string(p)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// hwmon0, hwmon1, ... in numeric order
fn chips(root: &Path) -> Vec<PathBuf> {
    let Ok(rd) = fs::read_dir(root) else {
        return Vec::new();
    };
    let mut dirs: Vec<(u32, PathBuf)> = rd
        .flatten()
        .filter_map(|e| {
            let n = e.file_name().to_string_lossy().strip_prefix("hwmon")?.parse::<u32>().ok()?;
            Some((n, e.path()))
        })
        .collect();
    dirs.sort_by_key(|(n, _)| *n);
    dirs.into_iter().map(|(_, p)| p).collect()
}

// `<prefix>N_input` files of one chip, ordered by N
fn inputs(chip: &Path, prefix: &str) -> Vec<(u32, PathBuf)> {
    let Ok(rd) = fs::read_dir(chip) else {
        return Vec::new();
    };
    let mut v: Vec<(u32, PathBuf)> = rd
        .flatten()
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            let n = name.strip_prefix(prefix)?.strip_suffix("_input")?.parse::<u32>().ok()?;
            Some((n, e.path()))
        })
        .collect();
    v.sort_by_key(|(n, _)| *n);
    v
}

/// Fan speeds in RPM across every chip.
pub fn fans(root: &Path) -> Vec<f64> {
    chips(root)
        .iter()
        .flat_map(|chip| inputs(chip, "fan"))
        .map(|(_, p)| read_trimmed(&p).and_then(|s| s.parse::<f64>().ok()).unwrap_or(0.0))
        .collect()
}

/// A drive temperature sensor, keyed by block device.
///
/// The set is enumerated once; a failed read repeats the last good value so
/// the drive never drops out of the list.
#[derive(Debug, Clone)]
pub struct DriveSensor {
    pub dev: String,
    input: PathBuf,
    last: f64,
}

impl DriveSensor {
    // degrees C
    pub fn read(&mut self) -> f64 {
        if let Some(milli) = read_trimmed(&self.input).and_then(|s| s.parse::<f64>().ok()) {
            self.last = milli / 1000.0;
        }
        self.last
    }
}

/// Every drive sensor under `root`, sorted by device.
pub fn drives(root: &Path) -> Vec<DriveSensor> {
    let mut out: Vec<DriveSensor> = chips(root)
        .iter()
        .filter_map(|chip| {
            let dev = match read_trimmed(&chip.join("name"))?.as_str() {
                "nvme" => fs::canonicalize(chip.join("device"))
                    .ok()?
                    .file_name()?
                    .to_string_lossy()
                    .into_owned(),
                "drivetemp" => fs::read_dir(chip.join("device").join("block"))
                    .ok()?
                    .flatten()
                    .next()?
                    .file_name()
                    .to_string_lossy()
                    .into_owned(),
                _ => return None,
            };
            let (_, input) = inputs(chip, "temp").into_iter().next()?;
            let mut sensor = DriveSensor {
                dev,
                input,
                last: 0.0,
            };
            sensor.read();
            Some(sensor)
        })
        .collect();
    out.sort_by(|a, b| a.dev.cmp(&b.dev));
    out
}

pub fn board_name(dmi: &Path) -> Option<String> {
    let vendor = read_trimmed(&dmi.join("board_vendor"));
    let name = read_trimmed(&dmi.join("board_name"))?;
    Some(match vendor {
        Some(v) => format!("{v} {name}"),
        None => name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(p: &Path, s: &str) {
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, s).unwrap();
    }

    #[test]
    fn reads_fans_and_drives_in_order() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        write(&root.join("hwmon0/name"), "nct6798\n");
        write(&root.join("hwmon0/fan2_input"), "900\n");
        write(&root.join("hwmon0/fan1_input"), "1200\n");
        write(&root.join("hwmon10/name"), "nvme\n");
        write(&root.join("hwmon10/temp1_input"), "41850\n");
        fs::create_dir_all(root.join("hwmon10/device")).unwrap();
        write(&root.join("hwmon2/name"), "drivetemp\n");
        write(&root.join("hwmon2/temp1_input"), "35000\n");
        fs::create_dir_all(root.join("hwmon2/device/block/sda")).unwrap();
        write(&root.join("hwmon3/name"), "acpitz\n");
        write(&root.join("hwmon3/temp1_input"), "27000\n");

        assert_eq!(fans(root), vec![1200.0, 900.0]);
        // nvme device name comes from the (canonicalized) device link
        let mut d = drives(root);
        assert_eq!(d.len(), 2);
        assert_eq!(d[0].dev, "device");
        assert!((d[0].read() - 41.85).abs() < 1e-9);
        assert_eq!(d[1].dev, "sda");
        assert_eq!(d[1].read(), 35.0);
    }

    #[test]
    fn unreadable_drive_keeps_its_slot() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        for (chip, dev, temp) in [("hwmon0", "sda", "31000"), ("hwmon1", "sdb", "38000")] {
            write(&root.join(chip).join("name"), "drivetemp\n");
            write(&root.join(chip).join("temp1_input"), temp);
            fs::create_dir_all(root.join(chip).join("device/block").join(dev)).unwrap();
        }
        let mut d = drives(root);
        assert_eq!(d.len(), 2);

        // Standby drive: empty read, then garbage
        write(&root.join("hwmon1/temp1_input"), "");
        let temps: Vec<f64> = d.iter_mut().map(DriveSensor::read).collect();
        assert_eq!(temps, vec![31.0, 38.0]);
        write(&root.join("hwmon1/temp1_input"), "EIO");
        assert_eq!(d[1].read(), 38.0);
        write(&root.join("hwmon1/temp1_input"), "40000\n");
        assert_eq!(d[1].read(), 40.0);

        // A drive that is asleep at startup is still listed, reading 0 until it answers
        write(&root.join("hwmon0/temp1_input"), "");
        let mut again = drives(root);
        assert_eq!(again.len(), 2);
        assert_eq!(again[0].read(), 0.0);
    }

    #[test]
    fn board_name_joins_vendor() {
        let td = tempfile::tempdir().unwrap();
        assert_eq!(board_name(td.path()), None);
        write(&td.path().join("board_name"), "PRIME X570-P\n");
        assert_eq!(board_name(td.path()).as_deref(), Some("PRIME X570-P"));
        write(&td.path().join("board_vendor"), "ASUSTeK\n");
        assert_eq!(board_name(td.path()).as_deref(), Some("ASUSTeK PRIME X570-P"));
    }

    #[test]
    fn missing_root_is_empty() {
        let p = Path::new("/definitely/not/here");
        assert!(fans(p).is_empty());
        assert!(drives(p).is_empty());
    }
}
