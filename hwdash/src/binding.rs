//! Binding registry and update dispatcher.
//!
//! A binding pairs one widget handle with the fixed path it reads from every
//! future snapshot. The registry keeps bindings in creation order and replays
//! all of them on each `hardware_data`.

use chrono::{DateTime, Utc};

use crate::error::{SyncError, SyncResult};
use crate::types::{HardwareData, Shape};
use crate::widget::{ChartHandle, ReadoutHandle, WidgetArena};

/// Location of one reading inside a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotPath {
    MbFan(usize),
    MbTemp(usize),
    CpuLoad,
    CpuTemp,
    HddTemp(usize),
    GpuLoad(usize),
    GpuTemp(usize),
}

fn at<'a, T>(list: &'static str, items: &'a [T], index: usize) -> SyncResult<&'a T> {
    items.get(index).ok_or(SyncError::SchemaViolation {
        list,
        index,
        len: items.len(),
    })
}

impl SnapshotPath {
    pub fn read(&self, hw: &HardwareData) -> SyncResult<f64> {
        Ok(match *self {
            SnapshotPath::MbFan(i) => *at("mb.fan_list", &hw.mb.fan_list, i)?,
            SnapshotPath::MbTemp(i) => *at("mb.temp_list", &hw.mb.temp_list, i)?,
            SnapshotPath::CpuLoad => hw.cpu.load,
            SnapshotPath::CpuTemp => hw.cpu.temp,
            SnapshotPath::HddTemp(i) => at("hdd_list", &hw.hdd_list, i)?.temp,
            SnapshotPath::GpuLoad(i) => at("gpu_list", &hw.gpu_list, i)?.load,
            SnapshotPath::GpuTemp(i) => at("gpu_list", &hw.gpu_list, i)?.temp,
        })
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SnapshotPath::MbFan(_) => "RPM",
            SnapshotPath::CpuLoad | SnapshotPath::GpuLoad(_) => "%",
            SnapshotPath::MbTemp(_) | SnapshotPath::CpuTemp | SnapshotPath::HddTemp(_) | SnapshotPath::GpuTemp(_) => "C",
        }
    }

    /// Readout text, e.g. `55 %` or `1200 RPM`.
    pub fn format(&self, value: f64) -> String {
        format!("{value} {}", self.unit())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Readout(ReadoutHandle),
    Chart(ChartHandle),
}

impl Target {
    pub fn index(&self) -> usize {
        match self {
            Target::Readout(h) => h.index(),
            Target::Chart(h) => h.index(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub target: Target,
    pub path: SnapshotPath,
}

impl Binding {
    pub fn readout(h: ReadoutHandle, path: SnapshotPath) -> Self {
        Self {
            target: Target::Readout(h),
            path,
        }
    }

    pub fn chart(h: ChartHandle, path: SnapshotPath) -> Self {
        Self {
            target: Target::Chart(h),
            path,
        }
    }

    pub fn apply(&self, hw: &HardwareData, widgets: &mut WidgetArena, ts_ms: i64) -> SyncResult<()> {
        let value = self.path.read(hw)?;
        match self.target {
            Target::Readout(h) => widgets.set_text(h, self.path.format(value)),
            Target::Chart(h) => widgets.append_sample(h, ts_ms, value),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BindingRegistry {
    bindings: Vec<Binding>,
    shape: Shape,
}

impl BindingRegistry {
    pub fn new(shape: Shape) -> Self {
        Self {
            bindings: Vec::new(),
            shape,
        }
    }

    pub fn push(&mut self, b: Binding) {
        self.bindings.push(b);
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    /// Run every binding once, in registration order, against `hw`.
    ///
    /// The snapshot shape is checked up front so a cardinality change fails
    /// before any widget is written.
    pub fn dispatch(&self, hw: &HardwareData, widgets: &mut WidgetArena, now: DateTime<Utc>) -> SyncResult<()> {
        hw.check_shape(self.shape)?;
        let ts_ms = now.timestamp_millis();
        for b in &self.bindings {
            b.apply(hw, widgets, ts_ms)?;
        }
        Ok(())
    }
}
