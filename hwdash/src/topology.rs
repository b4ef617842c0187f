//! Builds the widget set for a snapshot and the bindings that keep it fresh.

use tracing::debug;

use crate::binding::{Binding, BindingRegistry, SnapshotPath};
use crate::types::HardwareData;
use crate::widget::WidgetArena;

/// Discard every widget in `widgets`, then create one widget and one binding
/// per sensor found in `hw`.
///
/// Creation order: motherboard fans, motherboard temps, cpu, disks, gpus.
pub fn build(hw: &HardwareData, widgets: &mut WidgetArena) -> BindingRegistry {
    widgets.clear();
    let mut reg = BindingRegistry::new(hw.shape());

    add_mb(hw, widgets, &mut reg);
    add_cpu(hw, widgets, &mut reg);
    add_hdds(hw, widgets, &mut reg);
    add_gpus(hw, widgets, &mut reg);

    debug!(
        widgets = widgets.len(),
        charts = widgets.chart_count(),
        bindings = reg.len(),
        "topology built"
    );
    reg
}

fn add_readout(widgets: &mut WidgetArena, reg: &mut BindingRegistry, title: String, subtitle: &str, path: SnapshotPath) {
    let h = widgets.create_readout(title, subtitle);
    reg.push(Binding::readout(h, path));
}

fn add_graph(widgets: &mut WidgetArena, reg: &mut BindingRegistry, title: String, path: SnapshotPath) {
    let h = widgets.create_chart(title);
    reg.push(Binding::chart(h, path));
}

fn add_mb(hw: &HardwareData, widgets: &mut WidgetArena, reg: &mut BindingRegistry) {
    for i in 0..hw.mb.fan_list.len() {
        add_readout(widgets, reg, format!("MB Fan{i}"), &hw.mb.name, SnapshotPath::MbFan(i));
    }
    for i in 0..hw.mb.temp_list.len() {
        add_readout(widgets, reg, format!("MB Temp{i}"), &hw.mb.name, SnapshotPath::MbTemp(i));
    }
}

fn add_cpu(hw: &HardwareData, widgets: &mut WidgetArena, reg: &mut BindingRegistry) {
    add_readout(widgets, reg, "CPU Load".into(), &hw.cpu.name, SnapshotPath::CpuLoad);
    add_readout(widgets, reg, "CPU Temp".into(), &hw.cpu.name, SnapshotPath::CpuTemp);
    add_graph(widgets, reg, "CPU Load".into(), SnapshotPath::CpuLoad);
    add_graph(widgets, reg, "CPU Temp".into(), SnapshotPath::CpuTemp);
}

fn add_hdds(hw: &HardwareData, widgets: &mut WidgetArena, reg: &mut BindingRegistry) {
    for (i, d) in hw.hdd_list.iter().enumerate() {
        add_readout(widgets, reg, format!("HDD{i} Temp"), &d.name, SnapshotPath::HddTemp(i));
        add_graph(widgets, reg, format!("HDD{i} Temp"), SnapshotPath::HddTemp(i));
    }
}

fn add_gpus(hw: &HardwareData, widgets: &mut WidgetArena, reg: &mut BindingRegistry) {
    for (i, g) in hw.gpu_list.iter().enumerate() {
        add_readout(widgets, reg, format!("GPU{i} Load"), &g.name, SnapshotPath::GpuLoad(i));
        add_readout(widgets, reg, format!("GPU{i} Temp"), &g.name, SnapshotPath::GpuTemp(i));
        add_graph(widgets, reg, format!("GPU{i} Load"), SnapshotPath::GpuLoad(i));
        add_graph(widgets, reg, format!("GPU{i} Temp"), SnapshotPath::GpuTemp(i));
    }
}
