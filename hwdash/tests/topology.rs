//! Topology build and dispatch over the widget arena.
mod common;

use chrono::{TimeZone, Utc};
use common::{example, snapshot};
use hwdash::binding::{SnapshotPath, Target};
use hwdash::topology::build;
use hwdash::widget::WidgetArena;
use hwdash::SyncError;

#[test]
fn widget_counts_follow_list_lengths() {
    for (fans, temps, hdds, gpus) in [(0, 0, 0, 0), (2, 3, 1, 0), (1, 1, 4, 2), (0, 5, 0, 3)] {
        let hw = snapshot(fans, temps, hdds, gpus);
        let mut arena = WidgetArena::default();
        let reg = build(&hw, &mut arena);

        assert_eq!(arena.chart_count(), 2 + hdds + 2 * gpus);
        assert_eq!(arena.readout_count(), fans + temps + 2 + hdds + 2 * gpus);
        assert_eq!(reg.len(), arena.len(), "one binding per widget");

        let mut targets: Vec<usize> = reg.iter().map(|b| b.target.index()).collect();
        targets.sort_unstable();
        targets.dedup();
        assert_eq!(targets.len(), arena.len(), "every widget bound exactly once");
    }
}

#[test]
fn bindings_follow_creation_order() {
    let hw = snapshot(1, 1, 1, 1);
    let mut arena = WidgetArena::default();
    let reg = build(&hw, &mut arena);
    let paths: Vec<SnapshotPath> = reg.iter().map(|b| b.path).collect();
    assert_eq!(
        paths,
        vec![
            SnapshotPath::MbFan(0),
            SnapshotPath::MbTemp(0),
            SnapshotPath::CpuLoad,
            SnapshotPath::CpuTemp,
            SnapshotPath::CpuLoad,
            SnapshotPath::CpuTemp,
            SnapshotPath::HddTemp(0),
            SnapshotPath::HddTemp(0),
            SnapshotPath::GpuLoad(0),
            SnapshotPath::GpuTemp(0),
            SnapshotPath::GpuLoad(0),
            SnapshotPath::GpuTemp(0),
        ]
    );
    assert!(matches!(reg.iter().nth(4).map(|b| b.target), Some(Target::Chart(_))));

    // Every write stamps a sequence number, so creation order must match write order
    reg.dispatch(&hw, &mut arena, Utc::now()).unwrap();
    let touched: Vec<u64> = arena.iter().map(|w| w.touched).collect();
    assert!(touched.iter().all(|&t| t > 0));
    assert!(touched.windows(2).all(|p| p[0] < p[1]), "out of order: {touched:?}");
}

#[test]
fn example_snapshot_renders_expected_values() {
    let hw = example();
    let mut arena = WidgetArena::default();
    let reg = build(&hw, &mut arena);
    reg.dispatch(&hw, &mut arena, Utc::now()).unwrap();

    let text = |title: &str| arena.find_readout(title).and_then(|w| w.text()).map(str::to_string);
    assert_eq!(text("CPU Load").as_deref(), Some("55 %"));
    assert_eq!(text("CPU Temp").as_deref(), Some("60 C"));
    assert_eq!(text("HDD0 Temp").as_deref(), Some("35 C"));
    assert_eq!(text("MB Fan0").as_deref(), Some("1200 RPM"));
    assert_eq!(text("MB Temp0").as_deref(), Some("40 C"));
    assert_eq!(arena.find_readout("HDD0 Temp").map(|w| w.subtitle.as_str()), Some("D1"));

    let charts: Vec<&str> = arena.iter().filter(|w| w.is_chart()).map(|w| w.title.as_str()).collect();
    assert_eq!(charts, vec!["CPU Load", "CPU Temp", "HDD0 Temp"]);
}

#[test]
fn dispatch_is_repeatable_and_charts_accumulate() {
    let hw = snapshot(2, 2, 2, 1);
    let mut arena = WidgetArena::new(8);
    let reg = build(&hw, &mut arena);
    let t0 = Utc.timestamp_millis_opt(1_000).unwrap();
    let t1 = Utc.timestamp_millis_opt(2_000).unwrap();

    reg.dispatch(&hw, &mut arena, t0).unwrap();
    let first: Vec<Option<String>> = arena.iter().map(|w| w.text().map(str::to_string)).collect();
    reg.dispatch(&hw, &mut arena, t1).unwrap();
    let second: Vec<Option<String>> = arena.iter().map(|w| w.text().map(str::to_string)).collect();
    assert_eq!(first, second);

    let cpu_load = arena.find("CPU Load").unwrap();
    assert!(!cpu_load.is_chart(), "readout is created before the chart");
    let chart = arena.iter().find(|w| w.is_chart() && w.title == "GPU0 Load").unwrap();
    let series = chart.series().unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series.last(), Some((2_000, 70.0)));
}

#[test]
fn cardinality_change_fails_before_any_write() {
    let hw = snapshot(1, 1, 2, 0);
    let mut arena = WidgetArena::default();
    let reg = build(&hw, &mut arena);

    let mut grown = snapshot(1, 1, 3, 0);
    grown.cpu.load = 99.0;
    let err = reg.dispatch(&grown, &mut arena, Utc::now()).unwrap_err();
    assert!(
        matches!(err, SyncError::ShapeMismatch { field: "hdd_list", expected: 2, actual: 3 }),
        "{err}"
    );
    assert_eq!(arena.find_readout("CPU Load").and_then(|w| w.text()), Some(""));
}

#[test]
fn out_of_range_path_is_a_schema_violation() {
    let hw = snapshot(0, 0, 1, 0);
    let err = SnapshotPath::HddTemp(3).read(&hw).unwrap_err();
    assert!(matches!(err, SyncError::SchemaViolation { list: "hdd_list", index: 3, len: 1 }));
    assert!(SnapshotPath::GpuLoad(0).read(&hw).is_err());
    assert_eq!(SnapshotPath::HddTemp(0).read(&hw).unwrap(), 33.0);
}

#[test]
fn rebuild_replaces_every_widget_and_binding() {
    let mut arena = WidgetArena::default();
    let old = build(&snapshot(1, 1, 3, 1), &mut arena);
    let old_len = old.len();

    let hw = snapshot(1, 1, 1, 0);
    let new = build(&hw, &mut arena);
    assert!(new.len() < old_len);
    assert_eq!(new.len(), arena.len());
    assert_eq!(arena.chart_count(), 3);

    // Handles from the first topology no longer resolve
    let stale = old.dispatch(&snapshot(1, 1, 3, 1), &mut arena, Utc::now()).unwrap_err();
    assert!(matches!(stale, SyncError::StaleWidget { .. }), "{stale}");
    new.dispatch(&hw, &mut arena, Utc::now()).unwrap();
}
