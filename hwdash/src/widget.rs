//! Widget arena: every synchronized widget lives in one indexed store and is
//! addressed through typed handles returned at creation.

use crate::error::{SyncError, SyncResult};
use crate::history::TimeSeries;

pub const DEFAULT_HISTORY_CAP: usize = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadoutHandle {
    generation: u64,
    index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle {
    generation: u64,
    index: usize,
}

impl ReadoutHandle {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl ChartHandle {
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone)]
pub enum WidgetBody {
    Readout { text: String },
    Chart { series: TimeSeries },
}

#[derive(Debug, Clone)]
pub struct Widget {
    pub title: String,
    pub subtitle: String,
    pub body: WidgetBody,
    // write sequence of the last update, 0 = never written
    pub touched: u64,
}

impl Widget {
    pub fn is_chart(&self) -> bool {
        matches!(self.body, WidgetBody::Chart { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match &self.body {
            WidgetBody::Readout { text } => Some(text),
            WidgetBody::Chart { .. } => None,
        }
    }

    pub fn series(&self) -> Option<&TimeSeries> {
        match &self.body {
            WidgetBody::Chart { series } => Some(series),
            WidgetBody::Readout { .. } => None,
        }
    }
}

#[derive(Debug)]
pub struct WidgetArena {
    widgets: Vec<Widget>,
    generation: u64,
    write_seq: u64,
    history_cap: usize,
}

impl Default for WidgetArena {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP)
    }
}

impl WidgetArena {
    pub fn new(history_cap: usize) -> Self {
        Self {
            widgets: Vec::new(),
            generation: 0,
            write_seq: 0,
            history_cap,
        }
    }

    /// Drop every widget. Handles issued before this call stop resolving.
    pub fn clear(&mut self) {
        self.widgets.clear();
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn create_readout(&mut self, title: impl Into<String>, subtitle: impl Into<String>) -> ReadoutHandle {
        let index = self.push(Widget {
            title: title.into(),
            subtitle: subtitle.into(),
            body: WidgetBody::Readout {
                text: String::new(),
            },
            touched: 0,
        });
        ReadoutHandle {
            generation: self.generation,
            index,
        }
    }

    pub fn create_chart(&mut self, title: impl Into<String>) -> ChartHandle {
        let index = self.push(Widget {
            title: title.into(),
            subtitle: String::new(),
            body: WidgetBody::Chart {
                series: TimeSeries::new(self.history_cap),
            },
            touched: 0,
        });
        ChartHandle {
            generation: self.generation,
            index,
        }
    }

    fn push(&mut self, w: Widget) -> usize {
        self.widgets.push(w);
        self.widgets.len() - 1
    }

    pub fn set_text(&mut self, h: ReadoutHandle, text: String) -> SyncResult<()> {
        let seq = self.next_seq();
        let w = self.slot(h.generation, h.index)?;
        match &mut w.body {
            WidgetBody::Readout { text: slot } => *slot = text,
            WidgetBody::Chart { .. } => {
                return Err(SyncError::WidgetKind {
                    index: h.index,
                    expected: "readout",
                })
            }
        }
        w.touched = seq;
        Ok(())
    }

    pub fn append_sample(&mut self, h: ChartHandle, ts_ms: i64, value: f64) -> SyncResult<()> {
        let seq = self.next_seq();
        let w = self.slot(h.generation, h.index)?;
        match &mut w.body {
            WidgetBody::Chart { series } => series.append(ts_ms, value),
            WidgetBody::Readout { .. } => {
                return Err(SyncError::WidgetKind {
                    index: h.index,
                    expected: "chart",
                })
            }
        }
        w.touched = seq;
        Ok(())
    }

    fn next_seq(&mut self) -> u64 {
        self.write_seq += 1;
        self.write_seq
    }

    // Index of a live widget for a handle's (generation, index) pair
    fn resolve(&self, generation: u64, index: usize) -> SyncResult<usize> {
        if generation != self.generation {
            return Err(SyncError::StaleWidget {
                index,
                handle: generation,
                current: self.generation,
            });
        }
        if index >= self.widgets.len() {
            return Err(SyncError::MissingWidget(index));
        }
        Ok(index)
    }

    fn slot(&mut self, generation: u64, index: usize) -> SyncResult<&mut Widget> {
        let i = self.resolve(generation, index)?;
        Ok(&mut self.widgets[i])
    }

    pub fn get(&self, index: usize) -> Option<&Widget> {
        self.widgets.get(index)
    }

    pub fn readout(&self, h: ReadoutHandle) -> SyncResult<&str> {
        self.lookup(h.generation, h.index)?
            .text()
            .ok_or(SyncError::WidgetKind {
                index: h.index,
                expected: "readout",
            })
    }

    pub fn chart(&self, h: ChartHandle) -> SyncResult<&TimeSeries> {
        self.lookup(h.generation, h.index)?
            .series()
            .ok_or(SyncError::WidgetKind {
                index: h.index,
                expected: "chart",
            })
    }

    fn lookup(&self, generation: u64, index: usize) -> SyncResult<&Widget> {
        Ok(&self.widgets[self.resolve(generation, index)?])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn chart_count(&self) -> usize {
        self.widgets.iter().filter(|w| w.is_chart()).count()
    }

    pub fn readout_count(&self) -> usize {
        self.widgets.len() - self.chart_count()
    }

    /// First widget with the given title, if any.
    pub fn find(&self, title: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.title == title)
    }

    pub fn find_readout(&self, title: &str) -> Option<&Widget> {
        self.widgets
            .iter()
            .find(|w| w.title == title && !w.is_chart())
    }
}

pub const EFFECT_LIST: [&str; 2] = ["none", "monitor"];

/// Dropdown of effect names; the only user-mutable configuration value.
#[derive(Debug, Clone)]
pub struct EffectSelector {
    pub title: String,
    options: Vec<String>,
    selected: usize,
}

impl Default for EffectSelector {
    fn default() -> Self {
        Self::new("Effect list", &EFFECT_LIST)
    }
}

impl EffectSelector {
    pub fn new(title: impl Into<String>, options: &[&str]) -> Self {
        Self {
            title: title.into(),
            options: options.iter().map(|s| s.to_string()).collect(),
            selected: 0,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &str {
        self.options
            .get(self.selected)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn select(&mut self, index: usize) -> SyncResult<&str> {
        if index >= self.options.len() {
            return Err(SyncError::UnknownEffect(index));
        }
        self.selected = index;
        Ok(&self.options[index])
    }

    // Reflect a config received from elsewhere; unknown names leave the selection alone
    pub fn select_name(&mut self, name: &str) -> bool {
        match self.options.iter().position(|o| o == name) {
            Some(i) => {
                self.selected = i;
                true
            }
            None => false,
        }
    }

    pub fn next_index(&self) -> usize {
        if self.options.is_empty() {
            0
        } else {
            (self.selected + 1) % self.options.len()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartReport {
    pub title: String,
    pub text: String,
}

/// Read-only SMART boxes rendered once per `smart_data` message.
#[derive(Debug, Clone, Default)]
pub struct SmartPanel {
    reports: Vec<SmartReport>,
}

impl SmartPanel {
    pub fn render(&mut self, list: &[String]) {
        self.reports = list
            .iter()
            .enumerate()
            .map(|(i, text)| SmartReport {
                title: format!("HDD{i} S.M.A.R.T."),
                text: text.clone(),
            })
            .collect();
    }

    pub fn reports(&self) -> &[SmartReport] {
        &self.reports
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
