//! Bounded sample buffers backing chart widgets.

use std::collections::VecDeque;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    if cap == 0 {
        return;
    }
    while dq.len() >= cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

/// One chart line: `(timestamp_ms, value)` pairs, oldest first.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    samples: VecDeque<(i64, f64)>,
    cap: usize,
}

impl TimeSeries {
    pub fn new(cap: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn append(&mut self, ts_ms: i64, value: f64) {
        push_capped(&mut self.samples, (ts_ms, value), self.cap);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<(i64, f64)> {
        self.samples.back().copied()
    }

    // Most recent `n` values clamped to 0..=100, ready for a sparkline
    pub fn tail_percent(&self, n: usize) -> Vec<u64> {
        let start = self.samples.len().saturating_sub(n);
        self.samples
            .iter()
            .skip(start)
            .map(|&(_, v)| v.clamp(0.0, 100.0).round() as u64)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_capped_evicts_oldest() {
        let mut dq = VecDeque::new();
        for v in 0..5 {
            push_capped(&mut dq, v, 3);
        }
        assert_eq!(dq, VecDeque::from(vec![2, 3, 4]));
    }

    #[test]
    fn tail_percent_clamps_and_windows() {
        let mut ts = TimeSeries::new(10);
        ts.append(1, -5.0);
        ts.append(2, 42.4);
        ts.append(3, 180.0);
        assert_eq!(ts.tail_percent(2), vec![42, 100]);
        assert_eq!(ts.tail_percent(10), vec![0, 42, 100]);
    }
}
