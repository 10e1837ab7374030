//! Bounded signal time-series ring buffer.
//!
//! The original Go implementation backs this with a slice and
//! `Shrink()`s it by truncation on overflow (`O(n)` per insert once the
//! cap is reached). A `VecDeque` gives the same append/evict/snapshot
//! semantics with `O(1)` amortized append and eviction, which is the
//! idiomatic Rust structure for a bounded FIFO.

use std::{collections::VecDeque, time::SystemTime};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub timestamp: SystemTime,
}

#[derive(Debug, Clone)]
pub struct TimeSeries {
    capacity: usize,
    samples: VecDeque<Sample>,
}

impl TimeSeries {
    pub fn new(capacity: usize) -> Self {
        TimeSeries {
            capacity: capacity.max(1),
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a sample, evicting the oldest one if at capacity.
    pub fn push(&mut self, value: f64, timestamp: SystemTime) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample { value, timestamp });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// A by-value snapshot safe to iterate while the source keeps writing.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }
}

impl Default for TimeSeries {
    fn default() -> Self {
        TimeSeries::new(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t() -> SystemTime {
        SystemTime::UNIX_EPOCH
    }

    #[test]
    fn ring_eviction_keeps_last_n_in_order() {
        let mut ts = TimeSeries::new(3);
        for v in 1..=5 {
            ts.push(v as f64, t());
        }
        let values: Vec<f64> = ts.snapshot().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn len_never_exceeds_capacity() {
        let mut ts = TimeSeries::new(3);
        for k in 0..10 {
            ts.push(k as f64, t());
            assert!(ts.len() <= 3);
        }
    }

    #[test]
    fn fewer_appends_than_capacity_keeps_all() {
        let mut ts = TimeSeries::new(200);
        ts.push(1.0, t());
        ts.push(2.0, t());
        assert_eq!(ts.len(), 2);
    }
}
