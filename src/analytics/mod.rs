//! Match-window aggregation.
//!
//! Reduces a bounded window of per-match player records into summary
//! statistics. Three independent views (performance, runes, spells) plus
//! the simulated champion meta stats. All functions here are pure over
//! already-fetched data; the network side lives in `riot`.

use std::collections::HashMap;

use serde_json::{Map, Value};

pub mod meta;
pub mod performance;
pub mod runes;
pub mod spells;
pub mod tables;

/// Frequency counter that remembers first-seen order, so top-N slices tie
/// break the same way on every run.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    order: Vec<String>,
    counts: HashMap<String, u32>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>) {
        let key = key.into();
        match self.counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.clone(), 1);
                self.order.push(key);
            }
        }
    }

    pub fn get(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Up to `n` entries, highest count first; ties keep first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(String, u32)> {
        let mut entries: Vec<(String, u32)> = self
            .order
            .iter()
            .map(|key| (key.clone(), self.counts[key]))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }

    /// Top-N entries as a JSON object of key -> count.
    pub fn to_map(&self, n: usize) -> Map<String, Value> {
        self.most_common(n)
            .into_iter()
            .map(|(key, count)| (key, Value::from(count)))
            .collect()
    }
}

/// Mean of a sample, 0 when empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Median of a sample, 0 when empty.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_counts() {
        let mut counter = Counter::new();
        counter.add("Jinx");
        counter.add("Lux");
        counter.add("Jinx");

        assert_eq!(counter.get("Jinx"), 2);
        assert_eq!(counter.get("Lux"), 1);
        assert_eq!(counter.get("Teemo"), 0);
        assert_eq!(counter.len(), 2);
    }

    #[test]
    fn test_most_common_orders_by_count() {
        let mut counter = Counter::new();
        for _ in 0..3 {
            counter.add("b");
        }
        counter.add("a");
        for _ in 0..2 {
            counter.add("c");
        }

        let top = counter.most_common(2);
        assert_eq!(top, vec![("b".to_string(), 3), ("c".to_string(), 2)]);
    }

    #[test]
    fn test_most_common_ties_keep_first_seen() {
        let mut counter = Counter::new();
        counter.add("first");
        counter.add("second");

        let top = counter.most_common(10);
        assert_eq!(top[0].0, "first");
        assert_eq!(top[1].0, "second");
    }

    #[test]
    fn test_mean_and_median() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0]), 3.0);
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[1.0, 2.0, 9.0]), 2.0);
        assert_eq!(median(&[1.0, 2.0, 3.0, 10.0]), 2.5);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round1(33.333), 33.3);
        assert_eq!(round2(2.345), 2.35);
        assert_eq!(round1(66.666), 66.7);
    }
}
