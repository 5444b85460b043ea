//! Mode (most-common value) computation over rounded values.
//!
//! All functions here are pure, deterministic and independent of the order
//! in which values are added.

use std::collections::BTreeMap;

/// Scale `value` by `10^precision` and round it to an integer key.
pub fn round_key(value: f32, precision: u32) -> i64 {
    let scale = 10f64.powi(precision as i32);
    (value as f64 * scale).round() as i64
}

/// Convert a key produced by [`round_key`] back into a value.
pub fn key_value(key: i64, precision: u32) -> f32 {
    let scale = 10f64.powi(precision as i32);
    (key as f64 / scale) as f32
}

/// Frequency table of rounded numeric values.
#[derive(Debug, Clone)]
pub struct Frequencies {
    precision: u32,
    counts: BTreeMap<i64, usize>,
    total: usize,
}

impl Frequencies {
    /// Create an empty table rounding to `precision` decimal digits.
    pub fn new(precision: u32) -> Self {
        Self {
            precision,
            counts: BTreeMap::new(),
            total: 0,
        }
    }

    /// Build a table from a sequence of values.
    pub fn from_values(values: impl IntoIterator<Item = f32>, precision: u32) -> Self {
        let mut freq = Self::new(precision);
        freq.extend(values);
        freq
    }

    /// Add a value. Non-finite values are ignored.
    pub fn add(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        *self.counts.entry(round_key(value, self.precision)).or_insert(0) += 1;
        self.total += 1;
    }

    /// Add several values.
    pub fn extend(&mut self, values: impl IntoIterator<Item = f32>) {
        for value in values {
            self.add(value);
        }
    }

    /// Number of values added.
    pub fn len(&self) -> usize {
        self.total
    }

    /// Whether no value was added.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Frequency of the rounded `value`.
    pub fn count(&self, value: f32) -> usize {
        self.counts
            .get(&round_key(value, self.precision))
            .copied()
            .unwrap_or(0)
    }

    /// The most frequent rounded value; ties resolve to the larger value.
    pub fn most_common(&self) -> Option<f32> {
        most_common_key(self.counts.iter().map(|(k, c)| (*k, *c)))
            .map(|k| key_value(k, self.precision))
    }

    /// The smallest rounded value whose frequency exceeds `min_support`.
    ///
    /// Falls back to [`most_common`](Self::most_common) when no value is
    /// frequent enough.
    pub fn smallest_significant(&self, min_support: usize) -> Option<f32> {
        self.counts
            .iter()
            .find(|(_, count)| **count > min_support)
            .map(|(key, _)| key_value(*key, self.precision))
            .or_else(|| self.most_common())
    }

    /// Smallest rounded value.
    pub fn min(&self) -> Option<f32> {
        self.counts
            .keys()
            .next()
            .map(|k| key_value(*k, self.precision))
    }

    /// Largest rounded value.
    pub fn max(&self) -> Option<f32> {
        self.counts
            .keys()
            .next_back()
            .map(|k| key_value(*k, self.precision))
    }
}

/// Mode over (key, count) pairs; frequency ties resolve to the larger key.
pub fn most_common_key<K: Ord + Copy>(counts: impl IntoIterator<Item = (K, usize)>) -> Option<K> {
    let mut best: Option<(K, usize)> = None;
    for (key, count) in counts {
        best = match best {
            None => Some((key, count)),
            Some((bk, bc)) if count > bc || (count == bc && key > bk) => Some((key, count)),
            keep => keep,
        };
    }
    best.map(|(k, _)| k)
}

/// Mode of a sequence of discrete keys; ties resolve to the larger key.
pub fn mode_of<K: Ord + Copy>(keys: impl IntoIterator<Item = K>) -> Option<K> {
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    most_common_key(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_key() {
        assert_eq!(round_key(10.04, 1), 100);
        assert_eq!(round_key(10.06, 1), 101);
        assert_eq!(round_key(-2.25, 0), -2);
        assert!((key_value(101, 1) - 10.1).abs() < 1e-6);
    }

    #[test]
    fn test_most_common_prefers_frequency() {
        let freq = Frequencies::from_values([10.0, 10.0, 10.0, 12.0, 12.0, 8.0], 1);
        assert_eq!(freq.most_common(), Some(10.0));
        assert_eq!(freq.count(10.0), 3);
        assert_eq!(freq.len(), 6);
    }

    #[test]
    fn test_most_common_tie_resolves_to_larger() {
        let freq = Frequencies::from_values([3.0, 7.0, 3.0, 7.0, 5.0], 1);
        assert_eq!(freq.most_common(), Some(7.0));
    }

    #[test]
    fn test_mode_law_is_order_invariant() {
        let values = [1.0f32, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0, 4.0, 0.5, 0.5, 0.5];
        let forward = Frequencies::from_values(values, 1).most_common();
        let backward = Frequencies::from_values(values.iter().rev().copied(), 1).most_common();
        assert_eq!(forward, backward);

        let mode = forward.unwrap_or_default();
        let freq = Frequencies::from_values(values, 1);
        for v in values {
            assert!(freq.count(mode) >= freq.count(v));
        }
        // 4.0 and 0.5 both occur three times; the larger wins.
        assert_eq!(mode, 4.0);
    }

    #[test]
    fn test_rounding_merges_close_values() {
        let freq = Frequencies::from_values([11.98, 12.01, 12.04, 9.0, 9.0], 1);
        assert_eq!(freq.most_common(), Some(12.0));
    }

    #[test]
    fn test_smallest_significant() {
        // 2.0 occurs once (noise), 12.0 three times, 14.0 twice.
        let freq = Frequencies::from_values([2.0, 12.0, 12.0, 12.0, 14.0, 14.0], 1);
        assert_eq!(freq.smallest_significant(1), Some(12.0));
        assert_eq!(freq.smallest_significant(0), Some(2.0));
        // Nothing exceeds support 5: fall back to the mode.
        assert_eq!(freq.smallest_significant(5), Some(12.0));
    }

    #[test]
    fn test_empty_and_non_finite() {
        let mut freq = Frequencies::new(1);
        freq.add(f32::NAN);
        freq.add(f32::INFINITY);
        assert!(freq.is_empty());
        assert_eq!(freq.most_common(), None);
        assert_eq!(freq.smallest_significant(1), None);
    }

    #[test]
    fn test_mode_of_discrete_keys() {
        assert_eq!(mode_of([1u32, 2, 2, 3, 3]), Some(3));
        assert_eq!(mode_of([5u32, 5, 1]), Some(5));
        assert_eq!(mode_of(Vec::<u32>::new()), None);
    }
}
