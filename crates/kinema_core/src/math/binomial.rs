//! Memoized binomial coefficients.
//!
//! Bernstein weights are evaluated for every curve sample, so coefficients
//! are cached per `(n, r)`. Entries are never evicted: the key space is
//! bounded by the curve orders in use, which stay small in practice.

use std::sync::LazyLock;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

/// Cache of `C(n, r)` values keyed by `(n, r)`.
#[derive(Debug, Default)]
pub struct BinomialCache {
    entries: FxHashMap<(u32, u32), f64>,
}

impl BinomialCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `C(n, r)`, zero when `r > n`.
    pub fn choose(&mut self, n: u32, r: u32) -> f64 {
        if r > n {
            return 0.0;
        }
        let r = r.min(n - r);
        if r == 0 {
            return 1.0;
        }
        if let Some(&value) = self.entries.get(&(n, r)) {
            return value;
        }

        // Multiplicative form keeps intermediates small.
        let mut value = 1.0;
        for k in 1..=r {
            value = value * f64::from(n - r + k) / f64::from(k);
        }
        let value = value.round();
        log::trace!("binomial cache miss for ({n}, {r})");
        self.entries.insert((n, r), value);
        value
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static GLOBAL_CACHE: LazyLock<Mutex<BinomialCache>> =
    LazyLock::new(|| Mutex::new(BinomialCache::new()));

/// `C(n, r)` through the process-wide cache.
pub fn choose(n: u32, r: u32) -> f64 {
    GLOBAL_CACHE.lock().choose(n, r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_row() {
        let mut cache = BinomialCache::new();
        let row: Vec<f64> = (0..=5).map(|r| cache.choose(5, r)).collect();
        assert_eq!(row, vec![1.0, 5.0, 10.0, 10.0, 5.0, 1.0]);
    }

    #[test]
    fn symmetric_entries_share_a_slot() {
        let mut cache = BinomialCache::new();
        cache.choose(10, 3);
        cache.choose(10, 7);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn out_of_range_is_zero() {
        assert_eq!(choose(3, 4), 0.0);
    }
}
