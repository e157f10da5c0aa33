//! List helpers shared by alignment and styling.

use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::math::interpolate::interpolate;

/// Resamples `list` to `length` entries by nearest-lower index mapping
/// (`i -> floor(i * len / length)`). Entries are repeated or dropped, never
/// blended. An empty list stays empty.
#[must_use]
pub fn stretch_to_length<T: Clone>(list: &[T], length: usize) -> Vec<T> {
    if list.is_empty() {
        return Vec::new();
    }
    let current = list.len();
    (0..length).map(|i| list[i * current / length].clone()).collect()
}

/// Stretches both lists to the longer of the two lengths.
#[must_use]
pub fn make_even<A: Clone, B: Clone>(a: &[A], b: &[B]) -> (Vec<A>, Vec<B>) {
    let length = a.len().max(b.len());
    (stretch_to_length(a, length), stretch_to_length(b, length))
}

/// Drops repeated entries, keeping the last occurrence of each.
#[must_use]
pub fn without_redundancies<T: Copy + Eq + Hash>(list: &[T]) -> Vec<T> {
    let mut used = FxHashSet::default();
    let mut reversed: Vec<T> = list.iter().rev().copied().filter(|x| used.insert(*x)).collect();
    reversed.reverse();
    reversed
}

/// Drops repeated entries, keeping the first occurrence of each.
#[must_use]
pub fn first_seen_unique<T: Copy + Eq + Hash>(list: &[T]) -> Vec<T> {
    let mut used = FxHashSet::default();
    list.iter().copied().filter(|x| used.insert(*x)).collect()
}

/// `count` evenly spaced values from `start` to `end` inclusive.
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..count)
            .map(|i| interpolate(start, end, i as f64 / (count - 1) as f64))
            .collect(),
    }
}

/// Distributes `target` slots over `current` buckets as evenly as possible.
///
/// Slot `j` lands in bucket `floor(j * current / target)`; the result holds
/// the number of slots per bucket and sums to `target`. Used to decide how
/// many copies each child receives when submobject counts are equalized and
/// how many pieces each curve is split into when curve counts are.
#[must_use]
pub fn split_factors(current: usize, target: usize) -> Vec<usize> {
    let mut factors = vec![0; current];
    if current == 0 {
        return factors;
    }
    for j in 0..target {
        factors[j * current / target] += 1;
    }
    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stretch_repeats_nearest_lower() {
        assert_eq!(stretch_to_length(&[1, 2], 5), vec![1, 1, 1, 2, 2]);
        assert_eq!(stretch_to_length(&[1, 2, 3, 4], 2), vec![1, 3]);
        assert!(stretch_to_length::<i32>(&[], 3).is_empty());
    }

    #[test]
    fn make_even_uses_longer_length() {
        let (a, b) = make_even(&[1, 2, 3], &['x']);
        assert_eq!(a, vec![1, 2, 3]);
        assert_eq!(b, vec!['x', 'x', 'x']);
    }

    #[test]
    fn redundancies_keep_last() {
        assert_eq!(without_redundancies(&[1, 2, 1, 3]), vec![2, 1, 3]);
        assert_eq!(first_seen_unique(&[1, 2, 1, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn split_factors_sum_to_target() {
        let f = split_factors(3, 7);
        assert_eq!(f.iter().sum::<usize>(), 7);
        assert_eq!(f, vec![3, 2, 2]);
        assert_eq!(split_factors(2, 2), vec![1, 1]);
    }

    #[test]
    fn linspace_is_inclusive() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }
}
