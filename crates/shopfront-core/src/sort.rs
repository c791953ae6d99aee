//! # Sort Engine
//!
//! Comparator-driven sorting for in-memory entity collections.
//!
//! ## Which Sort To Use
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Choosing a Sort                              │
//! │                                                                 │
//! │  quicksort                        mergesort                     │
//! │  ─────────                        ─────────                     │
//! │  • in-place, no allocation        • returns a sorted copy       │
//! │  • average O(n log n)             • always O(n log n)           │
//! │  • worst case O(n²) on sorted     • O(n) auxiliary space        │
//! │    or reverse-sorted input        • STABLE: equal keys keep     │
//! │  • equal-key order UNSPECIFIED      their original order        │
//! │                                                                 │
//! │  Rule of thumb: when tie-breaking matters (e.g. products with   │
//! │  equal price ordered by insertion), use mergesort.              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both sorts take a three-way comparator plus an `ascending` flag, so one
//! comparator per sortable key (name, price, date) covers both directions.
//! Neither mutates the elements themselves.

use std::cmp::Ordering;

// =============================================================================
// Quicksort
// =============================================================================

/// Sorts the slice in place with a recursive quicksort.
///
/// Partitions around the **last** element (Lomuto). This makes
/// already-sorted and reverse-sorted input the worst case, O(n²) in both
/// comparisons and recursion depth; acceptable for the listing sizes this
/// tool handles, and kept so the tie order stays what callers observe
/// today. The relative order of equal-key elements is unspecified.
///
/// ## Example
/// ```rust
/// use shopfront_core::sort::quicksort;
///
/// let mut prices = vec![3, 1, 2];
/// quicksort(&mut prices, &|a: &i32, b: &i32| a.cmp(b), true);
/// assert_eq!(prices, vec![1, 2, 3]);
/// ```
pub fn quicksort<T, C>(items: &mut [T], compare: &C, ascending: bool)
where
    C: Fn(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }

    let pivot = partition(items, compare, ascending);

    let (left, right) = items.split_at_mut(pivot);
    quicksort(left, compare, ascending);
    // right[0] is the pivot, already in its final position.
    quicksort(&mut right[1..], compare, ascending);
}

/// Lomuto partition: everything strictly "before" the last-element pivot
/// moves left of it; returns the pivot's final index.
fn partition<T, C>(items: &mut [T], compare: &C, ascending: bool) -> usize
where
    C: Fn(&T, &T) -> Ordering,
{
    let last = items.len() - 1;
    let mut store = 0;

    for i in 0..last {
        let ord = compare(&items[i], &items[last]);
        let before_pivot = if ascending {
            ord == Ordering::Less
        } else {
            ord == Ordering::Greater
        };

        if before_pivot {
            items.swap(i, store);
            store += 1;
        }
    }

    items.swap(store, last);
    store
}

// =============================================================================
// Mergesort
// =============================================================================

/// Returns a sorted copy of the slice using a recursive, **stable**
/// mergesort.
///
/// Splits at the midpoint, sorts each half, merges by comparator. Always
/// O(n log n) with O(n) auxiliary space. Stability holds in both
/// directions: elements that compare equal keep their original relative
/// order, so callers can rely on it for tie-breaking.
///
/// ## Example
/// ```rust
/// use shopfront_core::sort::mergesort;
///
/// let names = vec!["banana", "apple", "cherry"];
/// let sorted = mergesort(&names, &|a: &&str, b: &&str| a.cmp(b), true);
/// assert_eq!(sorted, vec!["apple", "banana", "cherry"]);
/// ```
pub fn mergesort<T, C>(items: &[T], compare: &C, ascending: bool) -> Vec<T>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return items.to_vec();
    }

    let mid = items.len() / 2;
    let left = mergesort(&items[..mid], compare, ascending);
    let right = mergesort(&items[mid..], compare, ascending);

    merge(&left, &right, compare, ascending)
}

/// Merges two runs; on equal keys the left run wins, which is what makes
/// the sort stable.
fn merge<T, C>(left: &[T], right: &[T], compare: &C, ascending: bool) -> Vec<T>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        let ord = compare(&left[i], &right[j]);
        let take_left = if ascending {
            ord != Ordering::Greater
        } else {
            ord != Ordering::Less
        };

        if take_left {
            merged.push(left[i].clone());
            i += 1;
        } else {
            merged.push(right[j].clone());
            j += 1;
        }
    }

    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// (sort key, insertion tag) - the tag exposes tie order.
    type Keyed = (i64, &'static str);

    fn by_key(a: &Keyed, b: &Keyed) -> Ordering {
        a.0.cmp(&b.0)
    }

    #[test]
    fn test_quicksort_ascending() {
        let mut items = vec![5, 3, 8, 1, 9, 2, 7];
        quicksort(&mut items, &|a: &i32, b: &i32| a.cmp(b), true);
        assert_eq!(items, vec![1, 2, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn test_quicksort_descending() {
        let mut items = vec![5, 3, 8, 1, 9, 2, 7];
        quicksort(&mut items, &|a: &i32, b: &i32| a.cmp(b), false);
        assert_eq!(items, vec![9, 8, 7, 5, 3, 2, 1]);
    }

    #[test]
    fn test_quicksort_handles_sorted_and_reversed_input() {
        // Worst case for the last-element pivot, still must be correct.
        let mut sorted: Vec<i32> = (0..64).collect();
        quicksort(&mut sorted, &|a, b| a.cmp(b), true);
        assert_eq!(sorted, (0..64).collect::<Vec<_>>());

        let mut reversed: Vec<i32> = (0..64).rev().collect();
        quicksort(&mut reversed, &|a, b| a.cmp(b), true);
        assert_eq!(reversed, (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn test_quicksort_empty_and_single() {
        let mut empty: Vec<i32> = vec![];
        quicksort(&mut empty, &|a, b| a.cmp(b), true);
        assert!(empty.is_empty());

        let mut single = vec![42];
        quicksort(&mut single, &|a: &i32, b: &i32| a.cmp(b), true);
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn test_quicksort_duplicates_sorted_by_key() {
        let mut items: Vec<Keyed> = vec![(2, "a"), (1, "b"), (2, "c"), (1, "d")];
        quicksort(&mut items, &by_key, true);
        let keys: Vec<i64> = items.iter().map(|i| i.0).collect();
        // Tie order is unspecified, only the key order is guaranteed.
        assert_eq!(keys, vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_mergesort_ascending_and_descending() {
        let items = vec![5, 3, 8, 1, 9];

        assert_eq!(mergesort(&items, &|a, b| a.cmp(b), true), vec![1, 3, 5, 8, 9]);
        assert_eq!(mergesort(&items, &|a, b| a.cmp(b), false), vec![9, 8, 5, 3, 1]);

        // Input untouched.
        assert_eq!(items, vec![5, 3, 8, 1, 9]);
    }

    #[test]
    fn test_mergesort_is_stable() {
        let items: Vec<Keyed> = vec![(2, "first"), (1, "x"), (2, "second"), (2, "third")];

        let sorted = mergesort(&items, &by_key, true);
        assert_eq!(
            sorted,
            vec![(1, "x"), (2, "first"), (2, "second"), (2, "third")]
        );

        // Stability must hold in descending order as well.
        let sorted = mergesort(&items, &by_key, false);
        assert_eq!(
            sorted,
            vec![(2, "first"), (2, "second"), (2, "third"), (1, "x")]
        );
    }

    #[test]
    fn test_mergesort_idempotent_on_sorted_input() {
        let items = vec![1, 2, 3, 4, 5];
        let once = mergesort(&items, &|a, b| a.cmp(b), true);
        let twice = mergesort(&once, &|a, b| a.cmp(b), true);
        assert_eq!(once, items);
        assert_eq!(twice, items);
    }

    #[test]
    fn test_mergesort_empty_and_single() {
        let empty: Vec<i32> = vec![];
        assert!(mergesort(&empty, &|a, b| a.cmp(b), true).is_empty());
        assert_eq!(mergesort(&[42], &|a: &i32, b: &i32| a.cmp(b), true), vec![42]);
    }

    #[test]
    fn test_sorts_agree_on_float_keys() {
        // f64 keys via total_cmp - the price comparator callers use.
        let prices = vec![9.99, 0.0, 4.5, 120.0, 4.5];
        let cmp = |a: &f64, b: &f64| a.total_cmp(b);

        let mut quick = prices.clone();
        quicksort(&mut quick, &cmp, true);
        let merged = mergesort(&prices, &cmp, true);

        assert_eq!(quick, merged);
        assert_eq!(quick, vec![0.0, 4.5, 4.5, 9.99, 120.0]);
    }
}
