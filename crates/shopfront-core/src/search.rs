//! # Search Engine
//!
//! Binary search over collections pre-sorted by a key.
//!
//! ## How It Narrows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  binary_search_by_key(list sorted by id, key = 7)               │
//! │                                                                 │
//! │  ids: [1, 3, 4, 7, 9, 12, 15]                                   │
//! │        low           mid            high                        │
//! │                                                                 │
//! │  mid = low + (high - low) / 2                                   │
//! │  key_of(mid) < key  → search right half                         │
//! │  key_of(mid) > key  → search left half                          │
//! │  key_of(mid) == key → found                                     │
//! │                                                                 │
//! │  O(log n) comparisons                                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Ordering;

/// Finds the element whose extracted key equals `key`.
///
/// ## Precondition (UNCHECKED)
/// `sorted` must already be ascending by the same key `key_of` extracts -
/// typically the output of [`crate::sort::mergesort`] with the matching
/// comparator. The function does not verify this; on unsorted input the
/// result is undefined (it may miss a present element).
///
/// ## Returns
/// * `Some(&T)` - an element with a matching key
/// * `None` - no element matches
///
/// ## Example
/// ```rust
/// use shopfront_core::search::binary_search_by_key;
///
/// let ids = vec![1i64, 3, 7, 9];
/// assert_eq!(binary_search_by_key(&ids, 7, |v| *v), Some(&7));
/// assert_eq!(binary_search_by_key(&ids, 5, |v| *v), None);
/// ```
pub fn binary_search_by_key<T, K, F>(sorted: &[T], key: K, key_of: F) -> Option<&T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut low = 0usize;
    let mut high = sorted.len();

    while low < high {
        let mid = low + (high - low) / 2;

        match key_of(&sorted[mid]).cmp(&key) {
            Ordering::Equal => return Some(&sorted[mid]),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }

    None
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: i64,
        name: &'static str,
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: 1, name: "apple" },
            Item { id: 4, name: "banana" },
            Item { id: 7, name: "cherry" },
            Item { id: 9, name: "damson" },
            Item { id: 15, name: "elder" },
        ]
    }

    #[test]
    fn test_finds_every_present_key() {
        let items = items();
        for item in &items {
            let found = binary_search_by_key(&items, item.id, |i| i.id);
            assert_eq!(found, Some(item));
        }
    }

    #[test]
    fn test_absent_keys_return_none() {
        let items = items();
        for id in [0, 2, 8, 14, 16, i64::MAX] {
            assert_eq!(binary_search_by_key(&items, id, |i| i.id), None);
        }
    }

    #[test]
    fn test_boundary_elements() {
        let items = items();
        assert_eq!(binary_search_by_key(&items, 1, |i| i.id).map(|i| i.name), Some("apple"));
        assert_eq!(binary_search_by_key(&items, 15, |i| i.id).map(|i| i.name), Some("elder"));
    }

    #[test]
    fn test_empty_and_single() {
        let empty: Vec<Item> = vec![];
        assert_eq!(binary_search_by_key(&empty, 1, |i| i.id), None);

        let single = vec![Item { id: 5, name: "only" }];
        assert!(binary_search_by_key(&single, 5, |i| i.id).is_some());
        assert!(binary_search_by_key(&single, 6, |i| i.id).is_none());
    }

    #[test]
    fn test_large_sorted_input() {
        let items: Vec<i64> = (0..1000).map(|i| i * 2).collect();
        assert_eq!(binary_search_by_key(&items, 998, |v| *v), Some(&998));
        assert_eq!(binary_search_by_key(&items, 999, |v| *v), None);
    }
}
