//! Frequency counting shared by the reporters.
//!
//! Ties are broken by the natural ordering of the value: among equally
//! frequent values the smallest one comes first.

use std::collections::BTreeMap;

/// Count each distinct value, most frequent first.
///
/// Equal counts are ordered by ascending value.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }

    let mut out: Vec<(T, usize)> = counts.into_iter().collect();
    // Stable sort keeps the ascending key order within a count.
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// Most frequent value and its count, or `None` for no values.
pub fn mode<T, I>(values: I) -> Option<(T, usize)>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_picks_highest_count() {
        assert_eq!(mode([3, 1, 3, 2]), Some((3, 2)));
    }

    #[test]
    fn mode_tie_prefers_smallest_value() {
        assert_eq!(mode(["Monday", "Friday", "Monday", "Friday"]), Some(("Friday", 2)));
        assert_eq!(mode([("b", "a"), ("a", "z")]), Some((("a", "z"), 1)));
    }

    #[test]
    fn mode_of_nothing_is_none() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn value_counts_sorted_by_count_then_value() {
        let counts = value_counts(["c", "a", "b", "a", "c", "d"]);
        assert_eq!(counts, vec![("a", 2), ("c", 2), ("b", 1), ("d", 1)]);
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 6);
    }
}
