//! Set intersection over unordered collections.

use std::collections::HashSet;
use std::hash::Hash;

/// Returns the elements present in both `a` and `b`.
///
/// Duplicates in either input are ignored. The result holds each common
/// element once, in the order it first appears in `a`, so callers that
/// take "the first shared element" get the same answer on every run.
///
/// # Examples
///
/// ```
/// use transfer_planner::network::intersect;
///
/// let a = ["A", "B", "with spaces"];
/// let b = ["withspaces", "with spaces", "B", "B"];
/// assert_eq!(intersect(&a, &b), vec!["B", "with spaces"]);
/// ```
pub fn intersect<'a, T, A, B>(a: A, b: B) -> Vec<T>
where
    T: Eq + Hash + Clone + 'a,
    A: IntoIterator<Item = &'a T>,
    B: IntoIterator<Item = &'a T>,
{
    let right: HashSet<&T> = b.into_iter().collect();
    if right.is_empty() {
        return Vec::new();
    }

    let mut seen: HashSet<&T> = HashSet::new();
    a.into_iter()
        .filter(|item| right.contains(item) && seen.insert(*item))
        .cloned()
        .collect()
}
