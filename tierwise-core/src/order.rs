//! Total ordering over the pool.
//!
//! Every later stage (cuts, probes, assignment) assumes a stable, total
//! order, so the comparator falls through five keys and can only report
//! `Equal` for the same item.

use std::cmp::Ordering;

use crate::types::ItemRecord;

/// Ranking comparator: lower bound descending, then comparisons descending,
/// wins descending, name ascending, ID ascending.
///
/// Bounds come out of `wilson_interval`, so they are finite — the
/// `partial_cmp` fallback is unreachable in practice but keeps the
/// comparator total on any input.
pub fn compare_ranked(a: &ItemRecord, lower_a: f64, b: &ItemRecord, lower_b: f64) -> Ordering {
    lower_b
        .partial_cmp(&lower_a)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.comparisons.cmp(&a.comparisons))
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| a.name_key.cmp(&b.name_key))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort pool indices into ranking order. `lowers[i]` is the interval lower
/// bound for `pool[i]`.
pub(crate) fn sort_ranked(pool: &[ItemRecord], lowers: &[f64], indices: &mut [usize]) {
    indices.sort_by(|&a, &b| compare_ranked(&pool[a], lowers[a], &pool[b], lowers[b]));
}
