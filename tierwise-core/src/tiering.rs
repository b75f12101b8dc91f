//! Quick-pass tiering: quantile cuts over the confidence-ordered pool.
//!
//! The quick pass is the safe baseline. Undersampled items go straight to
//! "unranked", everything else is ordered by Wilson lower bound (regularized
//! by the pre-ranking prior) and split at quantile positions. Refinement may
//! later move those cuts, but only through the acceptance gate in
//! `assemble`.

use crate::config::RankConfig;
use crate::order::sort_ranked;
use crate::prior::BetaPrior;
use crate::types::{Interval, ItemRecord, Pair, Tier, TierAssignment};
use crate::wilson::wilson_interval;

/// Immutable per-call view of the pool: intervals for every item plus the
/// sampled/undersampled partition, with sampled indices in ranking order.
pub(crate) struct Snapshot<'a> {
    pub pool: &'a [ItemRecord],
    /// Parallel to `pool`.
    pub intervals: Vec<Interval>,
    /// Sampled pool indices, best first.
    pub ranked: Vec<usize>,
    /// Undersampled pool indices, sorted by name then ID.
    pub undersampled: Vec<usize>,
}

impl<'a> Snapshot<'a> {
    pub fn lower(&self, pos: usize) -> f64 {
        self.intervals[self.ranked[pos]].lower
    }

    pub fn upper(&self, pos: usize) -> f64 {
        self.intervals[self.ranked[pos]].upper
    }
}

/// Compute intervals at `z` and partition the pool. Priors are a quick-pass
/// regularization crutch; refinement and final assembly pass
/// `with_priors = false` and run on real data alone.
pub(crate) fn build_snapshot<'a>(
    pool: &'a [ItemRecord],
    config: &RankConfig,
    z: f64,
    with_priors: bool,
) -> Snapshot<'a> {
    let k = config.tier_count();
    let intervals: Vec<Interval> = pool
        .iter()
        .map(|item| {
            let prior = if with_priors {
                Some(BetaPrior::from_tier(item.prior_tier_index, k, config.prior_strength))
            } else {
                None
            };
            wilson_interval(item.wins, item.comparisons, z, prior)
        })
        .collect();

    let mut ranked = Vec::with_capacity(pool.len());
    let mut undersampled = Vec::new();
    for (idx, item) in pool.iter().enumerate() {
        if item.comparisons >= config.min_comparisons {
            ranked.push(idx);
        } else {
            undersampled.push(idx);
        }
    }

    let lowers: Vec<f64> = intervals.iter().map(|ci| ci.lower).collect();
    sort_ranked(pool, &lowers, &mut ranked);
    undersampled.sort_by(|&a, &b| {
        pool[a]
            .name_key
            .cmp(&pool[b].name_key)
            .then_with(|| pool[a].id.cmp(&pool[b].id))
    });

    Snapshot { pool, intervals, ranked, undersampled }
}

/// Total recorded decisions: every outcome bumps two comparison counters.
pub(crate) fn total_decisions(pool: &[ItemRecord]) -> u32 {
    pool.iter().map(|item| item.comparisons).sum::<u32>() / 2
}

/// Quantile split positions for `n` ranked items into `k` tiers:
/// `round(i * n / k)` for `i = 1..k-1`, deduplicated, strictly increasing,
/// clamped to `[1, n-1]` so no cut produces a segment outside the list.
pub fn quantile_cuts(n: usize, k: usize) -> Vec<usize> {
    let mut cuts = Vec::with_capacity(k.saturating_sub(1));
    if n < 2 {
        return cuts;
    }
    for i in 1..k {
        let pos = ((i * n) as f64 / k as f64).round() as usize;
        if pos >= 1 && pos <= n - 1 && cuts.last() != Some(&pos) {
            cuts.push(pos);
        }
    }
    cuts
}

/// Split the ranked list at `cuts` and assign segments to tiers in rank
/// order. Members inherit ranking order, which is lower bound descending
/// within every tier.
pub(crate) fn assign_tiers(
    snap: &Snapshot,
    cuts: &[usize],
    config: &RankConfig,
) -> TierAssignment {
    let mut tiers: Vec<Tier> = config
        .tier_labels
        .iter()
        .map(|label| Tier { name: label.clone(), members: Vec::new() })
        .collect();

    let last_tier = tiers.len() - 1;
    let mut tier_idx = 0;
    for (pos, &item_idx) in snap.ranked.iter().enumerate() {
        while tier_idx < cuts.len() && pos >= cuts[tier_idx] {
            tier_idx += 1;
        }
        tiers[tier_idx.min(last_tier)].members.push(snap.pool[item_idx].id);
    }

    TierAssignment {
        tiers,
        unranked: snap.undersampled.iter().map(|&idx| snap.pool[idx].id).collect(),
    }
}

/// First-pass tiering plus the refinement queue for the vote loop.
///
/// `config` must have passed `validate()`. Side-effect-free: identical pool
/// statistics produce identical output.
pub fn quick_pass(pool: &[ItemRecord], config: &RankConfig) -> (TierAssignment, Vec<Pair>) {
    let snap = build_snapshot(pool, config, config.z_quick, true);
    let cuts = quantile_cuts(snap.ranked.len(), config.tier_count());
    let assignment = assign_tiers(&snap, &cuts, config);
    let queue = crate::refine::select_pairs(&snap, &cuts, config);
    (assignment, queue)
}
