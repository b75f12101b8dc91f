//! Final assembly: tighter intervals, elastic cut adjustment, and the
//! hysteresis gate that decides whether refined cuts replace the quantile
//! baseline.
//!
//! The baseline is always computable and always safe. Refined cuts move
//! boundaries toward the strongest observed gaps and stretch the top/bottom
//! tiers over tied clusters, but they only take effect once enough decisions
//! exist and the reshuffle they cause stays inside the churn budget.

use std::collections::HashMap;

use crate::config::RankConfig;
use crate::refine::{effective_overlap_eps, gap_score};
use crate::tiering::{assign_tiers, build_snapshot, quantile_cuts, total_decisions, Snapshot};
use crate::types::{ItemRecord, TierAssignment};

/// Terminal tier assignment for the pool.
///
/// `config` must have passed `validate()`. Side-effect-free and
/// deterministic: identical pool statistics produce identical output.
pub fn finalize(pool: &[ItemRecord], config: &RankConfig) -> TierAssignment {
    // The tighter z is only trustworthy with real data behind it.
    let mean_comparisons = if pool.is_empty() {
        0.0
    } else {
        pool.iter().map(|item| item.comparisons as f64).sum::<f64>() / pool.len() as f64
    };
    let z = if mean_comparisons < config.final_z_min_mean_comparisons {
        config.z_quick
    } else {
        config.z_final
    };

    let snap = build_snapshot(pool, config, z, false);
    let n = snap.ranked.len();
    let k = config.tier_count();
    let quant_cuts = quantile_cuts(n, k);
    let baseline = assign_tiers(&snap, &quant_cuts, config);
    if n < 2 || quant_cuts.is_empty() {
        return baseline;
    }

    let overlap_eps = effective_overlap_eps(&snap, config);
    let mut refined = merge_refined_cuts(&snap, &quant_cuts, overlap_eps, config);
    elastic_top(&snap, &mut refined, config);
    retain_increasing(&mut refined);
    elastic_bottom(&snap, &mut refined, config);

    if refined == quant_cuts {
        return baseline;
    }

    let candidate = assign_tiers(&snap, &refined, config);
    let decisions = total_decisions(pool);
    let warm_up = config.warm_up_decisions(n);
    let churn = churn_fraction(&baseline, &candidate, n);
    if accept_refined(decisions, warm_up, churn, config) {
        candidate
    } else {
        baseline
    }
}

/// The hysteresis gate. Refined cuts need both enough evidence and a
/// bounded reshuffle; the allowance ramps up as decisions accumulate past
/// warm-up.
pub(crate) fn accept_refined(decisions: u32, warm_up: u32, churn: f64, config: &RankConfig) -> bool {
    if decisions < warm_up {
        return false;
    }
    let ramp = (decisions as f64 / warm_up as f64 * config.churn_ramp_scale).min(1.0);
    churn <= config.churn_soft || churn <= config.churn_ramp_max * ramp
}

/// Fraction of ranked items whose tier differs between two assignments over
/// the same pool.
pub(crate) fn churn_fraction(a: &TierAssignment, b: &TierAssignment, ranked_count: usize) -> f64 {
    if ranked_count == 0 {
        return 0.0;
    }
    let index_of = |assignment: &TierAssignment| -> HashMap<i64, usize> {
        let mut map = HashMap::new();
        for (tier_idx, tier) in assignment.tiers.iter().enumerate() {
            for &id in &tier.members {
                map.insert(id, tier_idx);
            }
        }
        map
    };
    let a_tiers = index_of(a);
    let b_tiers = index_of(b);
    let moved = a_tiers
        .iter()
        .filter(|(id, tier)| b_tiers.get(id) != Some(tier))
        .count();
    moved as f64 / ranked_count as f64
}

/// Substitute quantile cuts with nearby, strictly stronger gap positions.
/// Candidates are the `k-1` highest-scoring adjacent gaps anywhere in the
/// order; a quantile cut only moves when a candidate lies within the
/// frontier window and beats the gap at the quantile position itself.
fn merge_refined_cuts(
    snap: &Snapshot,
    quant_cuts: &[usize],
    overlap_eps: f64,
    config: &RankConfig,
) -> Vec<usize> {
    let n = snap.ranked.len();
    let score_at =
        |p: usize| gap_score(snap, snap.ranked[p - 1], snap.ranked[p], overlap_eps, config);

    let mut gaps: Vec<(f64, usize)> = (1..n).map(|p| (score_at(p), p)).collect();
    gaps.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });
    gaps.truncate(config.tier_count() - 1);

    let mut merged = Vec::with_capacity(quant_cuts.len());
    for &q in quant_cuts {
        let best = gaps
            .iter()
            .filter(|&&(_, p)| p.abs_diff(q) <= config.frontier_window)
            .max_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| b.1.cmp(&a.1))
            });
        match best {
            Some(&(score, p)) if p != q && score > score_at(q) => merged.push(p),
            _ => merged.push(q),
        }
    }
    retain_increasing(&mut merged);
    merged
}

/// Slide the first cut outward while its flanking items are tied, keeping
/// the whole tied block in the top tier.
fn elastic_top(snap: &Snapshot, cuts: &mut [usize], config: &RankConfig) {
    let n = snap.ranked.len();
    let Some(first) = cuts.first_mut() else { return };
    let mut c = *first;
    while c < n - 1 && snap.lower(c - 1) - snap.lower(c) <= config.eps_tie_top {
        c += 1;
    }
    *first = c;
}

/// Absorb a contiguous tied-or-weak tail cluster into the bottom tier by
/// moving the last cut to the cluster start. The cluster may not cross the
/// previous cut or exceed the configured width.
fn elastic_bottom(snap: &Snapshot, cuts: &mut [usize], config: &RankConfig) {
    let n = snap.ranked.len();
    if cuts.is_empty() {
        return;
    }
    let prev = if cuts.len() >= 2 { cuts[cuts.len() - 2] } else { 0 };

    let mut start = n - 1;
    while start > 0 && n - start < config.bottom_cluster_max {
        let above = snap.upper(start - 1);
        let here = snap.upper(start);
        let tied = (above - here).abs() <= config.eps_tie_bottom;
        let weak = above < config.weak_upper_ceiling && here < config.weak_upper_ceiling;
        if tied || weak {
            start -= 1;
        } else {
            break;
        }
    }

    if n - start >= 2 && start > prev {
        let last = cuts.len() - 1;
        cuts[last] = start;
    }
}

/// Drop cuts overtaken by an earlier one, keeping the list strictly
/// increasing without reordering.
fn retain_increasing(cuts: &mut Vec<usize>) {
    let mut prev: Option<usize> = None;
    cuts.retain(|&c| {
        let keep = prev.map_or(true, |p| c > p);
        if keep {
            prev = Some(c);
        }
        keep
    });
}
