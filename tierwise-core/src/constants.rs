//! Default values for every engine tunable.
//!
//! These are defaults for `RankConfig` fields, never read directly by the
//! algorithms — multiple sessions with different settings must be able to
//! coexist (e.g. in tests), so there is no module-level mutable state.

/// Reserved tier name for items that have not met the minimum comparison
/// count. Tier labels in a config may not collide with it.
pub const UNRANKED_TIER: &str = "unranked";

/// Default tier labels, best to worst.
pub const DEFAULT_TIER_LABELS: [&str; 6] = ["S", "A", "B", "C", "D", "F"];

/// Minimum comparisons an item needs before it can leave "unranked".
pub const DEFAULT_MIN_COMPARISONS: u32 = 2;

/// Desired comparisons per item for the vote loop. Advisory — the engine
/// never enforces it; callers clamp it via `RankConfig::effective_target`.
pub const DEFAULT_TARGET_COMPARISONS: u32 = 3;

/// z-score for quick-pass intervals. Roughly a 68% interval — intentionally
/// loose so cuts can move freely before much data exists.
pub const DEFAULT_Z_QUICK: f64 = 1.0;

/// z-score for final-assembly intervals (roughly 80%). Only used once the
/// pool averages enough comparisons per item; see
/// `DEFAULT_FINAL_Z_MIN_MEAN_COMPARISONS`.
pub const DEFAULT_Z_FINAL: f64 = 1.28;

/// Mean comparisons per item below which final assembly falls back to the
/// quick-pass z-score.
pub const DEFAULT_FINAL_Z_MIN_MEAN_COMPARISONS: f64 = 3.0;

/// Virtual sample strength of the Beta prior derived from an item's
/// pre-ranking tier. Six virtual games fades after a handful of real votes.
pub const DEFAULT_PRIOR_STRENGTH: f64 = 6.0;

/// Lower bounds closer than this at the head of the ranking count as tied,
/// widening top boundary probes and the elastic top adjustment.
pub const DEFAULT_EPS_TIE_TOP: f64 = 0.012;

/// Upper bounds closer than this at the tail count as tied.
pub const DEFAULT_EPS_TIE_BOTTOM: f64 = 0.010;

/// Upper bounds below this mark an item as clearly weak; a run of weak items
/// at the tail is treated as one cluster.
pub const DEFAULT_WEAK_UPPER_CEILING: f64 = 0.20;

/// Added to every frontier gap once the warm-up decision count is reached,
/// so near-zero gaps still register as weak evidence.
pub const DEFAULT_OVERLAP_EPS: f64 = 0.010;

/// Adjacent pairs whose combined interval width falls below this are not
/// worth probing — the segment is flat and already confident.
pub const DEFAULT_MIN_SPLIT: f64 = 0.015;

/// How many positions above and below each quantile cut the frontier
/// scorer examines.
pub const DEFAULT_FRONTIER_WINDOW: usize = 2;

/// Weight of the better-sampled side in the gap confidence term:
/// `min(c_u, c_l) + weight * max(c_u, c_l)`.
pub const DEFAULT_CONFIDENCE_SPREAD_WEIGHT: f64 = 0.10;

/// Minimum refinement queue length. Frontier probes fill up to this floor;
/// boundary widening may exceed it.
pub const DEFAULT_QUEUE_FLOOR: usize = 6;

/// Churn fraction always accepted by the hysteresis gate.
pub const DEFAULT_CHURN_SOFT: f64 = 0.12;

/// Ceiling of the ramped churn allowance.
pub const DEFAULT_CHURN_RAMP_MAX: f64 = 0.25;

/// Scale applied to `decisions / warm_up` when computing the churn ramp.
pub const DEFAULT_CHURN_RAMP_SCALE: f64 = 0.50;

/// Maximum width of the tied-or-weak tail cluster the elastic bottom
/// adjustment may absorb into the last tier.
pub const DEFAULT_BOTTOM_CLUSTER_MAX: usize = 4;
