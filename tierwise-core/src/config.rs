//! Engine configuration.
//!
//! One explicit struct instead of scattered named constants, so concurrent
//! sessions with different settings cannot interfere. Every tunable has a
//! documented default in `constants.rs`; `validate()` fails fast on caller
//! mistakes rather than producing a silently degraded ranking.

use thiserror::Error;

use crate::constants::*;

/// Configuration error returned by `RankConfig::validate()`.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tier_labels must not be empty")]
    NoTiers,
    #[error("duplicate tier label: {0}")]
    DuplicateLabel(String),
    #[error("tier label collides with the reserved name \"{}\"", UNRANKED_TIER)]
    ReservedLabel,
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

/// All engine tunables. Construct with `RankConfig::default()` and override
/// fields as needed, then call `validate()` once before use.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankConfig {
    /// Tier names, best to worst. Tier count is the length of this list.
    pub tier_labels: Vec<String>,
    /// Comparisons an item needs before it can leave "unranked".
    pub min_comparisons: u32,
    /// Desired comparisons per item; advisory for the caller's vote loop.
    pub target_comparisons: u32,
    /// z-score for quick-pass intervals.
    pub z_quick: f64,
    /// z-score for final-assembly intervals.
    pub z_final: f64,
    /// Mean comparisons per item required before `z_final` is trusted.
    pub final_z_min_mean_comparisons: f64,
    /// Virtual sample strength of the pre-ranking Beta prior.
    pub prior_strength: f64,
    /// Tie epsilon for lower bounds at the head of the ranking.
    pub eps_tie_top: f64,
    /// Tie epsilon for upper bounds at the tail.
    pub eps_tie_bottom: f64,
    /// Upper bounds below this count as clearly weak.
    pub weak_upper_ceiling: f64,
    /// Gap bonus applied once the warm-up decision count is reached.
    pub overlap_eps: f64,
    /// Minimum combined interval width worth probing.
    pub min_split: f64,
    /// Positions scanned above/below each quantile cut.
    pub frontier_window: usize,
    /// Weight of the better-sampled side in the gap confidence term.
    pub confidence_spread_weight: f64,
    /// Minimum refinement queue length.
    pub queue_floor: usize,
    /// Churn fraction always accepted by the hysteresis gate.
    pub churn_soft: f64,
    /// Ceiling of the ramped churn allowance.
    pub churn_ramp_max: f64,
    /// Scale applied to `decisions / warm_up` in the churn ramp.
    pub churn_ramp_scale: f64,
    /// Maximum width of the elastic bottom cluster.
    pub bottom_cluster_max: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        RankConfig {
            tier_labels: DEFAULT_TIER_LABELS.iter().map(|s| s.to_string()).collect(),
            min_comparisons: DEFAULT_MIN_COMPARISONS,
            target_comparisons: DEFAULT_TARGET_COMPARISONS,
            z_quick: DEFAULT_Z_QUICK,
            z_final: DEFAULT_Z_FINAL,
            final_z_min_mean_comparisons: DEFAULT_FINAL_Z_MIN_MEAN_COMPARISONS,
            prior_strength: DEFAULT_PRIOR_STRENGTH,
            eps_tie_top: DEFAULT_EPS_TIE_TOP,
            eps_tie_bottom: DEFAULT_EPS_TIE_BOTTOM,
            weak_upper_ceiling: DEFAULT_WEAK_UPPER_CEILING,
            overlap_eps: DEFAULT_OVERLAP_EPS,
            min_split: DEFAULT_MIN_SPLIT,
            frontier_window: DEFAULT_FRONTIER_WINDOW,
            confidence_spread_weight: DEFAULT_CONFIDENCE_SPREAD_WEIGHT,
            queue_floor: DEFAULT_QUEUE_FLOOR,
            churn_soft: DEFAULT_CHURN_SOFT,
            churn_ramp_max: DEFAULT_CHURN_RAMP_MAX,
            churn_ramp_scale: DEFAULT_CHURN_RAMP_SCALE,
            bottom_cluster_max: DEFAULT_BOTTOM_CLUSTER_MAX,
        }
    }
}

impl RankConfig {
    /// Default config with `k` generic tier labels ("T1".."Tk"). Useful when
    /// the caller wants a tier count other than the default six.
    pub fn with_tier_count(k: usize) -> Self {
        RankConfig {
            tier_labels: (1..=k).map(|i| format!("T{i}")).collect(),
            ..RankConfig::default()
        }
    }

    pub fn tier_count(&self) -> usize {
        self.tier_labels.len()
    }

    /// Comparisons-per-item target clamped to the pool: an item cannot meet
    /// more distinct opponents than exist.
    pub fn effective_target(&self, pool_len: usize) -> u32 {
        self.target_comparisons
            .min(pool_len.saturating_sub(1) as u32)
    }

    /// Decision count at which refined cuts and the overlap bonus unlock:
    /// `max(ceil(1.5 * sampled), 2 * tier_count)`.
    pub(crate) fn warm_up_decisions(&self, sampled: usize) -> u32 {
        let by_pool = (1.5 * sampled as f64).ceil() as u32;
        by_pool.max(2 * self.tier_count() as u32)
    }

    /// Fail fast on malformed configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tier_labels.is_empty() {
            return Err(ConfigError::NoTiers);
        }
        for (i, label) in self.tier_labels.iter().enumerate() {
            if label == UNRANKED_TIER {
                return Err(ConfigError::ReservedLabel);
            }
            if self.tier_labels[..i].contains(label) {
                return Err(ConfigError::DuplicateLabel(label.clone()));
            }
        }

        let positive: [(&'static str, f64); 3] = [
            ("z_quick", self.z_quick),
            ("z_final", self.z_final),
            ("prior_strength", self.prior_strength),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negative: [(&'static str, f64); 10] = [
            ("eps_tie_top", self.eps_tie_top),
            ("eps_tie_bottom", self.eps_tie_bottom),
            ("weak_upper_ceiling", self.weak_upper_ceiling),
            ("overlap_eps", self.overlap_eps),
            ("min_split", self.min_split),
            ("confidence_spread_weight", self.confidence_spread_weight),
            ("churn_soft", self.churn_soft),
            ("churn_ramp_max", self.churn_ramp_max),
            ("churn_ramp_scale", self.churn_ramp_scale),
            (
                "final_z_min_mean_comparisons",
                self.final_z_min_mean_comparisons,
            ),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(RankConfig::default().validate(), Ok(()));
        assert_eq!(RankConfig::default().tier_count(), 6);
    }

    #[test]
    fn test_with_tier_count() {
        let config = RankConfig::with_tier_count(3);
        assert_eq!(config.tier_labels, vec!["T1", "T2", "T3"]);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_empty_labels_rejected() {
        let config = RankConfig { tier_labels: vec![], ..RankConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::NoTiers));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let config = RankConfig {
            tier_labels: vec!["S".into(), "A".into(), "S".into()],
            ..RankConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DuplicateLabel("S".into())));
    }

    #[test]
    fn test_reserved_label_rejected() {
        let config = RankConfig {
            tier_labels: vec!["S".into(), UNRANKED_TIER.into()],
            ..RankConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ReservedLabel));
    }

    #[test]
    fn test_negative_epsilon_rejected() {
        let config = RankConfig { eps_tie_top: -0.01, ..RankConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "eps_tie_top", .. })
        ));
    }

    #[test]
    fn test_zero_z_rejected() {
        let config = RankConfig { z_quick: 0.0, ..RankConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "z_quick", .. })
        ));
    }

    #[test]
    fn test_effective_target_clamps_to_pool() {
        let config = RankConfig::default(); // target_comparisons = 3
        assert_eq!(config.effective_target(10), 3);
        assert_eq!(config.effective_target(3), 2);
        assert_eq!(config.effective_target(1), 0);

        // A 5-item pool under a 6-tier config: the clamp is min(target, 4).
        let eager = RankConfig { target_comparisons: 9, ..RankConfig::default() };
        assert_eq!(eager.effective_target(5), 4);
    }

    #[test]
    fn test_warm_up_decisions() {
        let config = RankConfig::default(); // 6 tiers
        assert_eq!(config.warm_up_decisions(12), 18); // ceil(1.5 * 12)
        assert_eq!(config.warm_up_decisions(4), 12); // floor at 2 * k
        assert_eq!(config.warm_up_decisions(0), 12);
    }
}
