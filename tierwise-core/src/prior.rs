//! Beta prior derived from an item's pre-ranking tier position.
//!
//! An item that sat in a high tier before ranking started probably belongs
//! near the top; a handful of virtual wins/losses encodes that belief and
//! regularizes early interval estimates. Only the quick pass uses priors —
//! refinement and final assembly run on real data alone.

/// Pseudo-count pair added to an item's observed wins/losses.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetaPrior {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaPrior {
    /// Prior for the item at 0-based tier index `tier_index` of `tier_count`
    /// tiers, with virtual sample strength `strength`.
    ///
    /// The prior mean is `1 - (i + 0.5) / k`: strictly inside `(0, 1)` and
    /// strictly decreasing as the tier index grows. Indices past the last
    /// tier are clamped (stale pre-ranking data is not worth a panic).
    pub fn from_tier(tier_index: usize, tier_count: usize, strength: f64) -> Self {
        let k = tier_count.max(1);
        let i = tier_index.min(k - 1) as f64;
        let mean = 1.0 - (i + 0.5) / k as f64;
        BetaPrior {
            alpha: mean * strength,
            beta: (1.0 - mean) * strength,
        }
    }

    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }
}
