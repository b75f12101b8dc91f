//! Wilson score interval for a binomial proportion.
//!
//! Behaves much better than the naive normal approximation at the tiny
//! sample sizes a human vote loop produces. Pure arithmetic over `f64` —
//! identical inputs give bit-for-bit identical output.

use crate::prior::BetaPrior;
use crate::types::Interval;

/// Confidence interval for an item's win rate at z-score `z`.
///
/// When a prior is supplied its pseudo-counts fold into the sample:
/// `n' = comparisons + alpha + beta`, `p' = (wins + alpha) / n'`. With no
/// data and no prior the result is maximal uncertainty, `(0, 1)`.
pub fn wilson_interval(wins: u32, comparisons: u32, z: f64, prior: Option<BetaPrior>) -> Interval {
    let (alpha, beta) = match prior {
        Some(p) => (p.alpha, p.beta),
        None => (0.0, 0.0),
    };
    let n = comparisons as f64 + alpha + beta;
    if n <= 0.0 {
        return Interval { lower: 0.0, upper: 1.0 };
    }
    let p = (wins as f64 + alpha) / n;

    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let half = (z / denom) * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt();

    Interval {
        lower: (center - half).clamp(0.0, 1.0),
        upper: (center + half).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_no_prior_is_maximal_uncertainty() {
        let ci = wilson_interval(0, 0, 1.0, None);
        assert_eq!(ci.lower, 0.0);
        assert_eq!(ci.upper, 1.0);
    }

    #[test]
    fn test_bounds_are_ordered_and_clamped() {
        for (wins, comparisons) in [(0, 1), (1, 1), (3, 3), (0, 10), (7, 10)] {
            let ci = wilson_interval(wins, comparisons, 1.28, None);
            assert!(ci.lower <= ci.upper);
            assert!(ci.lower >= 0.0 && ci.upper <= 1.0);
        }
    }

    #[test]
    fn test_even_record_centers_near_half() {
        let ci = wilson_interval(5, 10, 1.0, None);
        let mid = (ci.lower + ci.upper) / 2.0;
        assert!((mid - 0.5).abs() < 1e-9, "midpoint {} should be 0.5", mid);
    }

    #[test]
    fn test_interval_narrows_with_more_data() {
        let small = wilson_interval(3, 6, 1.0, None);
        let large = wilson_interval(30, 60, 1.0, None);
        assert!(large.width() < small.width());
    }

    #[test]
    fn test_higher_z_widens_interval() {
        let loose = wilson_interval(4, 7, 1.0, None);
        let tight = wilson_interval(4, 7, 1.96, None);
        assert!(tight.width() > loose.width());
    }

    #[test]
    fn test_prior_alone_pulls_toward_prior_mean() {
        // High-tier prior, no real data: interval should sit above 0.5.
        let prior = crate::prior::BetaPrior::from_tier(0, 6, 6.0);
        let ci = wilson_interval(0, 0, 1.0, Some(prior));
        let mid = (ci.lower + ci.upper) / 2.0;
        assert!(mid > 0.5, "midpoint {} should lean high", mid);
        assert!(ci.width() < 1.0, "prior must shrink the interval");
    }

    #[test]
    fn test_real_data_overwhelms_prior() {
        // Strong prior toward the top, but a losing record drags it down.
        let prior = crate::prior::BetaPrior::from_tier(0, 6, 6.0);
        let ci = wilson_interval(0, 20, 1.0, Some(prior));
        assert!(ci.upper < 0.5, "upper {} should reflect the losses", ci.upper);
    }

    #[test]
    fn test_bitwise_determinism() {
        let a = wilson_interval(7, 11, 1.28, None);
        let b = wilson_interval(7, 11, 1.28, None);
        assert_eq!(a.lower.to_bits(), b.lower.to_bits());
        assert_eq!(a.upper.to_bits(), b.upper.to_bits());
    }
}
