use std::collections::HashMap;

/// One item in the ranking pool.
///
/// Items are identified by caller-provided `i64` IDs. The caller owns the
/// pool; the engine only reads snapshots of it. Any display metadata beyond
/// `name_key` belongs to the caller and is joined back in after tier
/// assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRecord {
    /// Item ID.
    pub id: i64,
    /// Lowercase display key, used as a deterministic tie-break.
    pub name_key: String,
    /// 0-based position of the tier the item sat in before ranking started.
    /// Seeds the quick-pass Beta prior.
    pub prior_tier_index: usize,
    /// Head-to-head wins accumulated this session.
    pub wins: u32,
    /// Head-to-head comparisons accumulated this session.
    pub comparisons: u32,
}

impl ItemRecord {
    /// Create a fresh record with zero statistics. `name` is lowercased.
    pub fn new(id: i64, name: &str, prior_tier_index: usize) -> Self {
        ItemRecord {
            id,
            name_key: name.to_lowercase(),
            prior_tier_index,
            wins: 0,
            comparisons: 0,
        }
    }
}

/// A recorded head-to-head decision. Immutable once recorded; feeds the
/// winner's win count and both participants' comparison counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    pub winner: i64,
    pub loser: i64,
}

/// A binomial proportion confidence interval, both bounds in `[0, 1]`.
/// Derived on demand from an item's statistics — never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// A comparison still to be collected: two item IDs.
pub type Pair = (i64, i64);

/// Order-insensitive key for deduplicating pairs within a refinement round.
pub(crate) fn pair_key(a: i64, b: i64) -> (i64, i64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// One named tier and its members, best first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tier {
    pub name: String,
    /// Member IDs ordered by descending lower bound (ranking order).
    pub members: Vec<i64>,
}

/// Complete tier assignment for a pool: every pool item appears exactly once,
/// either in a named tier or in the reserved `"unranked"` bucket.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierAssignment {
    /// Named tiers, best to worst. Tiers may be empty.
    pub tiers: Vec<Tier>,
    /// Items below the minimum comparison count, sorted by name then ID.
    pub unranked: Vec<i64>,
}

impl TierAssignment {
    /// Tier name for an item, or `"unranked"`, or `None` if the ID is not in
    /// this assignment.
    pub fn tier_of(&self, id: i64) -> Option<&str> {
        for tier in &self.tiers {
            if tier.members.contains(&id) {
                return Some(&tier.name);
            }
        }
        if self.unranked.contains(&id) {
            return Some(crate::constants::UNRANKED_TIER);
        }
        None
    }

    /// Total items covered, ranked plus unranked.
    pub fn len(&self) -> usize {
        self.tiers.iter().map(|t| t.members.len()).sum::<usize>() + self.unranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Maps caller-provided i64 IDs to pool indices. Duplicate IDs are a caller
/// programming error.
pub(crate) struct IdMap {
    id_to_idx: HashMap<i64, usize>,
}

impl IdMap {
    pub fn from_pool(pool: &[ItemRecord]) -> Self {
        let mut id_to_idx = HashMap::with_capacity(pool.len());
        for (idx, item) in pool.iter().enumerate() {
            let prev = id_to_idx.insert(item.id, idx);
            assert!(prev.is_none(), "Duplicate item ID: {}", item.id);
        }
        IdMap { id_to_idx }
    }

    pub fn to_idx(&self, id: i64) -> usize {
        *self
            .id_to_idx
            .get(&id)
            .unwrap_or_else(|| panic!("Unknown item ID: {}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_record_lowercases_name() {
        let item = ItemRecord::new(1, "Ryu", 0);
        assert_eq!(item.name_key, "ryu");
        assert_eq!(item.wins, 0);
        assert_eq!(item.comparisons, 0);
    }

    #[test]
    fn test_pair_key_is_order_insensitive() {
        assert_eq!(pair_key(3, 7), pair_key(7, 3));
        assert_eq!(pair_key(5, 5), (5, 5));
    }

    #[test]
    fn test_tier_of_covers_all_buckets() {
        let assignment = TierAssignment {
            tiers: vec![
                Tier { name: "S".into(), members: vec![1, 2] },
                Tier { name: "A".into(), members: vec![3] },
            ],
            unranked: vec![4],
        };
        assert_eq!(assignment.tier_of(1), Some("S"));
        assert_eq!(assignment.tier_of(3), Some("A"));
        assert_eq!(assignment.tier_of(4), Some(crate::constants::UNRANKED_TIER));
        assert_eq!(assignment.tier_of(99), None);
        assert_eq!(assignment.len(), 4);
    }

    #[test]
    #[should_panic(expected = "Duplicate item ID")]
    fn test_id_map_rejects_duplicates() {
        let pool = vec![ItemRecord::new(1, "a", 0), ItemRecord::new(1, "b", 0)];
        let _ = IdMap::from_pool(&pool);
    }

    #[test]
    #[should_panic(expected = "Unknown item ID")]
    fn test_id_map_unknown_id_panics() {
        let pool = vec![ItemRecord::new(1, "a", 0)];
        let map = IdMap::from_pool(&pool);
        let _ = map.to_idx(2);
    }
}
