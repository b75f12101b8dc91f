//! Ranking session wrapper.
//!
//! The engine itself is a pair of pure functions over a pool snapshot;
//! `RankSession` is the thin convenience layer that owns one snapshot and
//! feeds outcomes into it one at a time. There is no hidden state — a fresh
//! session replaying the same outcome history produces byte-identical
//! results, which is also how callers implement undo.

use crate::assemble::finalize;
use crate::config::{ConfigError, RankConfig};
use crate::tiering::quick_pass;
use crate::types::{IdMap, ItemRecord, Outcome, Pair, TierAssignment};

pub struct RankSession {
    pool: Vec<ItemRecord>,
    id_map: IdMap,
    config: RankConfig,
    outcomes: Vec<Outcome>,
}

impl RankSession {
    /// Start a session over a pool. The config is validated here — a
    /// malformed config is refused before any ranking happens. Duplicate
    /// item IDs and pools under two items are caller programming errors and
    /// panic.
    pub fn new(pool: Vec<ItemRecord>, config: RankConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        assert!(pool.len() >= 2, "RankSession requires at least two items to compare.");
        let id_map = IdMap::from_pool(&pool);
        Ok(RankSession { pool, id_map, config, outcomes: Vec::new() })
    }

    /// Record one head-to-head decision: the winner's wins and both
    /// participants' comparison counts each increase by exactly one.
    /// Unknown IDs and self-comparisons panic.
    pub fn record_outcome(&mut self, winner: i64, loser: i64) {
        assert!(winner != loser, "An item cannot be compared against itself: {}", winner);
        let w = self.id_map.to_idx(winner);
        let l = self.id_map.to_idx(loser);
        self.pool[w].wins += 1;
        self.pool[w].comparisons += 1;
        self.pool[l].comparisons += 1;
        self.outcomes.push(Outcome { winner, loser });
    }

    /// Provisional tiers plus the refinement queue for the vote loop.
    pub fn quick_pass(&self) -> (TierAssignment, Vec<Pair>) {
        quick_pass(&self.pool, &self.config)
    }

    /// Terminal tier assignment under the acceptance gate.
    pub fn finalize(&self) -> TierAssignment {
        finalize(&self.pool, &self.config)
    }

    pub fn pool(&self) -> &[ItemRecord] {
        &self.pool
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// All outcomes recorded so far, in arrival order. Replaying these into
    /// a fresh session reconstructs this one exactly.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn decision_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn num_items(&self) -> usize {
        self.pool.len()
    }
}
