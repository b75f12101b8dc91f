//! tierwise-core: Pure-computation tier ranking engine.
//!
//! Head-to-head votes → Wilson confidence intervals → ordered tiers.
//! No IO, no UI, no persistence — just math. Bring your own judge.
//!
//! Items are identified by caller-provided `i64` IDs. The caller owns the
//! pool and drives the vote loop; every engine call is a deterministic,
//! side-effect-free function of the current snapshot.
//!
//! # Quick start
//!
//! ```rust
//! use tierwise_core::{ItemRecord, RankConfig, RankSession};
//!
//! let pool = vec![
//!     ItemRecord::new(1, "Ryu", 0),
//!     ItemRecord::new(2, "Ken", 0),
//!     ItemRecord::new(3, "Dan", 2),
//!     ItemRecord::new(4, "Sakura", 1),
//! ];
//!
//! let mut session = RankSession::new(pool, RankConfig::default()).unwrap();
//!
//! // Provisional tiers plus the comparisons worth asking for next.
//! let (provisional, queue) = session.quick_pass();
//! assert_eq!(provisional.unranked.len(), 4); // no votes yet
//! assert!(queue.is_empty());
//!
//! // The judge decides; the session accumulates.
//! session.record_outcome(1, 3);
//! session.record_outcome(2, 4);
//! session.record_outcome(1, 2);
//! session.record_outcome(3, 4);
//! session.record_outcome(1, 4);
//! session.record_outcome(2, 3);
//!
//! let tiers = session.finalize();
//! assert_eq!(tiers.len(), 4);
//! for tier in &tiers.tiers {
//!     println!("{}: {:?}", tier.name, tier.members);
//! }
//! ```

pub mod assemble;
pub mod config;
pub mod constants;
pub mod engine;
pub mod order;
pub mod prior;
mod refine;
pub mod tiering;
pub mod types;
pub mod wilson;

// Re-export primary public API at crate root.
pub use assemble::finalize;
pub use config::{ConfigError, RankConfig};
pub use constants::UNRANKED_TIER;
pub use engine::RankSession;
pub use order::compare_ranked;
pub use prior::BetaPrior;
pub use tiering::{quantile_cuts, quick_pass};
pub use types::{Interval, ItemRecord, Outcome, Pair, Tier, TierAssignment};
pub use wilson::wilson_interval;
