//! Reconciliation engine: turns classification decisions into safe,
//! repeatable mutations against the inventory store.
//!
//! [`resolve_path`] maps a logical target path to a confirmed-existing
//! folder, creating missing segments and caching the result in the
//! [`Context`]'s [`PathCache`]. The [`reconcile`] module then relocates
//! items and recursively merges folders into those targets, pacing requests
//! and accounting for partial failure — user data is never deleted, only
//! empty folder shells left behind by a fully successful merge.

mod cache;
pub mod error;
mod reconcile;
mod resolve;

pub use crate::cache::PathCache;
pub use crate::reconcile::{MergeReport, Outcome, RunStats, SortEvent, merge_folder, move_item, sort};
pub use crate::resolve::{ResolvedPath, resolve_path};
use std::time::Duration;

/// Request-rate policy against a store with undocumented rate limits.
///
/// This is resource protection, not performance tuning: a short delay
/// follows every successful move, and a longer pause is inserted after each
/// batch of moves.
#[derive(Debug, Clone)]
pub struct Pacing {
    /// Delay after every successful move.
    pub move_delay: Duration,
    /// Number of moves that make up a batch.
    pub batch_size: usize,
    /// Pause after each completed batch.
    pub batch_pause: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            move_delay: Duration::from_secs(1),
            batch_size: 10,
            batch_pause: Duration::from_secs(5),
        }
    }
}

impl Pacing {
    /// No pacing at all. Tests only, realistically.
    pub fn none() -> Self {
        Self { move_delay: Duration::ZERO, batch_size: usize::MAX, batch_pause: Duration::ZERO }
    }
}

/// Shared state for one reconciliation run.
///
/// Explicit rather than ambient: independent runs (and tests) each carry
/// their own context, so caches never cross-contaminate.
#[derive(Debug, Default)]
pub struct Context {
    pub cache: PathCache,
    pub pacing: Pacing,
    /// When set, mutating requests become log-only no-ops that still
    /// populate the cache with placeholder confirmations.
    pub preview: bool,
}

impl Context {
    pub fn new(pacing: Pacing, preview: bool) -> Self {
        Self { cache: PathCache::default(), pacing, preview }
    }
}
