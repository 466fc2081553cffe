//! Reconciliation of classification decisions against the store.
//!
//! Two operation shapes: a single-item move (one relocation request, no
//! automatic retry) and a recursive folder merge (the store cannot relocate
//! a folder as a unit, only its contents). Per-entity failures are recorded
//! and the run continues; there is no rollback, and partial state is always
//! left visible rather than silently discarded.

mod folder;
mod item;
mod stream;

pub use self::folder::{MergeReport, merge_folder};
pub use self::item::move_item;
pub use self::stream::{SortEvent, sort};

/// Per-entity result of a reconciliation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The entity (or a folder's full contents) was relocated.
    Moved { source: String, target: String },
    /// The attempt failed; the entity stays where it was.
    Failed { source: String, reason: String },
    /// A protected system folder; never recursed into or moved.
    SkippedProtected { name: String },
}

/// Run-level counters, aggregated across every attempted entity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub moved: u64,
    pub failed: u64,
    pub skipped: u64,
}

impl RunStats {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Moved { .. } => self.moved += 1,
            Outcome::Failed { .. } => self.failed += 1,
            Outcome::SkippedProtected { .. } => self.skipped += 1,
        }
    }
}
