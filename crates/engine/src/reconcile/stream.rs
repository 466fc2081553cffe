use crate::Context;
use crate::error::{ErrorKind, Result};
use crate::reconcile::{Outcome, RunStats, merge_folder, move_item};
use crate::resolve::resolve_path;
use async_stream::stream;
use exn::ResultExt;
use futures::Stream;
use sortie_classify::{RuleSet, classify};
use sortie_remote::{Entity, ServiceHandle, is_protected, path};

/// Progress events emitted by [`sort`] as it works through the sweep roots.
///
/// Events follow a strict ordering:
/// 1. [`Started`](Self::Started) — exactly once.
/// 2. [`Discovered`](Self::Discovered) — exactly once, with the total entity
///    count across every root.
/// 3. [`Sorted`](Self::Sorted) — zero or more times, one per classified
///    entity (unclassified entities are left in place without an event).
/// 4. [`Complete`](Self::Complete) — exactly once, carrying the run's
///    aggregated counters.
///
/// Per-entity failures surface inside [`Outcome::Failed`]; `Err` items are
/// reserved for root-listing failures and never terminate the stream.
#[derive(Debug)]
pub enum SortEvent {
    /// Sorting has begun; emitted exactly once before any other event.
    Started,
    /// Every sweep root has been listed; the total entity count is known.
    Discovered(u64),
    /// One entity has been reconciled (or skipped as protected).
    Sorted(Outcome),
    /// The run is finished; the stream yields nothing further.
    Complete(RunStats),
}

/// Streams [`SortEvent`]s while reconciling every entity under `roots`.
///
/// Execution is strictly sequential: no request overlaps another against the
/// store. Each root is listed, then each discovered entity is classified
/// against `rules` — folders merge recursively into their classified target,
/// items move directly into theirs. A short delay follows every successful
/// move and a longer pause follows every `batch_size` moves, per the
/// [`Context`]'s pacing policy. Entities that match no rule are left for
/// manual handling.
pub fn sort<'a>(
    service: &'a ServiceHandle,
    ctx: &'a Context,
    rules: &'a RuleSet,
    roots: &'a [String],
) -> impl Stream<Item = Result<SortEvent>> + 'a {
    // `rustfmt` does not format macros that use braces. Wrap in parentheses!
    stream!({
        yield Ok(SortEvent::Started);

        let mut entities: Vec<(String, Entity)> = Vec::new();
        for root in roots {
            match service.list(root).await {
                Ok(children) => entities.extend(children.into_iter().map(|child| (root.clone(), child))),
                Err(error) => yield Err(error).or_raise(|| ErrorKind::Service),
            }
        }
        // Infallible: a usize (either 32- or 64-bit) will always fit in a u64.
        yield Ok(SortEvent::Discovered(u64::try_from(entities.len()).unwrap_or(0)));

        let mut stats = RunStats::default();
        let mut batch = 0usize;
        for (root, entity) in &entities {
            let Some(outcome) = sort_entity(service, ctx, rules, root, entity).await else {
                continue;
            };
            stats.record(&outcome);
            let advanced = matches!(outcome, Outcome::Moved { .. });
            yield Ok(SortEvent::Sorted(outcome));

            if advanced {
                tokio::time::sleep(ctx.pacing.move_delay).await;
                batch += 1;
                if batch >= ctx.pacing.batch_size {
                    tracing::info!(size = ctx.pacing.batch_size, "batch complete, pausing");
                    tokio::time::sleep(ctx.pacing.batch_pause).await;
                    batch = 0;
                }
            }
        }

        yield Ok(SortEvent::Complete(stats));
    })
}

/// Reconciles one entity; `None` means no rule claimed the name and the
/// entity stays put.
async fn sort_entity(
    service: &ServiceHandle,
    ctx: &Context,
    rules: &RuleSet,
    root: &str,
    entity: &Entity,
) -> Option<Outcome> {
    if is_protected(&entity.name) {
        tracing::debug!(name = %entity.name, "skipping protected folder");
        return Some(Outcome::SkippedProtected { name: entity.name.clone() });
    }
    let Some(decision) = classify(&entity.name, rules) else {
        tracing::debug!(name = %entity.name, "no classification, leaving in place");
        return None;
    };
    let source = path::join(root, &entity.name);

    if entity.kind.is_folder() {
        tracing::info!(%source, rule = %decision.rule, target = %decision.target, "merging folder");
        return Some(match merge_folder(service, ctx, &source, &decision.target).await {
            Ok(report) if report.failed == 0 && report.moved > 0 => {
                Outcome::Moved { source, target: decision.target }
            },
            Ok(report) if report.is_partial() => Outcome::Failed {
                source,
                reason: format!("partial merge: {} moved, {} failed", report.moved, report.failed),
            },
            Ok(_) => Outcome::Failed { source, reason: "nothing to merge".to_string() },
            Err(error) => Outcome::Failed { source, reason: error.to_string() },
        });
    }

    tracing::info!(%source, rule = %decision.rule, target = %decision.target, "moving item");
    match resolve_path(service, ctx, &decision.target).await {
        Ok(resolved) => Some(move_item(service, ctx, &source, &resolved).await),
        Err(error) => Some(Outcome::Failed { source, reason: error.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pacing;
    use futures::{StreamExt, pin_mut};
    use sortie_remote::MockBackend;
    use std::sync::Arc;

    /// Names and the targets the default rule table classifies them to.
    const EXPECTED: [(&str, &str); 12] = [
        ("Mysterious Gacha Box", "Boxed Items"),
        ("DEMO - Summer Dress", "_Demos"),
        ("[Magika] Sadie Hair", "Body Parts/Hair/Magika/Sadie"),
        ("Truth - Farrah v2.1", "Body Parts/Hair/Truth/Farrah"),
        ("Stealthic :: Vice", "Body Parts/Hair/Stealthic/Vice"),
        ("Leather Hood (strict)", "BDSM/Equipment"),
        ("Maitreya Lara Body", "Body Parts/Bodies"),
        ("Cuban heel pumps", "Clothing/Shoes"),
        ("Sheer Stockings", "Clothing/Hosiery"),
        ("LeLUTKA Avalon Head", "Body Parts/Heads"),
        ("Salsa Dance Pack", "Gestures/Dances"),
        ("Oak Dining Table", "Objects/Furniture"),
    ];

    async fn run(service: &ServiceHandle, ctx: &Context, rules: &RuleSet, roots: &[String]) -> RunStats {
        let events = sort(service, ctx, rules, roots);
        pin_mut!(events);
        let mut stats = None;
        while let Some(event) = events.next().await {
            if let SortEvent::Complete(s) = event.unwrap() {
                stats = Some(s);
            }
        }
        stats.unwrap()
    }

    #[tokio::test]
    async fn test_event_ordering() {
        let mock = Arc::new(MockBackend::default().with_items(["Incoming/Oak Dining Table"]));
        let service: ServiceHandle = mock.clone();
        let ctx = Context::new(Pacing::none(), false);
        let rules = RuleSet::defaults();
        let roots = vec!["Incoming".to_string()];

        let events = sort(&service, &ctx, &rules, &roots);
        pin_mut!(events);
        let mut seen = Vec::new();
        while let Some(event) = events.next().await {
            seen.push(event.unwrap());
        }
        assert!(matches!(seen[0], SortEvent::Started));
        assert!(matches!(seen[1], SortEvent::Discovered(1)));
        assert!(matches!(&seen[2], SortEvent::Sorted(Outcome::Moved { .. })));
        assert!(matches!(seen[3], SortEvent::Complete(RunStats { moved: 1, failed: 0, skipped: 0 })));
        assert_eq!(seen.len(), 4);
    }

    #[tokio::test]
    async fn test_default_rules_reproduce_target_table() {
        let mock = Arc::new(MockBackend::default().with_items(EXPECTED.map(|(name, _)| format!("Incoming/{name}"))));
        let service: ServiceHandle = mock.clone();
        let ctx = Context::new(Pacing::none(), false);
        let rules = RuleSet::defaults();
        let roots = vec!["Incoming".to_string()];

        let stats = run(&service, &ctx, &rules, &roots).await;
        assert_eq!(stats, RunStats { moved: 12, failed: 0, skipped: 0 });
        for (name, target) in EXPECTED {
            let destination = format!("{target}/{name}");
            assert!(mock.contains_item(&destination).await, "missing {destination}");
            assert!(!mock.contains_item(&format!("Incoming/{name}")).await);
        }
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let mock = Arc::new(MockBackend::default().with_items(EXPECTED.map(|(name, _)| format!("Incoming/{name}"))));
        let service: ServiceHandle = mock.clone();
        let rules = RuleSet::defaults();
        let roots = vec!["Incoming".to_string()];

        let first = Context::new(Pacing::none(), false);
        run(&service, &first, &rules, &roots).await;
        let mutations = mock.mutation_count();

        // A fresh context (empty cache) against the reconciled tree must not
        // touch the store again.
        let second = Context::new(Pacing::none(), false);
        let stats = run(&service, &second, &rules, &roots).await;
        assert_eq!(stats, RunStats::default());
        assert_eq!(mock.mutation_count(), mutations);
    }

    #[tokio::test]
    async fn test_protected_roots_children_are_skipped() {
        let mock = Arc::new(MockBackend::default().with_folders(["Incoming/Trash"]).with_items(["Incoming/Oak Dining Table"]));
        let service: ServiceHandle = mock.clone();
        let ctx = Context::new(Pacing::none(), false);
        let rules = RuleSet::defaults();
        let roots = vec!["Incoming".to_string()];

        let stats = run(&service, &ctx, &rules, &roots).await;
        assert_eq!(stats, RunStats { moved: 1, failed: 0, skipped: 1 });
        assert!(mock.contains_folder("Incoming/Trash").await);
    }

    #[tokio::test]
    async fn test_unclassified_entities_are_left_in_place() {
        let mock = Arc::new(MockBackend::default().with_items(["Incoming/Random Trinket"]));
        let service: ServiceHandle = mock.clone();
        let ctx = Context::new(Pacing::none(), false);
        let rules = RuleSet::defaults();
        let roots = vec!["Incoming".to_string()];

        let stats = run(&service, &ctx, &rules, &roots).await;
        assert_eq!(stats, RunStats::default());
        assert!(mock.contains_item("Incoming/Random Trinket").await);
    }

    #[tokio::test]
    async fn test_missing_root_yields_error_but_continues() {
        let mock = Arc::new(MockBackend::default().with_items(["Incoming/Oak Dining Table"]));
        let service: ServiceHandle = mock.clone();
        let ctx = Context::new(Pacing::none(), false);
        let rules = RuleSet::defaults();
        let roots = vec!["Nowhere".to_string(), "Incoming".to_string()];

        let events = sort(&service, &ctx, &rules, &roots);
        pin_mut!(events);
        let mut errors = 0;
        let mut stats = None;
        while let Some(event) = events.next().await {
            match event {
                Ok(SortEvent::Complete(s)) => stats = Some(s),
                Ok(_) => {},
                Err(_) => errors += 1,
            }
        }
        assert_eq!(errors, 1);
        assert_eq!(stats.unwrap(), RunStats { moved: 1, failed: 0, skipped: 0 });
    }

    #[tokio::test]
    async fn test_preview_run_mutates_nothing() {
        let mock = Arc::new(MockBackend::default().with_items(EXPECTED.map(|(name, _)| format!("Incoming/{name}"))));
        let service: ServiceHandle = mock.clone();
        let ctx = Context::new(Pacing::none(), true);
        let rules = RuleSet::defaults();
        let roots = vec!["Incoming".to_string()];

        let stats = run(&service, &ctx, &rules, &roots).await;
        assert_eq!(stats, RunStats { moved: 12, failed: 0, skipped: 0 });
        assert_eq!(mock.mutation_count(), 0);
    }
}
