use crate::Context;
use crate::error::{ErrorKind, Result};
use crate::reconcile::{Outcome, move_item};
use crate::resolve::resolve_path;
use exn::ResultExt;
use sortie_classify::detect_subfolder;
use sortie_remote::{ServiceHandle, is_protected, path};
use tracing::instrument;

/// Accounting for one folder merge, child folders included.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
    pub moved: u64,
    pub failed: u64,
    /// Protected children, counted separately from moved and failed.
    pub skipped: u64,
}

impl MergeReport {
    /// Some children moved, others did not; the source folder was left in
    /// place so no data is stranded.
    pub fn is_partial(&self) -> bool {
        self.failed > 0 && self.moved > 0
    }

    fn absorb(&mut self, other: MergeReport) {
        self.moved += other.moved;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

/// Merges the folder at `source` into the logical `target` path.
///
/// The store cannot relocate a folder as a unit, so the merge lists the
/// source's immediate children and works through them depth-first: child
/// folders recursively merge into an equivalently-named folder under the
/// target; plain items are routed into the target — subfolder-qualified via
/// [`detect_subfolder`] when the item's name implies a type — and moved one
/// request at a time. Protected children are skipped, never recursed into.
///
/// The empty source shell is deleted only when every child moved; any
/// failure (or skipped child) leaves the source folder intact and the merge
/// is reported as partial. Only listing the source itself is fatal to the
/// merge; each child failure is counted and the walk continues.
#[instrument(level = "trace", skip(service, ctx))]
pub async fn merge_folder(
    service: &ServiceHandle,
    ctx: &Context,
    source: &str,
    target: &str,
) -> Result<MergeReport> {
    let children = service.list(source).await.or_raise(|| ErrorKind::Service)?;
    let mut report = MergeReport::default();

    for child in &children {
        if is_protected(&child.name) {
            tracing::debug!(name = %child.name, "skipping protected folder");
            report.skipped += 1;
            continue;
        }
        let child_source = path::join(source, &child.name);
        if child.kind.is_folder() {
            let child_target = path::join(target, &child.name);
            match Box::pin(merge_folder(service, ctx, &child_source, &child_target)).await {
                Ok(sub) => report.absorb(sub),
                Err(error) => {
                    tracing::warn!(source = %child_source, %error, "child merge failed");
                    report.failed += 1;
                },
            }
            continue;
        }

        let destination = match detect_subfolder(&child.name) {
            Some(subfolder) => path::join(target, subfolder),
            None => target.to_string(),
        };
        match resolve_path(service, ctx, &destination).await {
            Ok(resolved) => match move_item(service, ctx, &child_source, &resolved).await {
                Outcome::Moved { .. } => {
                    report.moved += 1;
                    tokio::time::sleep(ctx.pacing.move_delay).await;
                },
                _ => report.failed += 1,
            },
            Err(error) => {
                tracing::warn!(%destination, %error, "target not resolvable");
                report.failed += 1;
            },
        }
    }

    if report.failed > 0 {
        tracing::warn!(source, moved = report.moved, failed = report.failed, "partial merge, source left intact");
    } else if report.moved > 0 && report.skipped == 0 && !ctx.preview {
        // Shell deletion failure is benign; the folder just stays behind.
        if let Err(error) = service.delete_folder(source).await {
            tracing::debug!(source, %error, "empty source shell not deleted");
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pacing;
    use sortie_remote::MockBackend;
    use std::sync::Arc;

    fn context() -> Context {
        Context::new(Pacing::none(), false)
    }

    #[tokio::test]
    async fn test_full_merge_deletes_source_shell() {
        let mock = Arc::new(
            MockBackend::default()
                .with_items(["Inbox Zone/Sadie Pack/Sadie Hair - Blonde", "Inbox Zone/Sadie Pack/Style HUD"]),
        );
        let service: ServiceHandle = mock.clone();
        let ctx = context();

        let report = merge_folder(&service, &ctx, "Inbox Zone/Sadie Pack", "Body Parts/Hair/Sadie").await.unwrap();
        assert_eq!(report, MergeReport { moved: 2, failed: 0, skipped: 0 });
        // Items are routed into type subfolders under the target.
        assert!(mock.contains_item("Body Parts/Hair/Sadie/Hair/Sadie Hair - Blonde").await);
        assert!(mock.contains_item("Body Parts/Hair/Sadie/HUDs/Style HUD").await);
        assert!(!mock.contains_folder("Inbox Zone/Sadie Pack").await);
    }

    #[tokio::test]
    async fn test_single_failure_leaves_source_intact() {
        // The destination is pre-occupied by an identically-named item, so
        // one of the two moves is rejected.
        let mock = Arc::new(
            MockBackend::default()
                .with_items([
                    "Inbox Zone/Sadie Pack/Sadie Hair - Blonde",
                    "Inbox Zone/Sadie Pack/Style HUD",
                    "Body Parts/Hair/Sadie/Hair/Sadie Hair - Blonde",
                ]),
        );
        let service: ServiceHandle = mock.clone();
        let ctx = context();

        let report = merge_folder(&service, &ctx, "Inbox Zone/Sadie Pack", "Body Parts/Hair/Sadie").await.unwrap();
        assert_eq!(report, MergeReport { moved: 1, failed: 1, skipped: 0 });
        assert!(report.is_partial());
        assert!(mock.contains_folder("Inbox Zone/Sadie Pack").await);
        assert!(mock.contains_item("Inbox Zone/Sadie Pack/Sadie Hair - Blonde").await);
    }

    #[tokio::test]
    async fn test_recurses_into_child_folders() {
        let mock = Arc::new(MockBackend::default().with_items(["Inbox Zone/Pack/Fatpack/Red Dress"]));
        let service: ServiceHandle = mock.clone();
        let ctx = context();

        let report = merge_folder(&service, &ctx, "Inbox Zone/Pack", "Clothing/Pack").await.unwrap();
        assert_eq!(report, MergeReport { moved: 1, failed: 0, skipped: 0 });
        assert!(mock.contains_item("Clothing/Pack/Fatpack/Clothing/Red Dress").await);
        // Both shells are gone: the child's (deleted by the recursive merge)
        // and then the now-empty parent's.
        assert!(!mock.contains_folder("Inbox Zone/Pack/Fatpack").await);
        assert!(!mock.contains_folder("Inbox Zone/Pack").await);
    }

    #[tokio::test]
    async fn test_protected_child_is_skipped_and_preserves_source() {
        let mock = Arc::new(
            MockBackend::default()
                .with_folders(["Inbox Zone/Pack/Trash"])
                .with_items(["Inbox Zone/Pack/Plain Object"]),
        );
        let service: ServiceHandle = mock.clone();
        let ctx = context();

        let report = merge_folder(&service, &ctx, "Inbox Zone/Pack", "Objects/Pack").await.unwrap();
        assert_eq!(report, MergeReport { moved: 1, failed: 0, skipped: 1 });
        assert!(mock.contains_folder("Inbox Zone/Pack/Trash").await);
        assert!(mock.contains_folder("Inbox Zone/Pack").await);
    }

    #[tokio::test]
    async fn test_missing_source_is_an_error() {
        let mock = Arc::new(MockBackend::default());
        let service: ServiceHandle = mock.clone();
        let error = merge_folder(&service, &context(), "Nowhere", "Objects").await.unwrap_err();
        assert!(matches!(&*error, ErrorKind::Service));
    }
}
