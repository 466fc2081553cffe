use crate::Context;
use crate::reconcile::Outcome;
use crate::resolve::ResolvedPath;
use sortie_remote::ServiceHandle;
use tracing::instrument;

/// Issues one relocation request for the entity at `source` into the
/// resolved `target` folder.
///
/// Success and failure are both reported through the returned [`Outcome`];
/// no retry is attempted. In preview mode the move is logged and reported as
/// if it succeeded.
#[instrument(level = "trace", skip(service, ctx, target), fields(target = %target.path))]
pub async fn move_item(service: &ServiceHandle, ctx: &Context, source: &str, target: &ResolvedPath) -> Outcome {
    if ctx.preview {
        tracing::info!(source, target = %target.path, "preview: would move");
        return Outcome::Moved { source: source.to_string(), target: target.path.clone() };
    }
    match service.move_entity(source, &target.path).await {
        Ok(()) => {
            tracing::debug!(source, target = %target.path, "moved");
            Outcome::Moved { source: source.to_string(), target: target.path.clone() }
        },
        Err(error) => {
            tracing::warn!(source, %error, "move failed");
            Outcome::Failed { source: source.to_string(), reason: error.to_string() }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pacing;
    use sortie_remote::MockBackend;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_moves_item() {
        let mock = Arc::new(MockBackend::default().with_folders(["Clothing"]).with_items(["Inbox Zone/Dress"]));
        let service: ServiceHandle = mock.clone();
        let ctx = Context::new(Pacing::none(), false);
        let target = crate::resolve_path(&service, &ctx, "Clothing").await.unwrap();

        let outcome = move_item(&service, &ctx, "Inbox Zone/Dress", &target).await;
        assert!(matches!(outcome, Outcome::Moved { .. }));
        assert!(mock.contains_item("Clothing/Dress").await);
    }

    #[tokio::test]
    async fn test_failure_is_an_outcome_not_an_error() {
        let mock = Arc::new(MockBackend::default().with_folders(["Clothing"]));
        let service: ServiceHandle = mock.clone();
        let ctx = Context::new(Pacing::none(), false);
        let target = crate::resolve_path(&service, &ctx, "Clothing").await.unwrap();

        let outcome = move_item(&service, &ctx, "Inbox Zone/Missing", &target).await;
        assert!(matches!(outcome, Outcome::Failed { .. }));
    }

    #[tokio::test]
    async fn test_preview_mutates_nothing() {
        let mock = Arc::new(MockBackend::default().with_folders(["Clothing"]).with_items(["Inbox Zone/Dress"]));
        let service: ServiceHandle = mock.clone();
        let ctx = Context::new(Pacing::none(), true);
        let target = crate::resolve_path(&service, &ctx, "Clothing").await.unwrap();
        let mutations = mock.mutation_count();

        let outcome = move_item(&service, &ctx, "Inbox Zone/Dress", &target).await;
        assert!(matches!(outcome, Outcome::Moved { .. }));
        assert_eq!(mock.mutation_count(), mutations);
        assert!(mock.contains_item("Inbox Zone/Dress").await);
    }
}
