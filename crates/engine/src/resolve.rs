//! Logical-path resolution against the inventory store.

use crate::Context;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use sortie_remote::{ServiceHandle, path};
use tracing::instrument;

/// A confirmed-existing location in the store: concrete path (under the
/// store's actual casing) plus opaque identifier.
///
/// For any logical path at most one `ResolvedPath` exists in the live store
/// at a time; the resolver never creates a duplicate sibling that differs
/// only by casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: String,
    /// Opaque store identifier. Path-addressed transports reuse the path.
    pub id: String,
}

impl ResolvedPath {
    pub(crate) fn confirmed(path: String) -> Self {
        Self { id: path.clone(), path }
    }

    fn placeholder(path: String) -> Self {
        Self { id: format!("preview:{path}"), path }
    }
}

/// Resolves `logical` to a confirmed-existing folder, creating missing
/// segments.
///
/// Walks segment by segment from the root. Each segment is tried against the
/// [`Context`]'s cache, then a direct listing probe, then a case-insensitive
/// sibling under the current parent (reused under its existing casing, which
/// prevents duplicate-name drift from prior partial runs), and finally a
/// create request. A created segment is confirmed by listing it afterwards;
/// the follow-up listing, not the create response, is the authoritative
/// existence check, so a benign "already exists" rejection converges instead
/// of failing. Every confirmed segment is cached under its logical prefix.
///
/// In preview mode no create request is issued; a missing segment is
/// reported and cached as a placeholder so later planning still sees a
/// consistent path tree.
///
/// # Errors
/// [`ErrorKind::Path`] when `logical` is malformed, [`ErrorKind::NotCreatable`]
/// when a missing segment cannot be created and confirmed.
#[instrument(level = "trace", skip(service, ctx))]
pub async fn resolve_path(service: &ServiceHandle, ctx: &Context, logical: &str) -> Result<ResolvedPath> {
    let logical = path::validate(logical).or_raise(|| ErrorKind::Path)?;
    if let Some(resolved) = ctx.cache.get(&logical).await {
        return Ok(resolved);
    }

    let mut prefix = String::new();
    let mut resolved = ResolvedPath::confirmed(String::new());
    for segment in path::segments(&logical) {
        prefix = path::join(&prefix, segment);
        if let Some(hit) = ctx.cache.get(&prefix).await {
            resolved = hit;
            continue;
        }
        resolved = resolve_segment(service, ctx, &resolved.path, segment).await?;
        ctx.cache.insert(prefix.clone(), resolved.clone()).await;
    }
    Ok(resolved)
}

async fn resolve_segment(
    service: &ServiceHandle,
    ctx: &Context,
    parent: &str,
    segment: &str,
) -> Result<ResolvedPath> {
    let candidate = path::join(parent, segment);
    // Direct probe: a listable path exists, even when empty.
    if service.list(&candidate).await.is_ok() {
        return Ok(ResolvedPath::confirmed(candidate));
    }
    // A sibling folder that differs only by casing is reused under its
    // existing casing rather than shadowed by a duplicate.
    if let Ok(siblings) = service.list(parent).await
        && let Some(existing) =
            siblings.iter().find(|child| child.kind.is_folder() && child.name.eq_ignore_ascii_case(segment))
    {
        tracing::debug!(parent, name = %existing.name, "reusing existing folder casing");
        return Ok(ResolvedPath::confirmed(path::join(parent, &existing.name)));
    }
    if ctx.preview {
        tracing::info!(%candidate, "preview: would create folder");
        return Ok(ResolvedPath::placeholder(candidate));
    }

    tracing::info!(%candidate, "creating folder");
    let created = service.create_folder(parent, segment).await;
    // The follow-up listing is the authoritative existence check; the create
    // response alone cannot distinguish a benign collision from a real
    // failure.
    match service.list(&candidate).await {
        Ok(_) => Ok(ResolvedPath::confirmed(candidate)),
        Err(confirm) => {
            let reason = created.err().unwrap_or(confirm);
            Err(reason).or_raise(|| ErrorKind::NotCreatable(candidate))
        },
    }
}
