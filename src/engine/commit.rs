//! engine::commit
//!
//! Builds a commit on top of a base branch from classified file changes.
//!
//! # Steps
//!
//! 1. Upload one blob per file with content, at most `concurrency` at a time.
//!    All uploads finish before anything else happens.
//! 2. Resolve the base ref to its commit.
//! 3. Create a tree over the base: upserts for uploaded blobs, removals for
//!    deletions.
//! 4. Create a commit whose only parent is the base commit.
//!
//! No ref is moved. Blobs uploaded before a failure are left behind.

use std::collections::HashMap;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use super::EngineError;
use crate::core::diff::DiffFile;
use crate::core::tree::TreeOverlayEntry;
use crate::core::types::{Oid, RefName};
use crate::forge::{ForgeError, ObjectStore};

/// Build a commit applying `files` to `base` and return its id.
///
/// `concurrency` bounds the number of blob uploads in flight (minimum 1).
///
/// # Errors
///
/// - [`EngineError::ReferenceNotFound`] if the store cannot resolve `base`
/// - [`EngineError::Forge`] for any other store failure
pub async fn build_commit(
    store: &dyn ObjectStore,
    base: &RefName,
    files: &[DiffFile],
    message: &str,
    concurrency: usize,
) -> Result<Oid, EngineError> {
    let blobs = upload_blobs(store, files, concurrency).await?;

    let parent = store.resolve_ref(base).await.map_err(|e| match e {
        ForgeError::NotFound(_) => EngineError::ReferenceNotFound(base.to_string()),
        other => other.into(),
    })?;
    debug!(parent = %parent.short(7), "resolved {}", base);

    let overlay: Vec<TreeOverlayEntry> = files
        .iter()
        .map(|file| match blobs.get(file.path.as_str()) {
            Some(oid) => TreeOverlayEntry::upsert(file.path.clone(), file.mode, oid.clone()),
            None => TreeOverlayEntry::remove(file.path.clone(), file.mode),
        })
        .collect();

    info!(entries = overlay.len(), "create tree");
    let tree = store.create_tree(&parent, &overlay).await?;

    info!(tree = %tree.short(7), "create commit");
    let commit = store.create_commit(&parent, &tree, message).await?;

    info!(commit = %commit.short(7), store = store.name(), "commit built");
    Ok(commit)
}

/// Upload the content of every non-deleted file, keyed by path.
async fn upload_blobs<'a>(
    store: &dyn ObjectStore,
    files: &'a [DiffFile],
    concurrency: usize,
) -> Result<HashMap<&'a str, Oid>, ForgeError> {
    let uploads = files
        .iter()
        .filter_map(|file| Some((file.path.as_str(), file.content.as_bytes()?)));

    stream::iter(uploads)
        .map(|(path, bytes)| async move {
            info!(path, bytes = bytes.len(), "upload blob");
            store.create_blob(bytes).await.map(|oid| (path, oid))
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}
