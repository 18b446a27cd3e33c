//! engine::diff
//!
//! Working tree versus base, as a list of whole-file changes.

use tracing::{debug, info};

use super::EngineError;
use crate::core::diff::{compute_diff, DiffFile};
use crate::core::types::RefName;
use crate::git::{Git, GitError};

/// Snapshot the working tree and classify every change against `base`.
///
/// Returns an empty list when the working tree has no changes; callers
/// decide whether that is an error.
///
/// # Errors
///
/// - [`EngineError::ReferenceNotFound`] if `base` does not resolve locally
/// - [`EngineError::Git`] for snapshot or listing failures
/// - [`EngineError::Io`] if a changed file cannot be read
pub fn compute_diff_files(git: &Git, base: &RefName) -> Result<Vec<DiffFile>, EngineError> {
    let Some(snapshot) = git.snapshot()? else {
        info!("no changes in working tree");
        return Ok(Vec::new());
    };

    let new = git.list_blobs(snapshot.as_str())?;
    let old = git.list_blobs(base.as_str()).map_err(|e| match e {
        GitError::RefNotFound { .. } => EngineError::ReferenceNotFound(base.to_string()),
        other => other.into(),
    })?;
    debug!(
        snapshot = %snapshot.short(7),
        new = new.len(),
        base = old.len(),
        "comparing listings"
    );

    let files = compute_diff(&new, &old, git)?;
    info!(changes = files.len(), "computed diff against {}", base);
    Ok(files)
}
