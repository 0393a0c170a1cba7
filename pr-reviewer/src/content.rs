//! Local content loader for changed files.
//!
//! A file reported as changed may have been deleted or renamed after the
//! listing, or the local checkout may simply not contain it. That case is a
//! **soft-skip** (warn + `Ok(None)`), never an error. Every other I/O failure
//! — permission denied, path is a directory, non-UTF-8 bytes — is a hard
//! failure for that file only; the driver logs it and moves on.

use std::io;
use std::path::Path;

use tokio::fs;
use tracing::warn;

use crate::errors::PrResult;
use crate::types::FileContent;

/// Reads `path` relative to `root`.
///
/// Returns `Ok(None)` when the file does not exist.
pub async fn load_content(root: &Path, path: &str) -> PrResult<Option<FileContent>> {
    let abs = root.join(path);
    match fs::read_to_string(&abs).await {
        Ok(text) => Ok(Some(FileContent {
            path: path.to_string(),
            text,
        })),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("file not found locally: {}, skipping", path);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
