//! Filesystem probing for host-side paths.
//!
//! Enrichment only needs one question answered: does a path exist? The probe
//! is a trait so tests can describe a volume layout without touching disk.

use std::path::Path;

use async_trait::async_trait;

/// Answers whether a path exists.
#[async_trait]
pub trait FsProbe: Send + Sync {
    /// Returns `true` only when `path` is known to exist.
    ///
    /// Never fails: an absent path and a path that could not be inspected
    /// (permission denied, stale network mount) both yield `false`.
    async fn path_exists(&self, path: &Path) -> bool;
}

/// [`FsProbe`] backed by the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

#[async_trait]
impl FsProbe for HostFs {
    async fn path_exists(&self, path: &Path) -> bool {
        match tokio::fs::try_exists(path).await {
            Ok(exists) => exists,
            Err(e) => {
                // Callers see `false` either way; the log keeps "could not
                // determine" apart from "absent".
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "Could not determine whether path exists"
                );
                false
            }
        }
    }
}
