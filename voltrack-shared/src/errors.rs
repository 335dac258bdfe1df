//! Error types shared across voltrack crates.

use thiserror::Error;

/// Result alias used throughout voltrack.
pub type VoltrackResult<T> = Result<T, VoltrackError>;

/// Errors surfaced by voltrack operations.
///
/// Only engine-level calls (list, prune, remove) propagate errors to callers.
/// Enrichment failures are absorbed by the inventory manager and never
/// appear here from `refresh()`.
#[derive(Debug, Error)]
pub enum VoltrackError {
    /// Container engine call failed (unreachable, non-zero exit, bad output).
    #[error("engine error: {0}")]
    Engine(String),

    /// External process could not be spawned or exited unsuccessfully.
    #[error("execution error: {0}")]
    Execution(String),

    /// External process did not finish before its deadline.
    #[error("timed out: {0}")]
    Timeout(String),

    /// Requested volume is not part of the current inventory.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid configuration value or unreadable config file.
    #[error("config error: {0}")]
    Config(String),
}

impl VoltrackError {
    /// Whether this error was produced by a process deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = VoltrackError::Engine("docker daemon unreachable".into());
        assert_eq!(err.to_string(), "engine error: docker daemon unreachable");

        let err = VoltrackError::NotFound("volume 'v1'".into());
        assert_eq!(err.to_string(), "not found: volume 'v1'");
    }

    #[test]
    fn test_every_variant_is_prefixed() {
        let all = [
            VoltrackError::Engine("x".into()),
            VoltrackError::Execution("x".into()),
            VoltrackError::Timeout("x".into()),
            VoltrackError::NotFound("x".into()),
            VoltrackError::Config("x".into()),
        ];

        for err in &all {
            // Exhaustive: a new variant must be added above.
            let prefix = match err {
                VoltrackError::Engine(_) => "engine error: ",
                VoltrackError::Execution(_) => "execution error: ",
                VoltrackError::Timeout(_) => "timed out: ",
                VoltrackError::NotFound(_) => "not found: ",
                VoltrackError::Config(_) => "config error: ",
            };
            assert_eq!(err.to_string(), format!("{}x", prefix));
        }
    }

    #[test]
    fn test_is_timeout() {
        assert!(VoltrackError::Timeout("git".into()).is_timeout());
        assert!(!VoltrackError::Execution("git".into()).is_timeout());
    }
}
