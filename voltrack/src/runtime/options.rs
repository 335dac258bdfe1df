//! Configuration for voltrack.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use voltrack_shared::constants::{defaults, envs};
use voltrack_shared::errors::{VoltrackError, VoltrackResult};

/// Options used when building a [`VolumeManager`](crate::VolumeManager).
///
/// Resolution order, lowest to highest priority: defaults, JSON config file,
/// environment, explicit CLI flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoltrackOptions {
    /// docker client binary, looked up in `PATH` unless absolute.
    pub docker_binary: String,

    /// Daemon endpoint passed as `--host`. `None` lets docker decide.
    pub docker_host: Option<String>,

    /// git binary used for branch lookup.
    pub git_binary: String,

    /// Deadline for every external process, in seconds.
    ///
    /// A git lookup that times out leaves the branch empty; a docker call
    /// that times out fails the operation.
    pub command_timeout_secs: u64,

    /// Volumes enriched at once during refresh. `1` is strictly sequential.
    pub enrich_concurrency: usize,

    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for VoltrackOptions {
    fn default() -> Self {
        Self {
            docker_binary: defaults::DOCKER_BINARY.to_string(),
            docker_host: None,
            git_binary: defaults::GIT_BINARY.to_string(),
            command_timeout_secs: defaults::COMMAND_TIMEOUT_SECS,
            enrich_concurrency: defaults::ENRICH_CONCURRENCY,
            log_level: defaults::LOG_LEVEL.to_string(),
        }
    }
}

impl VoltrackOptions {
    /// Load options from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> VoltrackResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            VoltrackError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            VoltrackError::Config(format!(
                "Invalid config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Apply `VOLTRACK_DOCKER`, `DOCKER_HOST` and `VOLTRACK_GIT` overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_with_lookup(|k| std::env::var(k).ok())
    }

    /// [`apply_env`](Self::apply_env) with an injectable variable lookup.
    pub fn apply_env_with_lookup<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        if let Some(docker) = non_empty(envs::VOLTRACK_DOCKER) {
            self.docker_binary = docker;
        }
        if let Some(host) = non_empty(envs::DOCKER_HOST) {
            self.docker_host = Some(host);
        }
        if let Some(git) = non_empty(envs::VOLTRACK_GIT) {
            self.git_binary = git;
        }
    }

    /// Check invariants the manager relies on.
    pub fn validate(&self) -> VoltrackResult<()> {
        if self.docker_binary.trim().is_empty() {
            return Err(VoltrackError::Config("docker_binary must not be empty".into()));
        }
        if self.git_binary.trim().is_empty() {
            return Err(VoltrackError::Config("git_binary must not be empty".into()));
        }
        if self.command_timeout_secs == 0 {
            return Err(VoltrackError::Config(
                "command_timeout_secs must be at least 1".into(),
            ));
        }
        if self.enrich_concurrency == 0 {
            return Err(VoltrackError::Config(
                "enrich_concurrency must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let options = VoltrackOptions::default();
        assert_eq!(options.docker_binary, "docker");
        assert_eq!(options.git_binary, "git");
        assert_eq!(options.docker_host, None);
        assert_eq!(options.command_timeout(), Duration::from_secs(10));
        assert_eq!(options.enrich_concurrency, 1);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"docker_host": "unix:///run/docker.sock", "enrich_concurrency": 8}}"#
        )
        .unwrap();

        let options = VoltrackOptions::load(file.path()).unwrap();
        assert_eq!(options.docker_host.as_deref(), Some("unix:///run/docker.sock"));
        assert_eq!(options.enrich_concurrency, 8);
        assert_eq!(options.docker_binary, "docker");
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "docker_host = 1").unwrap();

        let err = VoltrackOptions::load(file.path()).unwrap_err();
        assert!(matches!(err, VoltrackError::Config(_)));
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = VoltrackOptions::load(Path::new("/voltrack/missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("VOLTRACK_DOCKER", "/opt/podman/bin/docker"),
            ("DOCKER_HOST", "tcp://127.0.0.1:2375"),
            ("VOLTRACK_GIT", "   "),
        ]
        .into_iter()
        .collect();

        let mut options = VoltrackOptions::default();
        options.apply_env_with_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(options.docker_binary, "/opt/podman/bin/docker");
        assert_eq!(options.docker_host.as_deref(), Some("tcp://127.0.0.1:2375"));
        // Blank values are ignored.
        assert_eq!(options.git_binary, "git");
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let options = VoltrackOptions {
            enrich_concurrency: 0,
            ..Default::default()
        };
        assert!(options.validate().is_err());

        let options = VoltrackOptions {
            docker_binary: "".into(),
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }
}
