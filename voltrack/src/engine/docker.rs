//! [`EngineClient`] backed by the `docker` command-line client.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use voltrack_shared::errors::{VoltrackError, VoltrackResult};

use super::{EngineClient, VolumeRecord};
use crate::util::process::{CommandLine, ProcessRunner};

/// Go template making `docker volume ls` print one JSON object per line.
const LS_FORMAT: &str = "{{json .}}";

/// Talks to the engine by running `docker volume ...` subcommands.
///
/// Every invocation goes through the injected [`ProcessRunner`], so the
/// runner's deadline bounds each engine call. Any runner failure is reported
/// as [`VoltrackError::Engine`].
pub struct DockerCli {
    binary: String,
    host: Option<String>,
    runner: Arc<dyn ProcessRunner>,
}

impl DockerCli {
    pub fn new(binary: impl Into<String>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            binary: binary.into(),
            host: None,
            runner,
        }
    }

    /// Target a specific daemon (`--host`), e.g. `unix:///run/user/1000/docker.sock`.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    fn volume_command(&self) -> CommandLine {
        let mut cmd = CommandLine::new(&self.binary);
        if let Some(host) = &self.host {
            cmd = cmd.arg("--host").arg(host);
        }
        cmd.arg("volume")
    }

    async fn run(&self, cmd: CommandLine) -> VoltrackResult<String> {
        self.runner.run_capture(&cmd).await.map_err(|e| match e {
            VoltrackError::Engine(msg)
            | VoltrackError::Execution(msg)
            | VoltrackError::Timeout(msg) => VoltrackError::Engine(msg),
            other => VoltrackError::Engine(other.to_string()),
        })
    }
}

/// One line of `docker volume ls --format '{{json .}}'`.
///
/// Unlike `volume inspect`, labels arrive flattened as `k=v,k2=v2`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LsEntry {
    name: String,
    #[serde(default)]
    driver: String,
    #[serde(default)]
    mountpoint: String,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    labels: String,
}

impl From<LsEntry> for VolumeRecord {
    fn from(entry: LsEntry) -> Self {
        let mut record = VolumeRecord::new(entry.name, entry.driver, entry.mountpoint);
        record.scope = entry.scope.filter(|s| !s.is_empty());
        record.labels = parse_labels(&entry.labels);
        record
    }
}

fn parse_labels(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

fn parse_ls_output(output: &str) -> VoltrackResult<Vec<VolumeRecord>> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            serde_json::from_str::<LsEntry>(line)
                .map(VolumeRecord::from)
                .map_err(|e| {
                    VoltrackError::Engine(format!(
                        "Failed to parse volume listing line '{}': {}",
                        line, e
                    ))
                })
        })
        .collect()
}

#[async_trait]
impl EngineClient for DockerCli {
    async fn list_volumes(&self) -> VoltrackResult<Vec<VolumeRecord>> {
        let out = self
            .run(self.volume_command().args(["ls", "--format", LS_FORMAT]))
            .await?;
        let records = parse_ls_output(&out)?;

        tracing::debug!(count = records.len(), "Listed volumes");
        Ok(records)
    }

    async fn prune_volumes(&self) -> VoltrackResult<()> {
        let out = self
            .run(self.volume_command().args(["prune", "--force"]))
            .await?;
        tracing::info!(output = %out.trim(), "Pruned volumes");
        Ok(())
    }

    async fn remove_volume(&self, name: &str, force: bool) -> VoltrackResult<()> {
        let mut cmd = self.volume_command().arg("rm");
        if force {
            cmd = cmd.arg("--force");
        }
        self.run(cmd.arg(name)).await?;
        tracing::info!(volume = %name, force, "Removed volume");
        Ok(())
    }
}
