//! Volume entity and the collaborators it carries.
//!
//! A [`Volume`] is a thin view over the engine's [`VolumeRecord`] plus the
//! derived git branch. Every volume built by one manager shares the same
//! [`VolumeContext`], so per-volume operations reach the same engine.

mod enrich;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use voltrack_shared::errors::VoltrackResult;

use crate::engine::{EngineClient, VolumeRecord};
use crate::fs::FsProbe;
use crate::util::process::ProcessRunner;

/// Shared collaborators injected into the manager and every volume.
#[derive(Clone)]
pub struct VolumeContext {
    engine: Arc<dyn EngineClient>,
    runner: Arc<dyn ProcessRunner>,
    fs: Arc<dyn FsProbe>,
    git_binary: String,
}

impl VolumeContext {
    pub fn new(
        engine: Arc<dyn EngineClient>,
        runner: Arc<dyn ProcessRunner>,
        fs: Arc<dyn FsProbe>,
    ) -> Self {
        Self {
            engine,
            runner,
            fs,
            git_binary: voltrack_shared::constants::defaults::GIT_BINARY.to_string(),
        }
    }

    /// Use a git binary other than `git` from `PATH`.
    pub fn with_git_binary(mut self, git_binary: impl Into<String>) -> Self {
        self.git_binary = git_binary.into();
        self
    }

    pub fn engine(&self) -> &Arc<dyn EngineClient> {
        &self.engine
    }

    pub fn runner(&self) -> &Arc<dyn ProcessRunner> {
        &self.runner
    }

    pub fn fs(&self) -> &Arc<dyn FsProbe> {
        &self.fs
    }

    pub fn git_binary(&self) -> &str {
        &self.git_binary
    }
}

impl fmt::Debug for VolumeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumeContext")
            .field("git_binary", &self.git_binary)
            .finish_non_exhaustive()
    }
}

/// One engine volume plus its derived branch.
#[derive(Clone)]
pub struct Volume {
    record: VolumeRecord,
    branch: String,
    ctx: Arc<VolumeContext>,
}

impl Volume {
    pub(crate) fn new(record: VolumeRecord, ctx: Arc<VolumeContext>) -> Self {
        Self {
            record,
            branch: String::new(),
            ctx,
        }
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn driver(&self) -> &str {
        &self.record.driver
    }

    pub fn mount_point(&self) -> &str {
        &self.record.mountpoint
    }

    /// Current git branch, or `""` when the mount point is not a working
    /// tree or the lookup failed.
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Full engine descriptor.
    pub fn record(&self) -> &VolumeRecord {
        &self.record
    }

    /// Presentation columns: driver, name, branch.
    ///
    /// `_focused` is reserved for highlighting and does not change the output.
    pub fn display_fields(&self, _focused: bool) -> [String; 3] {
        [
            self.driver().to_string(),
            self.name().to_string(),
            self.branch.clone(),
        ]
    }

    /// Delete this volume on the engine.
    ///
    /// The manager's inventory still lists the volume until the next refresh.
    pub async fn remove(&self, force: bool) -> VoltrackResult<()> {
        tracing::debug!(volume = %self.name(), force, "Removing volume");
        self.ctx.engine().remove_volume(self.name(), force).await
    }

    /// Serializable snapshot for JSON/YAML output.
    pub fn info(&self) -> VolumeInfo {
        VolumeInfo {
            name: self.record.name.clone(),
            driver: self.record.driver.clone(),
            mountpoint: self.record.mountpoint.clone(),
            branch: self.branch.clone(),
            scope: self.record.scope.clone(),
            created_at: self.record.created_at.clone(),
            labels: self.record.labels.clone(),
        }
    }

    /// Resolve the branch. Consumes `self` so a volume is enriched at most once.
    pub(crate) async fn enrich(mut self) -> Self {
        if let Some(branch) =
            enrich::resolve_branch(&self.ctx, &self.record.name, &self.record.mountpoint).await
        {
            tracing::debug!(volume = %self.record.name, branch = %branch, "Resolved branch");
            self.branch = branch;
        }
        self
    }
}

impl fmt::Debug for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Volume")
            .field("name", &self.record.name)
            .field("driver", &self.record.driver)
            .field("mountpoint", &self.record.mountpoint)
            .field("branch", &self.branch)
            .finish()
    }
}

/// Public metadata about a volume (returned by list operations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeInfo {
    pub name: String,
    pub driver: String,
    pub mountpoint: String,
    /// Empty unless the volume is a git working tree.
    pub branch: String,
    pub scope: Option<String>,
    pub created_at: Option<String>,
    pub labels: HashMap<String, String>,
}
