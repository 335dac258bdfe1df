//! In-memory collaborators for exercising `voltrack` without docker or git.
//!
//! Each fake records the calls it receives so tests can assert on what the
//! inventory manager asked for, not just on what it produced.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use voltrack::{
    CommandLine, EngineClient, FsProbe, ProcessRunner, VoltrackError, VoltrackResult,
    VolumeContext, VolumeRecord,
};

/// Shorthand for a `local`-driver record.
pub fn record(name: &str, mountpoint: &str) -> VolumeRecord {
    VolumeRecord::new(name, "local", mountpoint)
}

/// Bundle the three fakes into a context.
pub fn context(engine: &Arc<FakeEngine>, runner: &Arc<FakeRunner>, fs: &Arc<FakeFs>) -> VolumeContext {
    VolumeContext::new(engine.clone(), runner.clone(), fs.clone())
}

// ============================================================================
// ENGINE
// ============================================================================

/// A call received by [`FakeEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    List,
    Prune,
    Remove { name: String, force: bool },
}

/// Engine whose volume list and failures are set by the test.
#[derive(Debug, Default)]
pub struct FakeEngine {
    volumes: Mutex<Vec<VolumeRecord>>,
    list_error: Mutex<Option<String>>,
    prune_error: Mutex<Option<String>>,
    remove_error: Mutex<Option<String>>,
    calls: Mutex<Vec<EngineCall>>,
}

impl FakeEngine {
    pub fn new(volumes: Vec<VolumeRecord>) -> Arc<Self> {
        Arc::new(Self {
            volumes: Mutex::new(volumes),
            ..Default::default()
        })
    }

    /// Replace what the next `list_volumes` returns.
    pub fn set_volumes(&self, volumes: Vec<VolumeRecord>) {
        *self.volumes.lock() = volumes;
    }

    /// Make `list_volumes` fail with `message` until cleared.
    pub fn fail_list(&self, message: &str) {
        *self.list_error.lock() = Some(message.to_string());
    }

    pub fn clear_list_failure(&self) {
        *self.list_error.lock() = None;
    }

    pub fn fail_prune(&self, message: &str) {
        *self.prune_error.lock() = Some(message.to_string());
    }

    pub fn fail_remove(&self, message: &str) {
        *self.remove_error.lock() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl EngineClient for FakeEngine {
    async fn list_volumes(&self) -> VoltrackResult<Vec<VolumeRecord>> {
        self.calls.lock().push(EngineCall::List);
        match self.list_error.lock().clone() {
            Some(message) => Err(VoltrackError::Engine(message)),
            None => Ok(self.volumes.lock().clone()),
        }
    }

    async fn prune_volumes(&self) -> VoltrackResult<()> {
        self.calls.lock().push(EngineCall::Prune);
        match self.prune_error.lock().clone() {
            Some(message) => Err(VoltrackError::Engine(message)),
            None => Ok(()),
        }
    }

    async fn remove_volume(&self, name: &str, force: bool) -> VoltrackResult<()> {
        self.calls.lock().push(EngineCall::Remove {
            name: name.to_string(),
            force,
        });
        match self.remove_error.lock().clone() {
            Some(message) => Err(VoltrackError::Engine(message)),
            None => Ok(()),
        }
    }
}

// ============================================================================
// PROCESS RUNNER
// ============================================================================

#[derive(Debug, Clone)]
enum Reply {
    Output(String),
    Error(String),
}

/// Runner that answers `git --git-dir=<mount>/.git/ ...` by mount point.
///
/// Mount points without a scripted reply get a "not a git repository" error.
#[derive(Debug, Default)]
pub struct FakeRunner {
    replies: Mutex<HashMap<String, Reply>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<CommandLine>>,
}

impl FakeRunner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Reply with raw `output` for the repository at `mount`.
    pub fn reply(&self, mount: &str, output: &str) {
        self.replies
            .lock()
            .insert(mount.to_string(), Reply::Output(output.to_string()));
    }

    /// Fail lookups for the repository at `mount`.
    pub fn fail(&self, mount: &str, message: &str) {
        self.replies
            .lock()
            .insert(mount.to_string(), Reply::Error(message.to_string()));
    }

    /// Sleep before answering for `mount`.
    pub fn delay(&self, mount: &str, delay: Duration) {
        self.delays.lock().insert(mount.to_string(), delay);
    }

    pub fn calls(&self) -> Vec<CommandLine> {
        self.calls.lock().clone()
    }

    fn mount_of(cmd: &CommandLine) -> Option<String> {
        cmd.get_args().iter().find_map(|arg| {
            arg.strip_prefix("--git-dir=")
                .and_then(|dir| dir.strip_suffix("/.git/"))
                .map(str::to_string)
        })
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    async fn run_capture(&self, cmd: &CommandLine) -> VoltrackResult<String> {
        self.calls.lock().push(cmd.clone());

        let mount = Self::mount_of(cmd).unwrap_or_default();
        let delay = self.delays.lock().get(&mount).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.replies.lock().get(&mount).cloned();
        match reply {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::Error(message)) => Err(VoltrackError::Execution(message)),
            None => Err(VoltrackError::Execution(format!(
                "fatal: not a git repository: '{}/.git/'",
                mount
            ))),
        }
    }
}

// ============================================================================
// FILESYSTEM
// ============================================================================

/// Filesystem that knows only the paths it was told about.
#[derive(Debug, Default)]
pub struct FakeFs {
    existing: Mutex<HashSet<PathBuf>>,
    probes: Mutex<Vec<PathBuf>>,
}

impl FakeFs {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Mark `<mount>/.git` as present.
    pub fn add_git_repo(&self, mount: &str) {
        self.existing.lock().insert(Path::new(mount).join(".git"));
    }

    pub fn probes(&self) -> Vec<PathBuf> {
        self.probes.lock().clone()
    }
}

#[async_trait]
impl FsProbe for FakeFs {
    async fn path_exists(&self, path: &Path) -> bool {
        self.probes.lock().push(path.to_path_buf());
        self.existing.lock().contains(path)
    }
}
