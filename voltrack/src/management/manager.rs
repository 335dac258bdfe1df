//! Volume inventory manager.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use parking_lot::RwLock;
use voltrack_shared::errors::{VoltrackError, VoltrackResult};

use crate::engine::DockerCli;
use crate::fs::HostFs;
use crate::runtime::options::VoltrackOptions;
use crate::util::process::HostProcessRunner;
use crate::volumes::{Volume, VolumeContext};

/// Owns the ordered inventory of engine volumes.
///
/// Cloneable; all clones share one inventory.
///
/// # Design
///
/// - **Snapshot**: the inventory is an `Arc<[Volume]>` replaced wholesale on
///   each successful refresh, never patched. Readers keep whatever snapshot
///   they obtained.
/// - **Ordering**: ascending by name (byte order), stable for equal names.
/// - **Failure isolation**: only the listing call can fail a refresh.
///   Branch lookups that fail leave the branch empty.
#[derive(Clone, Debug)]
pub struct VolumeManager {
    ctx: Arc<VolumeContext>,
    enrich_concurrency: usize,
    volumes: Arc<RwLock<Arc<[Volume]>>>,
}

impl VolumeManager {
    /// Create a manager with an empty inventory. Enrichment is sequential.
    pub fn new(ctx: VolumeContext) -> Self {
        Self {
            ctx: Arc::new(ctx),
            enrich_concurrency: 1,
            volumes: Arc::new(RwLock::new(Arc::from(Vec::new()))),
        }
    }

    /// Build the production stack (docker CLI, host processes, host
    /// filesystem) from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`VoltrackError::Config`] if `options` fail validation.
    pub fn from_options(options: &VoltrackOptions) -> VoltrackResult<Self> {
        options.validate()?;

        let runner = Arc::new(HostProcessRunner::new(options.command_timeout()));
        let mut docker = DockerCli::new(&options.docker_binary, runner.clone());
        if let Some(host) = &options.docker_host {
            docker = docker.with_host(host);
        }

        let ctx = VolumeContext::new(Arc::new(docker), runner, Arc::new(HostFs))
            .with_git_binary(&options.git_binary);

        tracing::debug!(
            docker = %options.docker_binary,
            git = %options.git_binary,
            timeout_secs = options.command_timeout_secs,
            concurrency = options.enrich_concurrency,
            "Initialized volume manager"
        );

        Ok(Self::new(ctx).with_enrich_concurrency(options.enrich_concurrency))
    }

    /// Enrich up to `n` volumes at once during refresh. `0` is treated as `1`.
    pub fn with_enrich_concurrency(mut self, n: usize) -> Self {
        self.enrich_concurrency = n.max(1);
        self
    }

    pub fn context(&self) -> &VolumeContext {
        &self.ctx
    }

    /// Re-list, sort, enrich, and replace the inventory.
    ///
    /// # Errors
    ///
    /// Returns the engine's error if listing fails; the previous inventory is
    /// kept as-is.
    pub async fn refresh(&self) -> VoltrackResult<()> {
        self.reload(true).await
    }

    /// Like [`refresh`](Self::refresh) but without branch lookup: no
    /// filesystem probe or git process runs, and every branch in the new
    /// snapshot is empty.
    ///
    /// Enough for callers that only need names, such as resolving a removal
    /// target.
    pub async fn refresh_listing(&self) -> VoltrackResult<()> {
        self.reload(false).await
    }

    async fn reload(&self, enrich: bool) -> VoltrackResult<()> {
        let mut records = self.ctx.engine().list_volumes().await.map_err(|e| {
            tracing::warn!(error = %e, "Volume listing failed, keeping previous inventory");
            e
        })?;

        // Stable, so duplicate names keep engine order across refreshes.
        records.sort_by(|a, b| a.name.cmp(&b.name));

        let pending: Vec<Volume> = records
            .into_iter()
            .map(|record| Volume::new(record, self.ctx.clone()))
            .collect();

        let volumes: Vec<Volume> = if !enrich {
            pending
        } else if self.enrich_concurrency == 1 {
            let mut out = Vec::with_capacity(pending.len());
            for volume in pending {
                out.push(volume.enrich().await);
            }
            out
        } else {
            // `buffered` yields in input order, not completion order.
            stream::iter(pending.into_iter().map(Volume::enrich))
                .buffered(self.enrich_concurrency)
                .collect()
                .await
        };

        tracing::debug!(
            count = volumes.len(),
            enriched = enrich,
            with_branch = volumes.iter().filter(|v| !v.branch().is_empty()).count(),
            "Refreshed volume inventory"
        );

        *self.volumes.write() = Arc::from(volumes);
        Ok(())
    }

    /// Ask the engine to remove unused volumes.
    ///
    /// The inventory is not touched; call [`refresh`](Self::refresh) to see
    /// pruned volumes disappear.
    pub async fn prune(&self) -> VoltrackResult<()> {
        tracing::debug!("Pruning volumes");
        self.ctx.engine().prune_volumes().await
    }

    /// Remove the volume called `name` from the engine.
    ///
    /// # Errors
    ///
    /// Returns [`VoltrackError::NotFound`] if `name` is not in the current
    /// inventory, otherwise whatever the engine reports.
    pub async fn remove(&self, name: &str, force: bool) -> VoltrackResult<()> {
        let volume = self.get(name).ok_or_else(|| {
            VoltrackError::NotFound(format!("volume '{}' is not in the inventory", name))
        })?;
        volume.remove(force).await
    }

    /// Current snapshot, ordered by name.
    pub fn volumes(&self) -> Arc<[Volume]> {
        self.volumes.read().clone()
    }

    /// Look up a volume in the current snapshot.
    pub fn get(&self, name: &str) -> Option<Volume> {
        self.volumes.read().iter().find(|v| v.name() == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.volumes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.read().is_empty()
    }
}
