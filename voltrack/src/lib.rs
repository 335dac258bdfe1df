//! voltrack - container volume inventory with git branch enrichment.
//!
//! The [`VolumeManager`] lists volumes from a container engine, orders them by
//! name, and annotates each one whose mount point is a git working tree with
//! its current branch. Engine access, process spawning, and filesystem probing
//! are traits ([`EngineClient`], [`ProcessRunner`], [`FsProbe`]) so the
//! inventory logic runs against fakes in tests.

pub mod engine;
pub mod fs;
pub mod management;
pub mod runtime;
pub mod util;
pub mod volumes;

pub use engine::{DockerCli, EngineClient, VolumeRecord};
pub use fs::{FsProbe, HostFs};
pub use management::VolumeManager;
pub use runtime::options::VoltrackOptions;
pub use util::process::{CommandLine, HostProcessRunner, ProcessRunner};
pub use volumes::{Volume, VolumeContext, VolumeInfo};
pub use voltrack_shared::constants;
pub use voltrack_shared::errors::{VoltrackError, VoltrackResult};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Route tracing output to stderr.
///
/// `RUST_LOG` wins over `default_level`. Keep the returned guard alive for the
/// life of the program, dropping it flushes and stops the writer thread.
pub fn init_logging(default_level: &str) -> VoltrackResult<WorkerGuard> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level).map_err(|e| {
            VoltrackError::Config(format!("Invalid log level '{}': {}", default_level, e))
        })?,
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
    util::register_to_tracing(non_blocking, env_filter);
    Ok(guard)
}
