pub mod process;

use std::io::IsTerminal;

use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub use process::{CommandLine, HostProcessRunner, ProcessRunner};

/// Install a global fmt subscriber writing through `non_blocking`.
///
/// Uses `try_init`, so a second call (or a subscriber installed by the host
/// application) is silently kept.
pub fn register_to_tracing(non_blocking: NonBlocking, env_filter: EnvFilter) {
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .try_init();
}
