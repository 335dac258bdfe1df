//! Constants shared by the voltrack library and CLI.

/// Environment variable names.
pub mod envs {
    /// Path to a JSON config file.
    pub const VOLTRACK_CONFIG: &str = "VOLTRACK_CONFIG";
    /// Override for the docker binary.
    pub const VOLTRACK_DOCKER: &str = "VOLTRACK_DOCKER";
    /// Override for the git binary.
    pub const VOLTRACK_GIT: &str = "VOLTRACK_GIT";
    /// Engine endpoint, same meaning as for the docker CLI.
    pub const DOCKER_HOST: &str = "DOCKER_HOST";
}

/// Defaults applied when no config or override is given.
pub mod defaults {
    pub const DOCKER_BINARY: &str = "docker";
    pub const GIT_BINARY: &str = "git";
    /// Deadline for any single external process, in seconds.
    pub const COMMAND_TIMEOUT_SECS: u64 = 10;
    /// Number of volumes enriched at once. 1 means strictly sequential.
    pub const ENRICH_CONCURRENCY: usize = 1;
    pub const LOG_LEVEL: &str = "info";
}

/// Git layout and invocation details used for branch enrichment.
pub mod git {
    /// Directory marking a working tree root.
    pub const DIR_NAME: &str = ".git";
    /// Arguments following `--git-dir=...` that print the current branch.
    pub const BRANCH_ARGS: &[&str] = &["rev-parse", "--abbrev-ref", "HEAD"];
}
