//! CLI definition and argument parsing for voltrack-cli.
//! This module contains the main CLI structure, subcommands, and global flags.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Command, Parser, Subcommand, ValueEnum};
use clap_complete::shells::{Bash, Fish, Zsh};
use voltrack::constants::envs;
use voltrack::{VoltrackOptions, VolumeManager};

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "voltrack", author, version, about = "Container volume inventory with git branches")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
#[non_exhaustive]
pub enum Commands {
    /// List volumes, with the git branch of volumes that are working trees
    #[command(visible_alias = "ls")]
    List(crate::commands::list::ListArgs),

    /// Remove one or more volumes
    Rm(crate::commands::rm::RmArgs),

    /// Remove all unused volumes
    Prune(crate::commands::prune::PruneArgs),

    /// Generate shell completion script (hidden from help)
    #[command(hide = true)]
    Completion(CompletionArgs),
}

/// Shell for which to generate completion script.
#[derive(ValueEnum, Clone, Debug)]
#[value(rename_all = "lower")]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

/// Arguments for the completion subcommand.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Shell to generate completion for (bash, zsh, fish).
    pub shell: Shell,
}

/// Writes a completion script for the given shell to `out`.
pub fn generate_completion(shell: &Shell, cmd: &mut Command, name: &str, out: &mut dyn Write) {
    match shell {
        Shell::Bash => clap_complete::generate(Bash, cmd, name, out),
        Shell::Zsh => clap_complete::generate(Zsh, cmd, name, out),
        Shell::Fish => clap_complete::generate(Fish, cmd, name, out),
    }
}

// ============================================================================
// GLOBAL FLAGS
// ============================================================================

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalFlags {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file path (JSON)
    ///
    /// Keys: docker_binary, docker_host, git_binary, command_timeout_secs,
    /// enrich_concurrency, log_level. Missing keys use defaults.
    #[arg(long, global = true, env = envs::VOLTRACK_CONFIG)]
    pub config: Option<PathBuf>,

    /// docker client binary
    #[arg(long, global = true, value_name = "PATH")]
    pub docker: Option<String>,

    /// Docker daemon to connect to (overrides DOCKER_HOST)
    #[arg(short = 'H', long, global = true)]
    pub host: Option<String>,

    /// git binary used for branch lookup
    #[arg(long, global = true, value_name = "PATH")]
    pub git: Option<String>,

    /// Timeout for each docker/git invocation, in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Number of volumes to inspect for git branches at once
    #[arg(long, global = true, value_name = "N")]
    pub concurrency: Option<usize>,
}

impl GlobalFlags {
    /// Resolve options: defaults, then config file, then environment, then flags.
    pub fn resolve_options(&self) -> anyhow::Result<VoltrackOptions> {
        let mut options = match &self.config {
            Some(path) => VoltrackOptions::load(path)?,
            None => VoltrackOptions::default(),
        };
        options.apply_env();
        self.apply_to(&mut options);
        options.validate()?;
        Ok(options)
    }

    /// Apply explicitly passed flags on top of `options`.
    pub fn apply_to(&self, options: &mut VoltrackOptions) {
        if let Some(docker) = &self.docker {
            options.docker_binary = docker.clone();
        }
        if let Some(host) = &self.host {
            options.docker_host = Some(host.clone());
        }
        if let Some(git) = &self.git {
            options.git_binary = git.clone();
        }
        if let Some(timeout) = self.timeout {
            options.command_timeout_secs = timeout;
        }
        if let Some(concurrency) = self.concurrency {
            options.enrich_concurrency = concurrency;
        }
        if self.debug {
            options.log_level = "debug".to_string();
        }
    }

    pub fn create_manager(&self, options: &VoltrackOptions) -> anyhow::Result<VolumeManager> {
        VolumeManager::from_options(options).map_err(Into::into)
    }
}
