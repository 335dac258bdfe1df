//! Git branch lookup for volumes whose mount point is a working tree root.
//!
//! Best-effort by contract: every failure path returns `None` and is only
//! visible in debug logs.

use std::path::{Path, PathBuf};

use voltrack_shared::constants::git;

use super::VolumeContext;
use crate::util::process::CommandLine;

/// `<mount_point>/.git`
pub(crate) fn git_dir(mount_point: &str) -> PathBuf {
    Path::new(mount_point).join(git::DIR_NAME)
}

/// `git --git-dir=<mount_point>/.git/ rev-parse --abbrev-ref HEAD`
pub(crate) fn branch_command(git_binary: &str, mount_point: &str) -> CommandLine {
    let root = mount_point.trim_end_matches('/');
    CommandLine::new(git_binary)
        .arg(format!("--git-dir={}/{}/", root, git::DIR_NAME))
        .args(git::BRANCH_ARGS.iter().copied())
}

/// Reduce `rev-parse` output to a branch name.
///
/// Surrounding whitespace (including the trailing newline) is stripped.
/// Empty or multi-line output is treated as malformed.
pub(crate) fn parse_branch(output: &str) -> Option<String> {
    let branch = output.trim();
    if branch.is_empty() || branch.contains(['\n', '\r']) {
        return None;
    }
    Some(branch.to_string())
}

pub(crate) async fn resolve_branch(
    ctx: &VolumeContext,
    volume: &str,
    mount_point: &str,
) -> Option<String> {
    if mount_point.is_empty() {
        tracing::trace!(volume = %volume, "No mount point, skipping branch lookup");
        return None;
    }

    let dir = git_dir(mount_point);
    if !ctx.fs().path_exists(&dir).await {
        tracing::trace!(volume = %volume, git_dir = %dir.display(), "Not a git working tree");
        return None;
    }

    let cmd = branch_command(ctx.git_binary(), mount_point);
    let output = match ctx.runner().run_capture(&cmd).await {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!(volume = %volume, error = %e, "Branch lookup failed");
            return None;
        }
    };

    let branch = parse_branch(&output);
    if branch.is_none() {
        tracing::debug!(volume = %volume, output = ?output, "Unexpected rev-parse output");
    }
    branch
}
