#![allow(dead_code)]

use assert_cmd::Command;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Stand-in for the docker CLI. State lives next to the script:
/// - `ls.out`: canned `volume ls --format` output, one JSON object per line
/// - `fail`: when present, every call fails like an unreachable daemon
/// - `rm_fail`: when present, `volume rm` fails
/// - `calls.log`: one line per invocation
const FAKE_DOCKER: &str = r#"#!/bin/sh
STATE="$(dirname "$0")"
echo "$*" >> "$STATE/calls.log"
if [ -f "$STATE/fail" ]; then
  echo "Cannot connect to the Docker daemon at unix:///var/run/docker.sock" >&2
  exit 1
fi
[ "$1" = "--host" ] && shift 2
case "$2" in
  ls) cat "$STATE/ls.out" 2>/dev/null || true ;;
  prune) echo "Total reclaimed space: 0B" ;;
  rm)
    if [ -f "$STATE/rm_fail" ]; then
      echo "Error response from daemon: remove $3: volume is in use" >&2
      exit 1
    fi
    ;;
  *) exit 2 ;;
esac
"#;

/// Stand-in for git: logs to `git_calls.log` and prints the contents of
/// `branch` next to the script.
const FAKE_GIT: &str = r#"#!/bin/sh
STATE="$(dirname "$0")"
echo "$*" >> "$STATE/git_calls.log"
cat "$STATE/branch"
"#;

pub struct TestContext {
    pub dir: TempDir,
}

impl TestContext {
    pub fn bin_dir(&self) -> &Path {
        self.dir.path()
    }

    /// A voltrack command wired to the fake docker and git.
    pub fn new_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_voltrack");
        let mut cmd = Command::new(bin_path);
        cmd.timeout(Duration::from_secs(30));
        for var in ["DOCKER_HOST", "VOLTRACK_CONFIG", "VOLTRACK_DOCKER", "VOLTRACK_GIT", "RUST_LOG"] {
            cmd.env_remove(var);
        }
        cmd.arg("--docker")
            .arg(self.bin_dir().join("docker"))
            .arg("--git")
            .arg(self.bin_dir().join("git"));
        cmd
    }

    /// Register volumes in listing order. `true` marks a git working tree.
    pub fn with_volumes(&self, volumes: &[(&str, bool)]) {
        let mut lines = String::new();

        for (name, is_repo) in volumes {
            let mount = self.dir.path().join("volumes").join(name).join("_data");
            std::fs::create_dir_all(&mount).unwrap();
            if *is_repo {
                std::fs::create_dir_all(mount.join(".git")).unwrap();
            }
            let row = serde_json::json!({
                "Availability": "N/A",
                "Driver": "local",
                "Group": "N/A",
                "Labels": "",
                "Links": "N/A",
                "Mountpoint": mount.to_string_lossy(),
                "Name": name,
                "Scope": "local",
                "Size": "N/A",
                "Status": "N/A",
            });
            lines.push_str(&row.to_string());
            lines.push('\n');
        }

        std::fs::write(self.state("ls.out"), lines).unwrap();
    }

    pub fn set_branch(&self, branch: &str) {
        std::fs::write(self.state("branch"), format!("{}\n", branch)).unwrap();
    }

    pub fn fail_engine(&self) {
        std::fs::write(self.state("fail"), "").unwrap();
    }

    pub fn fail_rm(&self) {
        std::fs::write(self.state("rm_fail"), "").unwrap();
    }

    /// Every docker invocation so far, one per line.
    pub fn docker_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.state("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Every git invocation so far, one per line.
    pub fn git_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.state("git_calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn state(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn install(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

pub fn voltrack() -> TestContext {
    let dir = TempDir::new().expect("Failed to create temp dir");
    install(dir.path(), "docker", FAKE_DOCKER);
    install(dir.path(), "git", FAKE_GIT);

    let ctx = TestContext { dir };
    ctx.set_branch("main");
    ctx
}
