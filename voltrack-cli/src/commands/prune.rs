use std::io::{BufRead, Write};

use clap::Args;
use voltrack::VoltrackOptions;

use crate::cli::GlobalFlags;

#[derive(Args, Debug)]
pub struct PruneArgs {
    /// Do not prompt for confirmation
    #[arg(short, long)]
    pub force: bool,
}

pub async fn execute(
    args: PruneArgs,
    global: &GlobalFlags,
    options: &VoltrackOptions,
) -> anyhow::Result<()> {
    if !args.force && !confirm()? {
        eprintln!("Aborted");
        return Ok(());
    }

    let manager = global.create_manager(options)?;
    manager.prune().await?;
    println!("Unused volumes pruned");
    Ok(())
}

fn confirm() -> anyhow::Result<bool> {
    let mut stderr = std::io::stderr();
    write!(
        stderr,
        "WARNING! This will remove all unused volumes.\nAre you sure you want to continue? [y/N] "
    )?;
    stderr.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
