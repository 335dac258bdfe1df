use clap::Args;
use voltrack::VoltrackOptions;

use crate::cli::GlobalFlags;

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Force the removal of volumes that are in use
    #[arg(short, long)]
    pub force: bool,

    /// Name of the volume(s) to remove
    #[arg(required = true, num_args = 1..)]
    pub targets: Vec<String>,
}

pub async fn execute(
    args: RmArgs,
    global: &GlobalFlags,
    options: &VoltrackOptions,
) -> anyhow::Result<()> {
    let manager = global.create_manager(options)?;
    // Names are all that is needed to resolve targets.
    manager.refresh_listing().await?;

    let mut active_error = false;
    for target in args.targets {
        if let Err(e) = manager.remove(&target, args.force).await {
            eprintln!("Error removing volume '{}': {}", target, e);
            active_error = true;
        } else {
            println!("{}", target);
        }
    }

    if active_error {
        anyhow::bail!("Some volumes could not be removed");
    }
    Ok(())
}
