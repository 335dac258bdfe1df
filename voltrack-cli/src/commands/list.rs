use std::io::Write;

use clap::Args;
use voltrack::{Volume, VolumeInfo, VoltrackOptions};

use crate::cli::GlobalFlags;
use crate::formatter::{self, OutputFormat};

/// List volumes
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show volume names
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format (table, json, yaml)
    #[arg(long, default_value = "table")]
    pub format: String,
}

pub async fn execute(
    args: ListArgs,
    global: &GlobalFlags,
    options: &VoltrackOptions,
) -> anyhow::Result<()> {
    let format: OutputFormat = args.format.parse()?;
    let manager = global.create_manager(options)?;
    manager.refresh().await?;
    let volumes = manager.volumes();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.quiet {
        for volume in volumes.iter() {
            writeln!(out, "{}", volume.name())?;
        }
        return Ok(());
    }

    let infos: Vec<VolumeInfo> = volumes.iter().map(Volume::info).collect();
    formatter::print_output(&mut out, &infos, format, |w, _| {
        print_table(w, &volumes)
    })
}

fn print_table<W: Write>(writer: &mut W, volumes: &[Volume]) -> anyhow::Result<()> {
    let mut table = formatter::create_table(&["DRIVER", "NAME", "BRANCH"]);
    for volume in volumes {
        table.add_row(volume.display_fields(false));
    }
    writeln!(writer, "{table}")?;
    Ok(())
}
