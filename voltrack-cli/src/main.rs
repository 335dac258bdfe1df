mod cli;
mod commands;
mod formatter;

use clap::{CommandFactory, Parser};
use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let cli::Commands::Completion(args) = &cli.command {
        let mut cmd = Cli::command();
        cli::generate_completion(&args.shell, &mut cmd, "voltrack", &mut std::io::stdout());
        return Ok(());
    }

    let options = cli.global.resolve_options()?;
    let _log_guard = voltrack::init_logging(&options.log_level)?;
    tracing::debug!(?options, "Resolved options");

    match cli.command {
        cli::Commands::List(args) => commands::list::execute(args, &cli.global, &options).await?,
        cli::Commands::Rm(args) => commands::rm::execute(args, &cli.global, &options).await?,
        cli::Commands::Prune(args) => commands::prune::execute(args, &cli.global, &options).await?,
        cli::Commands::Completion(_) => {}
    }

    Ok(())
}
