use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod core;
mod matching;
mod utils;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("song_resolver=debug,info")
    } else {
        EnvFilter::new("song_resolver=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Search(args) => {
            cli::search::run(args, &cli.source, cli.format, cli.verbose)?;
        }
        cli::Commands::Debug(args) => {
            cli::search::run_debug(args, &cli.source, cli.format, cli.verbose)?;
        }
        cli::Commands::Refresh => {
            cli::catalog::run_refresh(&cli.source, cli.format)?;
        }
        cli::Commands::Versions(args) => {
            cli::catalog::run_versions(args, &cli.source, cli.format, cli.verbose)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args, &cli.source)?;
        }
    }

    Ok(())
}
