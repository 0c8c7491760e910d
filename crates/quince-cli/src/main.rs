use std::sync::Arc;

use clap::Parser;
use error::CliResult;
use logging::setup_logging;
use quince_config::Config;
use quince_core::PackageStore;
use quince_package::StandardPackageParser;

mod cli;
mod error;
mod fetch;
mod list;
mod logging;
mod response;
mod upload;

async fn handle_cli() -> CliResult<()> {
    let args = cli::Args::parse();
    setup_logging(&args);

    let config = Config::load(args.config.as_deref())?;
    let store = PackageStore::open(config.store_path(), Arc::new(StandardPackageParser))?
        .with_parallel_reads(config.parallel_reads());

    match args.command {
        cli::Commands::Upload {
            file,
            kind,
            relocate,
        } => upload::upload_package(&store, &file, kind, relocate).await,
        cli::Commands::Fetch {
            name,
            version,
            kind,
            output,
        } => fetch::fetch_package(&store, &name, &version, kind.into(), output.as_deref()).await,
        cli::Commands::Show {
            name,
            version,
            kind,
        } => list::show_package(&store, &name, &version, kind.into()).await,
        cli::Commands::List => list::list_packages(&store).await,
    }
}

#[tokio::main]
async fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli().await {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
