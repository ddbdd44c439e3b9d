mod cli;

use clap::Parser;
use wordstats_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "wordstats",
    version,
    about = "wordstats: running word and letter statistics"
)]
struct Cli {
    #[command(subcommand)]
    command: cli::Command,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = cli::run(cli.command).await {
        tracing::error!(error = %format!("{e:#}"), "wordstats failed");
        eprintln!("wordstats error: {e:#}");
        std::process::exit(1);
    }
}
