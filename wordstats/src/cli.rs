use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use wordstats_core::conf::{WordstatsConfig, load_config};
use wordstats_core::runtime::build_engine_from_log;
use wordstats_core::server::{run_ingest, run_stats, shutdown_on_ctrl_c};
use wordstats_core::word_log::WordLog;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Accept text over HTTP and append it to the word log
    Ingest {
        #[command(flatten)]
        source: Source,

        /// Port for the ingest listener
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Serve statistics computed from the word log
    Serve {
        #[command(flatten)]
        source: Source,

        /// Port for the stats listener
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print statistics for the word log once and exit
    Snapshot {
        #[command(flatten)]
        source: Source,
    },
}

#[derive(Args, Debug)]
pub struct Source {
    /// Path to a wordstats config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Word log to use instead of the configured one
    #[arg(short, long)]
    file: Option<PathBuf>,
}

impl Source {
    fn resolve(self) -> Result<WordstatsConfig> {
        let cfg = match &self.config {
            Some(path) => load_config(path)?,
            None => WordstatsConfig::default(),
        };

        Ok(match self.file {
            Some(file) => cfg.with_log_path(file),
            None => cfg,
        })
    }
}

pub async fn run(command: Command) -> Result<()> {
    let shutdown = CancellationToken::new();

    match command {
        Command::Ingest { source, port } => {
            let mut cfg = source.resolve()?;
            if let Some(port) = port {
                cfg = cfg.with_ingest_port(port)?;
            }

            shutdown_on_ctrl_c(shutdown.clone());
            run_ingest(&cfg, shutdown).await
        }

        Command::Serve { source, port } => {
            let mut cfg = source.resolve()?;
            if let Some(port) = port {
                cfg = cfg.with_stats_port(port)?;
            }

            shutdown_on_ctrl_c(shutdown.clone());
            run_stats(&cfg, shutdown).await
        }

        Command::Snapshot { source } => {
            let cfg = source.resolve()?;
            let log = WordLog::new(&cfg.log.path);
            let engine = build_engine_from_log(&shutdown, &cfg.engine, &log).await?;

            let mut stdout = std::io::stdout().lock();
            engine.write(&mut stdout).context("failed to print statistics")?;
            stdout.flush()?;
            Ok(())
        }
    }
}
