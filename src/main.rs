use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use proximity_batch::tasks::run_batch::{self, plan, spinner};
use proximity_batch::{BatchConfig, SystemRunner};

/// Build the proximity simulation, then sweep it over flags.txt x numbers.txt.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON config file; built-in defaults are used when omitted
    config: Option<PathBuf>,

    /// Print the worker invocations and result paths, run nothing
    #[arg(long)]
    dry_run: bool,

    /// Print the effective config as JSON (loadable as CONFIG), run nothing
    #[arg(long)]
    show_config: bool,

    /// Override the fan-out concurrency bound
    #[arg(long)]
    max_procs: Option<usize>,

    /// Override the flags list file
    #[arg(long)]
    flags: Option<PathBuf>,

    /// Override the numbers list file
    #[arg(long)]
    numbers: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match try_main(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => BatchConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BatchConfig::default(),
    };

    if let Some(n) = cli.max_procs {
        config.fanout.max_procs = n;
    }
    if let Some(path) = cli.flags {
        config.sweep.flags_file = path;
    }
    if let Some(path) = cli.numbers {
        config.sweep.numbers_file = path;
    }
    config.validate().context("checking config")?;

    if cli.show_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    if cli.dry_run {
        let workers = plan(&config).context("planning sweep")?;
        for w in &workers {
            println!("{} > {}", w.command, w.output.display());
        }
        info!(workers = workers.len(), "dry run");
        return Ok(());
    }

    let pb = spinner();
    let outcome = run_batch::run(&config, &mut SystemRunner, Some(&pb));
    pb.finish_and_clear();

    let outcome = outcome.context("batch run")?;
    info!(
        status = ?outcome.sweep_status.code,
        "sweep launched: {}", outcome.sweep_command
    );
    Ok(())
}
