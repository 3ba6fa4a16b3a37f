use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::BatchConfig;
use crate::error::{BatchError, Result};
use crate::process::{CommandSpec, ProcessRunner, RunStatus, fanout_command};
use crate::sweep::{SweepPlan, WorkerInvocation};

/// ==============================================================================================
/// ======================================= Batch Driver =========================================
/// ==============================================================================================

/// What the driver observed. Worker-level results stay with the fan-out utility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub sweep_command: CommandSpec,
    pub sweep_status: RunStatus,
}

/// Build once, then launch the sweep once.
///     Inputs:
///         - `config`: validated batch configuration
///         - `runner`: executes external commands (real OS processes, or a fake in tests)
///         - `progress`: optional spinner updated between the two steps
///     Errors:
///         - `BuildFailed` when the build exits non-zero; the sweep is never launched
///         - `Spawn` when either external tool cannot be started
///     A non-zero sweep status is logged and returned, not raised.
pub fn run<R>(
    config: &BatchConfig,            // batch config
    runner: &mut R,                  // process executor
    progress: Option<&ProgressBar>,  // optional spinner
) -> Result<BatchOutcome>
where
    R: ProcessRunner + ?Sized,
{
    config.validate()?;

    // (1) Build.
    let build = config.build.to_spec();
    if let Some(pb) = progress {
        pb.set_message(format!("building: {build}"));
    }
    info!(command = %build, "build");

    let status = launch(runner, &build, progress)?;
    if !status.success() {
        return Err(BatchError::BuildFailed {
            command: build.to_string(),
            code: status.code,
        });
    }

    // (2) Sweep: one fan-out invocation owns every worker.
    let sweep = fanout_command(config)?;
    if let Some(pb) = progress {
        pb.set_message(format!(
            "sweeping with up to {} workers",
            config.fanout.max_procs
        ));
    }
    info!(command = %sweep, max_procs = config.fanout.max_procs, "sweep");

    let sweep_status = launch(runner, &sweep, progress)?;
    match sweep_status.code {
        Some(0) => info!("sweep finished"),
        Some(code) => warn!(code, "fan-out utility reported failures"),
        None => warn!("fan-out utility terminated by signal"),
    }

    Ok(BatchOutcome {
        sweep_command: sweep,
        sweep_status,
    })
}

/// Expand the sweep without running anything: one entry per worker the fan-out utility would start.
pub fn plan(config: &BatchConfig) -> Result<Vec<WorkerInvocation>> {
    config.validate()?;

    let sweep = SweepPlan::load(&config.sweep)?;
    if sweep.is_empty() {
        warn!(
            flags = %config.sweep.flags_file.display(),
            numbers = %config.sweep.numbers_file.display(),
            "sweep is empty"
        );
    }

    Ok(sweep.workers(config))
}

/// Spinner used by the binary while external commands run.
pub fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

// The child inherits stderr, so the spinner stays off the terminal until it exits.
fn launch<R>(
    runner: &mut R,
    spec: &CommandSpec,
    progress: Option<&ProgressBar>,
) -> Result<RunStatus>
where
    R: ProcessRunner + ?Sized,
{
    let result = match progress {
        Some(pb) => pb.suspend(|| runner.run(spec)),
        None => runner.run(spec),
    };

    result.map_err(|source| BatchError::Spawn {
        command: spec.to_string(),
        source,
    })
}
