use std::io::Result;

use tracing::debug;

use super::{CommandSpec, RunStatus};

/// Seam between the driver and the OS: run one command to completion.
pub trait ProcessRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<RunStatus>;
}

/// Spawns the real process with inherited stdio and blocks until it exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<RunStatus> {
        debug!(command = %spec, "spawning");
        let status = spec.to_command().status()?;
        Ok(status.into())
    }
}
