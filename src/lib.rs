pub mod config;
pub mod error;
pub mod process;
pub mod sweep;
pub mod tasks;

#[cfg(test)]
mod tests;

pub use config::BatchConfig;
pub use error::{BatchError, Result};
pub use process::{CommandSpec, ProcessRunner, RunStatus, SystemRunner};
pub use sweep::{SweepPlan, WorkerInvocation};
pub use tasks::run_batch::{BatchOutcome, run};
