/// ==============================================================================================
/// ======================================== Sweep Plan ==========================================
/// ==============================================================================================

use std::path::PathBuf;

use crate::config::{BatchConfig, SweepConfig};
use crate::error::Result;
use crate::process::CommandSpec;

use super::read_tokens;

/// The (flag, number) combinations the fan-out utility will expand, in its order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepPlan {
    pub flags: Vec<String>,
    pub numbers: Vec<String>,
}

/// One worker as the fan-out utility will launch it.
///     - `command`: simulation command with the flag appended
///     - `output`:  file receiving the worker's stdout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerInvocation {
    pub flag: String,
    pub number: String,
    pub command: CommandSpec,
    pub output: PathBuf,
}

impl SweepPlan {
    #[inline]
    pub fn new(flags: Vec<String>, numbers: Vec<String>) -> Self {
        Self { flags, numbers }
    }

    /// Read both list files named in `sweep`.
    pub fn load(sweep: &SweepConfig) -> Result<Self> {
        let flags = read_tokens(&sweep.flags_file)?;
        let numbers = read_tokens(&sweep.numbers_file)?;
        Ok(Self::new(flags, numbers))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len() * self.numbers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cartesian product, flag-major: the number varies fastest.
    pub fn combinations(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.flags.iter().flat_map(move |flag| {
            self.numbers
                .iter()
                .map(move |number| (flag.as_str(), number.as_str()))
        })
    }

    /// Expand into concrete worker invocations.
    pub fn workers(&self, config: &BatchConfig) -> Vec<WorkerInvocation> {
        let base = config.simulation.to_spec();

        self.combinations()
            .map(|(flag, number)| WorkerInvocation {
                flag: flag.to_owned(),
                number: number.to_owned(),
                command: base.clone().arg(flag),
                output: result_path(&config.sweep, flag, number),
            })
            .collect()
    }
}

/// `<results_dir>/<file_base dir>/<file_base prefix><flag><number>.json`
///     e.g. flag `-p`, number `3` with the defaults -> `results/400nodes/sybil-p3.json`.
/// No collision check: distinct combinations that concatenate to the same name share a file.
/// The fan-out output template is this path with the slot markers in place of flag and number.
pub fn result_path(sweep: &SweepConfig, flag: &str, number: &str) -> PathBuf {
    let mut name = result_prefix(sweep).into_os_string();
    name.push(flag);
    name.push(number);
    name.push(".json");
    PathBuf::from(name)
}

/// Everything in a result path before the flag: `<results_dir>/<file_base>`.
pub fn result_prefix(sweep: &SweepConfig) -> PathBuf {
    let mut path = sweep.results_dir.clone();
    if let Some(dir) = sweep.file_base.parent()
        && !dir.as_os_str().is_empty()
    {
        path.push(dir);
    }
    if let Some(prefix) = sweep.file_base.file_name() {
        path.push(prefix);
    }
    path
}
