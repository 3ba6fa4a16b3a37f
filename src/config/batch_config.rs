/// ==============================================================================================
/// ===================================== Batch Configuration ====================================
/// ==============================================================================================

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BatchError, Result};
use crate::process::CommandSpec;

/// Everything the driver needs, built once in `main` and passed down by reference.
///     Sections:
///         - `build`:      command producing the simulation executable
///         - `simulation`: worker command; the sweep flag is appended as its last argument
///         - `fanout`:     external fan-out utility and its concurrency bound
///         - `sweep`:      list files and result naming
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub build: CommandConfig,
    pub simulation: CommandConfig,
    pub fanout: FanOutConfig,
    pub sweep: SweepConfig,
}

/// A program plus its argument list. Never a shell string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanOutConfig {
    pub program: String,
    /// Upper bound on concurrently running workers.
    pub max_procs: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// One flag token per line; passed to each worker as its argument.
    pub flags_file: PathBuf,
    /// One number token per line; only used in the result file name.
    pub numbers_file: PathBuf,
    pub results_dir: PathBuf,
    /// Relative to `results_dir`. The last segment is a file-name prefix, not a directory.
    pub file_base: PathBuf,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            build: CommandConfig::new("buck", ["build", "proximitySimulationNoGUI"]),
            simulation: CommandConfig::new(
                "java",
                [
                    "-jar",
                    "-Xms4G",
                    "buck-out/gen/apps/simulation/proximitySimulationNoGUI.jar",
                ],
            ),
            fanout: FanOutConfig::default(),
            sweep: SweepConfig::default(),
        }
    }
}

impl Default for FanOutConfig {
    fn default() -> Self {
        Self {
            program: "parallel".to_string(),
            max_procs: 8,
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            flags_file: PathBuf::from("flags.txt"),
            numbers_file: PathBuf::from("numbers.txt"),
            results_dir: PathBuf::from("results"),
            file_base: PathBuf::from("400nodes/sybil"),
        }
    }
}

impl CommandConfig {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn to_spec(&self) -> CommandSpec {
        CommandSpec::new(&self.program).args(&self.args)
    }
}

impl BatchConfig {
    /// Load from a JSON file. Missing sections and fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| BatchError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| BatchError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject configs that could only fail once external processes are already running.
    pub fn validate(&self) -> Result<()> {
        if self.build.program.trim().is_empty() {
            return Err(BatchError::Config("build.program is empty".into()));
        }
        if self.simulation.program.trim().is_empty() {
            return Err(BatchError::Config("simulation.program is empty".into()));
        }
        if self.fanout.program.trim().is_empty() {
            return Err(BatchError::Config("fanout.program is empty".into()));
        }
        if self.fanout.max_procs == 0 {
            return Err(BatchError::Config("fanout.max_procs must be >= 1".into()));
        }
        if self.sweep.file_base.file_name().is_none() {
            return Err(BatchError::Config(format!(
                "sweep.file_base `{}` has no file-name prefix",
                self.sweep.file_base.display()
            )));
        }
        // Absolute or `..` segments would place results outside `results_dir`.
        let escapes = self
            .sweep
            .file_base
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(BatchError::Config(format!(
                "sweep.file_base `{}` must stay inside sweep.results_dir",
                self.sweep.file_base.display()
            )));
        }
        Ok(())
    }

    /// Pretty JSON of the effective config; `load` reads it back unchanged.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BatchError::Config(format!("serialize config: {e}")))
    }
}
