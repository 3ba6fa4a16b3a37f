/// ==============================================================================================
/// ================================== Fan-Out Command Builder ===================================
/// ==============================================================================================

use std::path::{Path, PathBuf};

use crate::config::{BatchConfig, SweepConfig};
use crate::error::{BatchError, Result};
use crate::sweep::{result_path, result_prefix};

use super::CommandSpec;

/// Substitution slots understood by the fan-out utility: `{1}` from the first list, `{2}` from the second.
pub const FLAG_SLOT: &str = "{1}";
pub const NUMBER_SLOT: &str = "{2}";

/// Separator telling the fan-out utility that the next argument is an input-list file.
const LIST_FILE_MARKER: &str = "::::";

/// Result path with both substitution slots left in: `<results>/<dir>/<prefix>{1}{2}.json`.
pub fn output_template(sweep: &SweepConfig) -> PathBuf {
    result_path(sweep, FLAG_SLOT, NUMBER_SLOT)
}

/// `output_template` as one shell word: prefix and suffix quoted, slots left bare.
///     The fan-out utility quotes whatever it substitutes into the slots itself.
pub fn shell_output_template(sweep: &SweepConfig) -> Result<String> {
    let prefix = shell_path(&result_prefix(sweep))?;
    Ok(format!("{prefix}{FLAG_SLOT}{NUMBER_SLOT}.json"))
}

/// The single fan-out invocation:
///     parallel --max-procs N <sim> <sim args..> {1} > <template> :::: <flags> :::: <numbers>
/// Notes:
///     - Every piece is its own argument; the driver never goes through a shell.
///     - The fan-out utility joins the worker words with spaces and runs the line in its own
///       shell, which is where the per-worker `>` redirect happens. So every config-supplied
///       word of that line is shell-quoted; only `>` and the slots stay bare.
///     - List files are read by the fan-out utility directly and are passed unquoted.
pub fn fanout_command(config: &BatchConfig) -> Result<CommandSpec> {
    let sim = &config.simulation;
    let sweep = &config.sweep;

    let program = shell_word(&sim.program)?;
    let args = sim
        .args
        .iter()
        .map(|a| shell_word(a))
        .collect::<Result<Vec<_>>>()?;

    Ok(CommandSpec::new(&config.fanout.program)
        .arg("--max-procs")
        .arg(config.fanout.max_procs.to_string())
        .arg(program)
        .args(args)
        .arg(FLAG_SLOT)
        .arg(">")
        .arg(shell_output_template(sweep)?)
        .arg(LIST_FILE_MARKER)
        .arg(&sweep.flags_file)
        .arg(LIST_FILE_MARKER)
        .arg(&sweep.numbers_file))
}

fn shell_word(word: &str) -> Result<String> {
    shlex::try_quote(word)
        .map(|q| q.into_owned())
        .map_err(|e| {
            BatchError::Config(format!("`{word}` cannot be passed to the worker shell: {e}"))
        })
}

fn shell_path(path: &Path) -> Result<String> {
    let text = path.to_str().ok_or_else(|| {
        BatchError::Config(format!(
            "result path `{}` is not valid UTF-8",
            path.display()
        ))
    })?;
    shell_word(text)
}
