mod driver;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::process::{CommandSpec, ProcessRunner, RunStatus};

/// Records every command and answers with scripted statuses (success once the script runs out).
#[derive(Default)]
pub(crate) struct FakeRunner {
    pub calls: Vec<CommandSpec>,
    pub statuses: Vec<io::Result<RunStatus>>,
}

impl FakeRunner {
    pub fn with_statuses(statuses: Vec<io::Result<RunStatus>>) -> Self {
        Self {
            calls: Vec::new(),
            statuses,
        }
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&mut self, spec: &CommandSpec) -> io::Result<RunStatus> {
        self.calls.push(spec.clone());
        if self.statuses.is_empty() {
            Ok(RunStatus::SUCCESS)
        } else {
            self.statuses.remove(0)
        }
    }
}

pub(crate) fn write_list(dir: &Path, name: &str, tokens: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut text = tokens.join("\n");
    text.push('\n');
    fs::write(&path, text).expect("write list file");
    path
}

pub(crate) fn args_of(spec: &CommandSpec) -> Vec<String> {
    spec.args
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}
