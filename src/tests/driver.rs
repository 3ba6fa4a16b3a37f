use std::fs;
use std::io;

use tempfile::tempdir;

use super::{FakeRunner, args_of, write_list};
use crate::config::BatchConfig;
use crate::error::BatchError;
use crate::process::RunStatus;
use crate::tasks::run_batch::{plan, run};

#[test]
fn failed_build_never_launches_sweep() {
    let config = BatchConfig::default();
    let mut runner = FakeRunner::with_statuses(vec![Ok(RunStatus::exited(1))]);

    let err = run(&config, &mut runner, None).expect_err("build failure must abort");

    assert!(matches!(
        err,
        BatchError::BuildFailed { code: Some(1), .. }
    ));
    assert_eq!(runner.calls.len(), 1);
    assert_eq!(runner.calls[0], config.build.to_spec());
}

#[test]
fn build_killed_by_signal_aborts() {
    let config = BatchConfig::default();
    let mut runner = FakeRunner::with_statuses(vec![Ok(RunStatus { code: None })]);

    let err = run(&config, &mut runner, None).expect_err("signal must abort");

    assert!(matches!(err, BatchError::BuildFailed { code: None, .. }));
    assert_eq!(runner.calls.len(), 1);
}

#[test]
fn missing_build_tool_is_a_spawn_error() {
    let config = BatchConfig::default();
    let mut runner = FakeRunner::with_statuses(vec![Err(io::Error::new(
        io::ErrorKind::NotFound,
        "no such file",
    ))]);

    let err = run(&config, &mut runner, None).expect_err("spawn failure");

    match err {
        BatchError::Spawn { command, .. } => {
            assert_eq!(command, "buck build proximitySimulationNoGUI")
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(runner.calls.len(), 1);
}

#[test]
fn successful_build_launches_sweep_once_with_bound_8() {
    let config = BatchConfig::default();
    let mut runner = FakeRunner::default();

    let outcome = run(&config, &mut runner, None).expect("run");

    assert_eq!(runner.calls.len(), 2);
    let sweep = &runner.calls[1];
    assert_eq!(sweep.program, "parallel");

    let args = args_of(sweep);
    assert_eq!(&args[..2], ["--max-procs", "8"]);
    assert_eq!(outcome.sweep_command, *sweep);
    assert!(outcome.sweep_status.success());
}

#[test]
fn sweep_failures_are_reported_not_raised() {
    let config = BatchConfig::default();
    let mut runner =
        FakeRunner::with_statuses(vec![Ok(RunStatus::SUCCESS), Ok(RunStatus::exited(3))]);

    let outcome = run(&config, &mut runner, None).expect("worker failures are not driver errors");

    assert_eq!(outcome.sweep_status, RunStatus::exited(3));
    assert_eq!(runner.calls.len(), 2);
}

#[test]
fn run_with_progress_bar_launches_both_steps() {
    use indicatif::ProgressBar;

    let config = BatchConfig::default();
    let mut runner = FakeRunner::default();
    let pb = ProgressBar::hidden();

    run(&config, &mut runner, Some(&pb)).expect("run");

    assert_eq!(runner.calls.len(), 2);
    assert_eq!(pb.message(), "sweeping with up to 8 workers");
}

#[test]
fn absolute_file_base_runs_nothing() {
    let mut config = BatchConfig::default();
    config.sweep.file_base = std::path::PathBuf::from("/var/tmp/sybil");
    let mut runner = FakeRunner::default();

    let err = run(&config, &mut runner, None).expect_err("absolute file_base");

    assert!(matches!(err, BatchError::Config(_)));
    assert!(runner.calls.is_empty());
}

#[test]
fn invalid_config_runs_nothing() {
    let mut config = BatchConfig::default();
    config.fanout.max_procs = 0;
    let mut runner = FakeRunner::default();

    let err = run(&config, &mut runner, None).expect_err("invalid config");

    assert!(matches!(err, BatchError::Config(_)));
    assert!(runner.calls.is_empty());
}

#[test]
fn driver_writes_nothing_itself() {
    let dir = tempdir().expect("tempdir");
    let mut config = BatchConfig::default();
    config.sweep.flags_file = write_list(dir.path(), "flags.txt", &["-p", "-r"]);
    config.sweep.numbers_file = write_list(dir.path(), "numbers.txt", &["0", "1"]);
    config.sweep.results_dir = dir.path().join("results");

    let before: Vec<_> = fs::read_dir(dir.path()).expect("read_dir").collect();
    run(&config, &mut FakeRunner::default(), None).expect("run");
    plan(&config).expect("plan");
    let after: Vec<_> = fs::read_dir(dir.path()).expect("read_dir").collect();

    assert_eq!(before.len(), after.len());
    assert!(!config.sweep.results_dir.exists());
}

#[test]
fn plan_lists_every_worker_in_fanout_order() {
    let dir = tempdir().expect("tempdir");
    let mut config = BatchConfig::default();
    config.sweep.flags_file = write_list(dir.path(), "flags.txt", &["-p", "-r"]);
    config.sweep.numbers_file = write_list(dir.path(), "numbers.txt", &["0", "1"]);

    let workers = plan(&config).expect("plan");

    let pairs: Vec<_> = workers
        .iter()
        .map(|w| (w.flag.as_str(), w.number.as_str()))
        .collect();
    assert_eq!(pairs, [("-p", "0"), ("-p", "1"), ("-r", "0"), ("-r", "1")]);

    let last = args_of(&workers[3].command);
    assert_eq!(last.last().map(String::as_str), Some("-r"));
    assert_eq!(workers[3].command.program, "java");
}

#[test]
fn plan_with_missing_list_file_fails() {
    let dir = tempdir().expect("tempdir");
    let mut config = BatchConfig::default();
    config.sweep.flags_file = dir.path().join("absent.txt");

    let err = plan(&config).expect_err("missing list");

    assert!(matches!(err, BatchError::ListFile { .. }));
}

#[cfg(unix)]
#[test]
fn system_runner_reports_exit_codes() {
    use crate::process::{CommandSpec, ProcessRunner, SystemRunner};

    let mut runner = SystemRunner;
    assert!(runner.run(&CommandSpec::new("true")).expect("true").success());

    let status = runner.run(&CommandSpec::new("false")).expect("false");
    assert_eq!(status, RunStatus::exited(1));

    let missing = runner.run(&CommandSpec::new("definitely-not-a-real-program-xyz"));
    assert!(missing.is_err());
}

#[cfg(unix)]
#[test]
fn real_failing_build_stops_before_sweep() {
    use crate::process::SystemRunner;

    let mut config = BatchConfig::default();
    config.build = crate::config::CommandConfig::new("false", Vec::<String>::new());
    // Would fail loudly if it were ever reached.
    config.fanout.program = "definitely-not-a-real-program-xyz".to_string();

    let err = run(&config, &mut SystemRunner, None).expect_err("build fails");

    assert!(matches!(err, BatchError::BuildFailed { code: Some(1), .. }));
}
