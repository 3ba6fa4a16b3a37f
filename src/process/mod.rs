pub mod command;
pub mod fanout;
pub mod runner;

pub use command::{CommandSpec, RunStatus};
pub use fanout::{fanout_command, output_template, shell_output_template};
pub use runner::{ProcessRunner, SystemRunner};
