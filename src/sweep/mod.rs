pub mod list_file;
pub mod plan;

pub use list_file::read_tokens;
pub use plan::{SweepPlan, WorkerInvocation, result_path, result_prefix};
