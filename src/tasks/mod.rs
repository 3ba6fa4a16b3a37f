pub mod run_batch;
