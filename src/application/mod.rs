//! Application layer - the monitoring pass

pub mod run_loop;

pub use run_loop::{RunLoop, RunLoopConfig, RunSummary};
