//! State domain - per-target monitor state and the run document

mod run_state;

pub use run_state::{MonitorState, PriceSample, RunState};
