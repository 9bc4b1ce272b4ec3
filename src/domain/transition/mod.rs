//! Transition domain - stock state machine and notification decision

mod transition_engine;

pub use transition_engine::{StockStatus, Transition, TransitionEngine};
