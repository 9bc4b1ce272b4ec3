//! Back-in-stock edge detection

use crate::domain::state::MonitorState;
use crate::shared::types::Observation;

/// The two states a target can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    OutOfStock,
    InStock,
}

impl StockStatus {
    pub fn from_flag(in_stock: bool) -> Self {
        if in_stock {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out of stock",
            StockStatus::InStock => "in stock",
        }
    }
}

/// Outcome of applying one observation to a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StockStatus,
    pub to: StockStatus,
    pub notify: bool,
}

/// Decides when a target deserves a notification.
///
/// Only `OutOfStock -> InStock` with a known price at or below a known target
/// fires. Staying in stock never fires again, however far the price drops.
pub struct TransitionEngine;

impl TransitionEngine {
    pub fn evaluate(
        prev_in_stock: bool,
        observed_in_stock: bool,
        observed_price: Option<f64>,
        target_price: Option<f64>,
    ) -> bool {
        match (observed_price, target_price) {
            (Some(price), Some(target)) => observed_in_stock && !prev_in_stock && price <= target,
            _ => false,
        }
    }

    /// Evaluate against the stored flag, then overwrite it with the observation.
    pub fn apply(state: &mut MonitorState, observation: Observation, target_price: Option<f64>) -> Transition {
        let from = StockStatus::from_flag(state.in_stock);
        let notify = Self::evaluate(state.in_stock, observation.in_stock, observation.price, target_price);
        state.in_stock = observation.in_stock;

        Transition {
            from,
            to: StockStatus::from_flag(observation.in_stock),
            notify,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: Option<f64> = Some(100.0);

    #[test]
    fn test_fires_on_back_in_stock_under_target() {
        assert!(TransitionEngine::evaluate(false, true, Some(95.0), TARGET));
        assert!(TransitionEngine::evaluate(false, true, Some(100.0), TARGET));
    }

    #[test]
    fn test_price_gate() {
        assert!(!TransitionEngine::evaluate(false, true, Some(100.01), TARGET));
        assert!(!TransitionEngine::evaluate(true, true, Some(150.0), TARGET));
    }

    #[test]
    fn test_unknown_price_or_target_never_fires() {
        assert!(!TransitionEngine::evaluate(false, true, None, TARGET));
        assert!(!TransitionEngine::evaluate(false, true, Some(1.0), None));
    }

    #[test]
    fn test_staying_in_stock_never_fires() {
        let mut state = MonitorState { in_stock: true, prices: vec![] };
        let fired = [90.0, 80.0, 50.0, 10.0]
            .into_iter()
            .filter(|price| TransitionEngine::apply(&mut state, Observation::new(true, Some(*price)), TARGET).notify)
            .count();
        assert_eq!(fired, 0);
    }

    #[test]
    fn test_single_fire_sequence() {
        let sequence = [
            Observation::new(false, Some(95.0)),
            Observation::new(true, Some(95.0)),
            Observation::new(true, Some(90.0)),
            Observation::new(false, None),
            Observation::new(true, Some(99.0)),
        ];
        let mut state = MonitorState::default();

        let fired_at: Vec<usize> = sequence
            .iter()
            .enumerate()
            .filter(|(_, obs)| TransitionEngine::apply(&mut state, **obs, TARGET).notify)
            .map(|(i, _)| i + 1)
            .collect();

        assert_eq!(fired_at, vec![2, 5]);
    }

    #[test]
    fn test_apply_updates_flag_and_reports_edge() {
        let mut state = MonitorState { in_stock: true, prices: vec![] };
        let transition = TransitionEngine::apply(&mut state, Observation::new(false, None), TARGET);

        assert!(!state.in_stock);
        assert_eq!(transition.from, StockStatus::InStock);
        assert_eq!(transition.to, StockStatus::OutOfStock);
        assert!(!transition.notify);
    }
}
