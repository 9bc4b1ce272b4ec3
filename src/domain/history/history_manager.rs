//! Rolling price history

use chrono::{DateTime, Duration, Utc};

use crate::domain::state::PriceSample;

/// Keeps per-target price histories bounded by count and by age
pub struct HistoryManager;

impl HistoryManager {
    /// Append a sample and drop the oldest entries beyond `cap`.
    ///
    /// `None` (no price observed) adds nothing but still enforces the cap.
    pub fn append(history: &mut Vec<PriceSample>, sample: Option<PriceSample>, cap: usize) {
        if let Some(sample) = sample {
            history.push(sample);
        }
        Self::truncate(history, cap);
    }

    /// Drop the oldest samples until at most `cap` remain.
    pub fn truncate(history: &mut Vec<PriceSample>, cap: usize) -> usize {
        let excess = history.len().saturating_sub(cap);
        history.drain(..excess);
        excess
    }

    /// Remove samples dated strictly before `now - window`.
    ///
    /// Returns the number of samples removed. A window reaching past the
    /// earliest representable date removes nothing.
    pub fn expire(history: &mut Vec<PriceSample>, now: DateTime<Utc>, window: Duration) -> usize {
        let Some(cutoff) = now.checked_sub_signed(window) else {
            return 0;
        };
        let before = history.len();
        history.retain(|sample| sample.date >= cutoff);
        before - history.len()
    }

    /// Last `count` samples, oldest first.
    pub fn recent(history: &[PriceSample], count: usize) -> &[PriceSample] {
        let start = history.len().saturating_sub(count);
        &history[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(seconds)
    }

    #[test]
    fn test_rolling_cap_keeps_most_recent() {
        let mut history = Vec::new();
        for i in 0..60 {
            HistoryManager::append(&mut history, Some(PriceSample::new(i as f64, at(i))), 50);
        }

        assert_eq!(history.len(), 50);
        assert_eq!(history.first().unwrap().price, 10.0);
        assert_eq!(history.last().unwrap().price, 59.0);
        assert!(history.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_append_without_price_is_noop() {
        let mut history = vec![PriceSample::new(1.0, at(0))];
        HistoryManager::append(&mut history, None, 50);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_append_without_price_still_enforces_cap() {
        let mut history: Vec<_> = (0..60).map(|i| PriceSample::new(i as f64, at(i))).collect();
        HistoryManager::append(&mut history, None, 50);
        assert_eq!(history.len(), 50);
        assert_eq!(history[0].price, 10.0);
    }

    #[test]
    fn test_truncate() {
        let mut history: Vec<_> = (0..8).map(|i| PriceSample::new(i as f64, at(i))).collect();
        assert_eq!(HistoryManager::truncate(&mut history, 3), 5);
        assert_eq!(history.iter().map(|s| s.price).collect::<Vec<_>>(), vec![5.0, 6.0, 7.0]);
        assert_eq!(HistoryManager::truncate(&mut history, 10), 0);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_append_trims_history_loaded_above_cap() {
        let mut history: Vec<_> = (0..10).map(|i| PriceSample::new(i as f64, at(i))).collect();
        HistoryManager::append(&mut history, Some(PriceSample::new(10.0, at(10))), 5);
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].price, 6.0);
    }

    #[test]
    fn test_expire_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let kept = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let dropped = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        let mut history = vec![PriceSample::new(1.0, dropped), PriceSample::new(2.0, kept)];

        let removed = HistoryManager::expire(&mut history, now, Duration::hours(24));

        assert_eq!(removed, 1);
        assert_eq!(history, vec![PriceSample::new(2.0, kept)]);
    }

    #[test]
    fn test_expire_keeps_future_samples() {
        let now = at(0);
        let mut history = vec![PriceSample::new(1.0, at(3600))];
        HistoryManager::expire(&mut history, now, Duration::hours(24));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_expire_window_past_date_range_keeps_everything() {
        let mut history = vec![PriceSample::new(1.0, at(-86_400 * 365)), PriceSample::new(2.0, at(0))];
        // ~300k years, beyond chrono's earliest date
        let removed = HistoryManager::expire(&mut history, at(0), Duration::days(365 * 300_000));
        assert_eq!(removed, 0);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_recent() {
        let history: Vec<_> = (0..8).map(|i| PriceSample::new(i as f64, at(i))).collect();
        let recent = HistoryManager::recent(&history, 5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].price, 3.0);
        assert_eq!(HistoryManager::recent(&history[..2], 5).len(), 2);
    }
}
