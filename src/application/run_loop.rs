use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::domain::history::HistoryManager;
use crate::domain::state::{PriceSample, RunState};
use crate::domain::transition::TransitionEngine;
use crate::infrastructure::notify::{NotificationDispatcher, StockEvent};
use crate::infrastructure::sites::SiteRegistry;
use crate::shared::errors::SiteError;
use crate::shared::types::{Product, SiteTarget};

/// Settings for one monitoring pass
#[derive(Debug, Clone)]
pub struct RunLoopConfig {
    pub history_cap: usize,
    pub reset_window: Duration,
    pub recent_history_count: usize,
}

impl Default for RunLoopConfig {
    fn default() -> Self {
        Self {
            history_cap: 50,
            reset_window: Duration::hours(24),
            recent_history_count: 5,
        }
    }
}

/// Counters for one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub checked: usize,
    pub skipped: usize,
    pub failed: usize,
    pub notifications: usize,
    pub reset_performed: bool,
}

enum TargetOutcome {
    Observed { notified: bool },
    Skipped,
}

/// One sequential pass over every (product, site) target
pub struct RunLoop {
    config: RunLoopConfig,
    registry: SiteRegistry,
    dispatcher: NotificationDispatcher,
}

impl RunLoop {
    pub fn new(config: RunLoopConfig, registry: SiteRegistry, dispatcher: NotificationDispatcher) -> Self {
        Self { config, registry, dispatcher }
    }

    /// Check every target once and fold the observations into `state`.
    ///
    /// A failing target is logged and counted; it never stops the pass.
    pub async fn run_once(&self, catalog: &[Product], state: &mut RunState, now: DateTime<Utc>) -> RunSummary {
        let mut summary = RunSummary {
            reset_performed: self.periodic_reset(state, now),
            ..RunSummary::default()
        };

        for product in catalog {
            let mut seen_sites = HashSet::new();
            for target in &product.targets {
                if !seen_sites.insert(target.site.to_lowercase()) {
                    warn!("Product {} lists site {} more than once, skipping duplicate", product.id, target.site);
                    summary.skipped += 1;
                    continue;
                }

                match self.check_target(product, target, state, now).await {
                    Ok(TargetOutcome::Observed { notified }) => {
                        summary.checked += 1;
                        if notified {
                            summary.notifications += 1;
                        }
                    }
                    Ok(TargetOutcome::Skipped) => summary.skipped += 1,
                    Err(e) => {
                        warn!("❌ {} @ {}: {}, keeping previous state", product.name, target.site, e);
                        summary.failed += 1;
                    }
                }
            }
        }

        // Failed, skipped and delisted targets skip append; a lowered cap applies to all
        let cap = self.config.history_cap;
        let trimmed: usize = state.targets_mut().map(|target| HistoryManager::truncate(&mut target.prices, cap)).sum();
        if trimmed > 0 {
            info!("Trimmed {} samples beyond the history cap of {}", trimmed, cap);
        }

        summary
    }

    /// Expire old samples from every history once per reset window.
    fn periodic_reset(&self, state: &mut RunState, now: DateTime<Utc>) -> bool {
        let due = match state.last_reset {
            None => true,
            Some(last) => now - last > self.config.reset_window,
        };
        if !due {
            return false;
        }

        let window = self.config.reset_window;
        let removed: usize = state
            .targets_mut()
            .map(|target| HistoryManager::expire(&mut target.prices, now, window))
            .sum();
        state.mark_reset(now);
        info!("🧹 History reset: removed {} samples older than {}h", removed, window.num_hours());
        true
    }

    async fn check_target(
        &self,
        product: &Product,
        target: &SiteTarget,
        state: &mut RunState,
        now: DateTime<Utc>,
    ) -> Result<TargetOutcome, SiteError> {
        let Some(parser) = self.registry.resolve(&target.site) else {
            warn!("{}", SiteError::UnknownSite(target.site.clone()));
            return Ok(TargetOutcome::Skipped);
        };

        let observation = parser.extract(&target.url).await?;
        let target_price = product.target_price(&target.currency);
        if target_price.is_none() {
            debug!("{} has no max price in {}, alerts disabled for {}", product.id, target.currency, target.site);
        }

        // Site ids are case-insensitive everywhere else
        let entry = state.entry(&product.id, &target.site.to_lowercase());
        HistoryManager::append(
            &mut entry.prices,
            observation.price.map(|price| PriceSample::new(price, now)),
            self.config.history_cap,
        );
        let transition = TransitionEngine::apply(entry, observation, target_price);

        info!(
            "{} @ {}: {} price={}",
            product.name,
            target.site,
            transition.to.as_str(),
            observation.price.map_or_else(|| "n/a".to_string(), |p| format!("{:.2}", p))
        );
        if transition.from != transition.to {
            info!("{} @ {} went from {} to {}", product.name, target.site, transition.from.as_str(), transition.to.as_str());
        }

        // notify implies both prices are known
        let (true, Some(price), Some(target_price)) = (transition.notify, observation.price, target_price) else {
            return Ok(TargetOutcome::Observed { notified: false });
        };

        let event = StockEvent {
            product_name: product.name.clone(),
            site: target.site.clone(),
            price,
            target_price,
            currency: target.currency.clone(),
            url: target.url.clone(),
            recent_history: HistoryManager::recent(&entry.prices, self.config.recent_history_count).to_vec(),
            timestamp: now,
        };
        info!("🛒 {} available at {} for {:.2} {} (target {:.2})", event.product_name, event.site, price, event.currency, target_price);
        self.dispatcher.dispatch(&event).await;

        Ok(TargetOutcome::Observed { notified: true })
    }
}
