// src/app.rs
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, info_span, warn, Instrument};

use crate::application::{RunLoop, RunLoopConfig, RunSummary};
use crate::config::{Config, SiteSelectorCfg, MAX_RESET_WINDOW_HOURS};
use crate::infrastructure::http::PageFetcher;
use crate::infrastructure::notify::{
    DiscordNotifier, LogNotifier, NotificationDispatcher, TextBridgeNotifier,
};
use crate::infrastructure::sites::SiteRegistry;
use crate::infrastructure::storage::{ProductCatalog, StateStore};
use crate::shared::utils::generate_id;

pub const DISCORD_WEBHOOK_ENV: &str = "STOCKWATCH_DISCORD_WEBHOOK";
pub const TEXT_BRIDGE_ENV: &str = "STOCKWATCH_TEXT_BRIDGE_URL";

/// Everything a run needs, resolved once at startup
#[derive(Clone)]
pub struct AppCfg {
    pub dry_run: bool,
    pub catalog_path: PathBuf,
    pub state_path: PathBuf,
    pub user_agents_path: PathBuf,
    pub request_timeout: Duration,
    pub history_cap: usize,
    pub reset_window: chrono::Duration,
    pub recent_history_count: usize,
    pub history_field_limit: usize,
    pub sites: Vec<SiteSelectorCfg>,

    // Secrets, from the environment only
    pub discord_webhook: Option<String>,
    pub text_bridge_url: Option<String>,
}

impl AppCfg {
    pub fn from_config(cfg: Config, dry_run: bool) -> Self {
        Self::from_config_with_env(cfg, dry_run, |key| std::env::var(key).ok())
    }

    pub fn from_config_with_env<F>(cfg: Config, dry_run: bool, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            dry_run,
            catalog_path: PathBuf::from(cfg.paths.catalog),
            state_path: PathBuf::from(cfg.paths.state),
            user_agents_path: PathBuf::from(cfg.http.user_agents_file),
            request_timeout: Duration::from_secs(cfg.http.timeout_secs),
            history_cap: cfg.monitor.history_cap,
            // Configs built in code may skip validate()
            reset_window: chrono::Duration::hours(cfg.monitor.reset_window_hours.min(MAX_RESET_WINDOW_HOURS) as i64),
            recent_history_count: cfg.monitor.recent_history_count,
            history_field_limit: cfg.monitor.history_field_limit,
            sites: cfg.sites,
            discord_webhook: secret(DISCORD_WEBHOOK_ENV),
            text_bridge_url: secret(TEXT_BRIDGE_ENV),
        }
    }

    fn run_loop_config(&self) -> RunLoopConfig {
        RunLoopConfig {
            history_cap: self.history_cap,
            reset_window: self.reset_window,
            recent_history_count: self.recent_history_count,
        }
    }
}

// Webhook URLs embed credentials, keep them out of logs.
impl std::fmt::Debug for AppCfg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCfg")
            .field("dry_run", &self.dry_run)
            .field("catalog_path", &self.catalog_path)
            .field("state_path", &self.state_path)
            .field("user_agents_path", &self.user_agents_path)
            .field("request_timeout", &self.request_timeout)
            .field("history_cap", &self.history_cap)
            .field("reset_window_hours", &self.reset_window.num_hours())
            .field("recent_history_count", &self.recent_history_count)
            .field("history_field_limit", &self.history_field_limit)
            .field("sites", &self.sites.iter().map(|s| s.id.as_str()).collect::<Vec<_>>())
            .field("discord_webhook", &self.discord_webhook.as_ref().map(|_| "<set>"))
            .field("text_bridge_url", &self.text_bridge_url.as_ref().map(|_| "<set>"))
            .finish()
    }
}

fn build_dispatcher(app_cfg: &AppCfg) -> Result<NotificationDispatcher> {
    let mut dispatcher = NotificationDispatcher::default();

    if app_cfg.dry_run {
        info!("Dry run - notifications go to the log only");
        dispatcher.add_channel(Box::new(LogNotifier));
        return Ok(dispatcher);
    }

    match &app_cfg.discord_webhook {
        Some(url) => dispatcher.add_channel(Box::new(DiscordNotifier::new(
            url.clone(),
            app_cfg.history_field_limit,
            app_cfg.request_timeout,
        )?)),
        None => warn!("{} not set, Discord notifications disabled", DISCORD_WEBHOOK_ENV),
    }
    match &app_cfg.text_bridge_url {
        Some(url) => dispatcher.add_channel(Box::new(TextBridgeNotifier::new(url.clone(), app_cfg.request_timeout)?)),
        None => warn!("{} not set, text notifications disabled", TEXT_BRIDGE_ENV),
    }

    if dispatcher.channel_count() == 0 {
        warn!("No notification channels configured; availability will only be logged");
    }
    Ok(dispatcher)
}

/// One full pass: load, check every target, persist.
pub async fn run(app_cfg: AppCfg) -> Result<RunSummary> {
    let span = info_span!("run", run_id = %generate_id());
    run_pass(app_cfg).instrument(span).await
}

async fn run_pass(app_cfg: AppCfg) -> Result<RunSummary> {
    info!("🚀 Starting stock check");
    info!("Configuration: {:?}", app_cfg);

    // Nothing to do without a catalog; fail before touching the network
    let catalog = ProductCatalog::load(&app_cfg.catalog_path).context("load product catalog")?;

    let store = StateStore::new(&app_cfg.state_path);
    let mut state = store.load().context("load state")?;

    let user_agents = PageFetcher::load_user_agents(&app_cfg.user_agents_path);
    let fetcher = Arc::new(PageFetcher::new(app_cfg.request_timeout, user_agents).context("build HTTP client")?);
    let registry = SiteRegistry::with_defaults(fetcher, &app_cfg.sites).context("register sites")?;
    let dispatcher = build_dispatcher(&app_cfg)?;

    let run_loop = RunLoop::new(app_cfg.run_loop_config(), registry, dispatcher);
    let summary = run_loop.run_once(&catalog, &mut state, Utc::now()).await;

    store
        .persist(&state)
        .with_context(|| format!("persist state to {}", store.path().display()))?;

    info!(
        "✅ Run complete: {} checked, {} skipped, {} failed, {} notifications{}",
        summary.checked,
        summary.skipped,
        summary.failed,
        summary.notifications,
        if summary.reset_performed { ", history reset" } else { "" }
    );
    Ok(summary)
}
