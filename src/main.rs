use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use stockwatch::app::{self, AppCfg};
use stockwatch::config::Config;

const DEFAULT_CONFIG: &str = "Config.toml";

#[derive(Parser, Debug)]
#[command(version, about = "Check watched product pages once and alert when stock returns under target price")]
struct Args {
    /// Path to config file (defaults to ./Config.toml when present)
    #[arg(long)]
    config: Option<String>,

    /// Product catalog JSON (overrides config)
    #[arg(long)]
    catalog: Option<String>,

    /// State file JSON (overrides config)
    #[arg(long)]
    state: Option<String>,

    /// Log notifications instead of sending them
    #[arg(long)]
    dry_run: bool,
}

fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path).with_context(|| format!("load config {}", path)),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            Config::from_file(DEFAULT_CONFIG).with_context(|| format!("load config {}", DEFAULT_CONFIG))
        }
        None => Ok(Config::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    // Priority: CLI args > Config file > Defaults
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(catalog) = args.catalog {
        cfg.paths.catalog = catalog;
    }
    if let Some(state) = args.state {
        cfg.paths.state = state;
    }

    let app_cfg = AppCfg::from_config(cfg, args.dry_run);

    // Individual target failures are logged, not surfaced as an exit code
    app::run(app_cfg).await.map(|_| ())
}
