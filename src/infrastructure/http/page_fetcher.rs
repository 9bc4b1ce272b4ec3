//! HTTP page retrieval with rotating request identity

use rand::seq::SliceRandom;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use crate::shared::errors::SiteError;

const FALLBACK_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
];

/// Fetches product pages, picking a random User-Agent per request
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    user_agents: Vec<String>,
}

impl PageFetcher {
    pub fn new(timeout: Duration, user_agents: Vec<String>) -> Result<Self, SiteError> {
        let client = Client::builder().timeout(timeout).build()?;
        let user_agents = if user_agents.is_empty() {
            FALLBACK_USER_AGENTS.iter().map(|ua| ua.to_string()).collect()
        } else {
            user_agents
        };
        Ok(Self { client, user_agents })
    }

    /// Read one User-Agent per line. Missing file means built-in defaults.
    pub fn load_user_agents<P: AsRef<Path>>(path: P) -> Vec<String> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => parse_user_agents(&content),
            Err(e) => {
                warn!(
                    "User agent list {} unavailable ({}), using built-in defaults",
                    path.as_ref().display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn pick_user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or(FALLBACK_USER_AGENTS[0])
    }

    /// GET a page body. Non-2xx responses are errors.
    pub async fn fetch(&self, url: &str) -> Result<String, SiteError> {
        let user_agent = self.pick_user_agent();
        debug!("GET {} (ua: {})", url, user_agent);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiteError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

fn parse_user_agents(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_user_agents_skips_blank_and_comments() {
        let agents = parse_user_agents("UA-1\n\n  # comment\n UA-2 \n");
        assert_eq!(agents, vec!["UA-1".to_string(), "UA-2".to_string()]);
    }

    #[test]
    fn test_load_user_agents_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Agent/1.0").unwrap();
        writeln!(file, "Agent/2.0").unwrap();

        let agents = PageFetcher::load_user_agents(file.path());
        assert_eq!(agents.len(), 2);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let agents = PageFetcher::load_user_agents("/nonexistent/user_agents.txt");
        assert!(agents.is_empty());

        let fetcher = PageFetcher::new(Duration::from_secs(1), agents).unwrap();
        assert_eq!(fetcher.user_agents.len(), FALLBACK_USER_AGENTS.len());
        assert!(FALLBACK_USER_AGENTS.contains(&fetcher.pick_user_agent()));
    }
}
