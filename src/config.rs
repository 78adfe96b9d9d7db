//! Configuration handling for the checker.

use crate::types::Result;
use clap::Parser;
use reqwest::Client;
use std::num::NonZeroUsize;
use std::time::Duration;
use tracing::warn;

/// Check package manifests for unpublished (confusable) dependency names.
///
/// Reads one manifest URL per line from stdin.
#[derive(Parser, Debug, Clone)]
#[command(name = "depprobe")]
#[command(author, about, long_about = None)]
pub struct Config {
    /// Number of URLs processed concurrently
    #[arg(short = 'c', default_value_t = 5, allow_negative_numbers = true)]
    pub concurrency: i64,

    /// Enable verbose output
    #[arg(short = 'v')]
    pub verbose: bool,
}

impl Config {
    /// Capacity of the URL slot set.
    ///
    /// Non-positive values are clamped to a single slot.
    pub fn slots(&self) -> NonZeroUsize {
        match usize::try_from(self.concurrency).ok().and_then(NonZeroUsize::new) {
            Some(n) => n,
            None => {
                warn!(
                    "Concurrency {} is not positive, using 1",
                    self.concurrency
                );
                NonZeroUsize::MIN
            }
        }
    }
}

/// Configuration for HTTP requests.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_idle_per_host: usize,
    pub idle_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 5,
            max_idle_per_host: 10,
            idle_timeout_secs: 30,
            user_agent: "Mozilla/5.0 (compatible; depprobe/0.1)".to_string(),
        }
    }
}

impl HttpConfig {
    /// Build the pooled client shared by the fetcher and the registry.
    pub fn build_client(&self) -> Result<Client> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .user_agent(&self.user_agent)
            .pool_max_idle_per_host(self.max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .build()?;
        Ok(client)
    }
}

/// Where and how registry lookups are made.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Proxy that fetches `search_page` on our behalf (`?url=...`).
    pub proxy_endpoint: String,
    /// Registry search page, queried with `?q=<name>`.
    pub search_page: String,
    /// Body text the search page renders when nothing matched.
    pub zero_results_marker: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            proxy_endpoint: "https://api.allorigins.win/raw".to_string(),
            search_page: "https://www.npmjs.com/search".to_string(),
            zero_results_marker: "0 packages found".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags() {
        let config = Config::parse_from(["depprobe"]);
        assert_eq!(config.concurrency, 5);
        assert!(!config.verbose);
    }

    #[test]
    fn test_short_flags() {
        let config = Config::parse_from(["depprobe", "-c", "12", "-v"]);
        assert_eq!(config.concurrency, 12);
        assert!(config.verbose);
        assert_eq!(config.slots().get(), 12);
    }

    #[test]
    fn test_non_positive_concurrency_clamped() {
        let config = Config::parse_from(["depprobe", "-c", "0"]);
        assert_eq!(config.slots().get(), 1);

        let config = Config::parse_from(["depprobe", "-c", "-4"]);
        assert_eq!(config.concurrency, -4);
        assert_eq!(config.slots().get(), 1);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Config::try_parse_from(["depprobe", "--parallel", "3"]).is_err());
        assert!(Config::try_parse_from(["depprobe", "-c", "many"]).is_err());
        assert!(Config::try_parse_from(["depprobe", "-V"]).is_err());
        assert!(Config::try_parse_from(["depprobe", "--version"]).is_err());
    }

    #[test]
    fn test_client_builds() {
        assert!(HttpConfig::default().build_client().is_ok());
    }
}
