//! Registry lookups through the public search page.
//!
//! The search page is fetched through a CORS proxy and the rendered body is
//! scanned for the zero-results marker. There is no stable API field for
//! this, so the check is a plain substring match.

use crate::config::RegistryConfig;
use crate::registry::Registry;
use crate::types::LookupStatus;
use reqwest::Client;
use tracing::{debug, trace};
use url::Url;

/// Registry client backed by the rendered search page.
#[derive(Debug, Clone)]
pub struct SearchPageRegistry {
    client: Client,
    config: RegistryConfig,
}

impl SearchPageRegistry {
    /// Create a registry client on top of the shared HTTP client.
    pub fn new(client: Client, config: RegistryConfig) -> Self {
        Self { client, config }
    }

    /// Build the proxied search URL for `name`.
    ///
    /// The name is encoded into the search page URL, which is encoded in turn
    /// into the proxy's `url` parameter.
    pub fn lookup_url(&self, name: &str) -> Result<Url, url::ParseError> {
        let search = Url::parse_with_params(&self.config.search_page, &[("q", name)])?;
        Url::parse_with_params(&self.config.proxy_endpoint, &[("url", search.as_str())])
    }

    /// Classify a search page body.
    pub fn classify(&self, body: &str) -> LookupStatus {
        if body.contains(&self.config.zero_results_marker) {
            LookupStatus::NotFound
        } else {
            LookupStatus::Found
        }
    }

    async fn do_lookup(&self, name: &str) -> Result<String, String> {
        let url = self.lookup_url(name).map_err(|e| format!("invalid lookup URL: {}", e))?;
        trace!("Checking registry: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let response = response.error_for_status().map_err(|e| e.to_string())?;

        response
            .text()
            .await
            .map_err(|e| format!("failed to read response: {}", e))
    }
}

impl Registry for SearchPageRegistry {
    async fn lookup(&self, name: &str) -> LookupStatus {
        match self.do_lookup(name).await {
            Ok(body) => {
                let status = self.classify(&body);
                debug!("Registry lookup for {}: {:?}", name, status);
                status
            }
            Err(reason) => {
                debug!("Registry lookup for {} failed: {}", name, reason);
                LookupStatus::Failed { reason }
            }
        }
    }
}
