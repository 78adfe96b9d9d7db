//! Manifest fetcher. One attempt per URL, no retries.

use crate::manifest::decode;
use crate::types::{FetchError, Manifest};
use reqwest::{Client, StatusCode};
use tracing::{debug, trace};

/// Retrieves and decodes manifests over the shared HTTP client.
#[derive(Debug, Clone)]
pub struct ManifestFetcher {
    client: Client,
}

impl ManifestFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch a manifest. Anything but a 200 with a decodable body is an error
    /// for this URL only.
    pub async fn fetch(&self, url: &str) -> Result<Manifest, FetchError> {
        trace!("Fetching manifest: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        let manifest = decode(&body)?;

        debug!(
            "Fetched manifest: {} ({} dependencies, {} devDependencies)",
            url,
            manifest.dependencies.len(),
            manifest.dev_dependencies.len()
        );

        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use httpmock::prelude::*;

    fn fetcher() -> ManifestFetcher {
        ManifestFetcher::new(HttpConfig::default().build_client().unwrap())
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/package.json");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!({
                        "dependencies": {"left-pad": "1.0.0"},
                        "devDependencies": {"mocha": "10.0.0"}
                    }));
            })
            .await;

        let manifest = fetcher().fetch(&server.url("/package.json")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(manifest.len(), 2);
        assert!(manifest.dev_dependencies.contains_key("mocha"));
    }

    #[tokio::test]
    async fn test_fetch_non_200() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing.json");
                then.status(404);
            })
            .await;

        let err = fetcher().fetch(&server.url("/missing.json")).await.unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus(404)));
    }

    #[tokio::test]
    async fn test_fetch_other_success_codes_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/accepted.json");
                then.status(202).body("{}");
            })
            .await;

        let err = fetcher().fetch(&server.url("/accepted.json")).await.unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus(202)));
    }

    #[tokio::test]
    async fn test_fetch_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/page");
                then.status(200).body("<html>hello</html>");
            })
            .await;

        let err = fetcher().fetch(&server.url("/page")).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let err = fetcher().fetch("").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
