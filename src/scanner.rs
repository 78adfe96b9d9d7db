//! Main scanner orchestrating fetch, verification and the URL pool.

use crate::manifest::ManifestFetcher;
use crate::notify::{Event, Sink};
use crate::pool::WorkerPool;
use crate::registry::Registry;
use crate::types::{FetchError, LookupStatus, Outcome, Result};
use crate::verifier::Verifier;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// What happened to one manifest URL.
#[derive(Debug)]
pub struct UrlReport {
    pub url: String,
    pub result: std::result::Result<Vec<Outcome>, FetchError>,
}

/// Totals for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub urls: usize,
    pub manifests: usize,
    pub failed_urls: usize,
    pub found: usize,
    pub not_found: usize,
    pub lookup_failed: usize,
}

impl ScanSummary {
    fn from_reports(reports: &[UrlReport]) -> Self {
        let mut summary = Self {
            urls: reports.len(),
            ..Self::default()
        };

        for report in reports {
            match &report.result {
                Ok(outcomes) => {
                    summary.manifests += 1;
                    for outcome in outcomes {
                        match outcome.status {
                            LookupStatus::Found => summary.found += 1,
                            LookupStatus::NotFound => summary.not_found += 1,
                            LookupStatus::Failed { .. } => summary.lookup_failed += 1,
                        }
                    }
                }
                Err(_) => summary.failed_urls += 1,
            }
        }

        summary
    }
}

/// Runs fetch then verify for each URL under the pool's bound.
pub struct Scanner<R> {
    fetcher: ManifestFetcher,
    verifier: Arc<Verifier<R>>,
    sink: Arc<dyn Sink>,
    pool: WorkerPool,
}

impl<R: Registry> Scanner<R> {
    pub fn new(
        fetcher: ManifestFetcher,
        registry: Arc<R>,
        sink: Arc<dyn Sink>,
        pool: WorkerPool,
    ) -> Self {
        let verifier = Arc::new(Verifier::new(registry, Arc::clone(&sink)));
        Self {
            fetcher,
            verifier,
            sink,
            pool,
        }
    }

    /// Process every URL and return one report per URL, in completion order.
    pub async fn scan_all(&self, urls: Vec<String>) -> Vec<UrlReport> {
        debug!(
            "Scanning {} URLs with {} slots",
            urls.len(),
            self.pool.capacity()
        );

        self.pool
            .run(urls, |url| {
                let fetcher = self.fetcher.clone();
                let verifier = Arc::clone(&self.verifier);
                let sink = Arc::clone(&self.sink);
                async move { scan_one(url, fetcher, verifier, sink).await }
            })
            .await
    }

    /// Like [`Scanner::scan_all`] but only keeps the totals.
    pub async fn scan_summary(&self, urls: Vec<String>) -> ScanSummary {
        let reports = self.scan_all(urls).await;
        ScanSummary::from_reports(&reports)
    }
}

async fn scan_one<R: Registry>(
    url: String,
    fetcher: ManifestFetcher,
    verifier: Arc<Verifier<R>>,
    sink: Arc<dyn Sink>,
) -> UrlReport {
    sink.emit(&Event::Fetching { url: url.clone() });

    let result = match fetcher.fetch(&url).await {
        Ok(manifest) => Ok(verifier.verify(manifest, &url).await),
        Err(e) => {
            debug!("Skipping {}: {}", url, e);
            sink.emit(&Event::FetchFailed {
                url: url.clone(),
                error: e.to_string(),
            });
            Err(e)
        }
    };

    UrlReport { url, result }
}

/// Read one URL per line until end of input.
///
/// Lines are kept verbatim apart from the line terminator; blank lines are
/// not skipped.
pub async fn read_targets<Rd>(reader: Rd) -> Result<Vec<String>>
where
    Rd: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut targets = Vec::new();
    while let Some(line) = lines.next_line().await? {
        targets.push(line);
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_targets_keeps_blank_lines() {
        let input: &[u8] = b"https://a.example/package.json\r\n\nhttps://b.example/package.json";
        let targets = read_targets(input).await.unwrap();

        assert_eq!(
            targets,
            vec![
                "https://a.example/package.json".to_string(),
                String::new(),
                "https://b.example/package.json".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_read_targets_empty_input() {
        let input: &[u8] = b"";
        assert!(read_targets(input).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_targets_invalid_utf8_fails() {
        use crate::types::DepprobeError;

        let input: &[u8] = b"https://a.example/\n\xff\xfe\n";
        assert!(matches!(
            read_targets(input).await,
            Err(DepprobeError::IoError(_))
        ));
    }

    #[test]
    fn test_summary_counts() {
        use crate::types::{DependencyCheck, DependencyKind};

        let outcome = |name: &str, status| Outcome {
            check: DependencyCheck::new(name, DependencyKind::Runtime, "a"),
            status,
        };
        let reports = vec![
            UrlReport {
                url: "a".to_string(),
                result: Ok(vec![
                    outcome("x", LookupStatus::Found),
                    outcome("y", LookupStatus::NotFound),
                    outcome("z", LookupStatus::Failed { reason: "dns".to_string() }),
                ]),
            },
            UrlReport {
                url: "b".to_string(),
                result: Err(FetchError::HttpStatus(404)),
            },
        ];

        assert_eq!(
            ScanSummary::from_reports(&reports),
            ScanSummary {
                urls: 2,
                manifests: 1,
                failed_urls: 1,
                found: 1,
                not_found: 1,
                lookup_failed: 1,
            }
        );
    }
}
