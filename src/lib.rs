//! depprobe - dependency confusion checker for remote package manifests.
//!
//! Given a list of manifest URLs, this library:
//! - Fetches and decodes each manifest (`dependencies` / `devDependencies`)
//! - Looks up every declared name on the public registry search
//! - Flags names the registry has never heard of
//!
//! URLs are processed by a bounded worker pool; the dependency checks of a
//! single manifest all run concurrently.
//!
//! # Example
//!
//! ```no_run
//! use depprobe::config::{HttpConfig, RegistryConfig};
//! use depprobe::{ConsoleOutput, ManifestFetcher, Scanner, SearchPageRegistry, WorkerPool};
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = HttpConfig::default().build_client().unwrap();
//!     let scanner = Scanner::new(
//!         ManifestFetcher::new(client.clone()),
//!         Arc::new(SearchPageRegistry::new(client, RegistryConfig::default())),
//!         Arc::new(ConsoleOutput::new(true)),
//!         WorkerPool::new(NonZeroUsize::new(5).unwrap()),
//!     );
//!     let summary = scanner
//!         .scan_summary(vec!["https://example.com/package.json".to_string()])
//!         .await;
//!     println!("{} potential confusion targets", summary.not_found);
//! }
//! ```

pub mod config;
pub mod manifest;
pub mod notify;
pub mod pool;
pub mod registry;
pub mod scanner;
pub mod types;
pub mod verifier;

pub use config::Config;
pub use manifest::ManifestFetcher;
pub use notify::{ConsoleOutput, Event, Sink};
pub use pool::WorkerPool;
pub use registry::{Registry, SearchPageRegistry};
pub use scanner::{read_targets, ScanSummary, Scanner, UrlReport};
pub use types::{
    DependencyCheck, DependencyKind, DepprobeError, FetchError, Level, LookupStatus, Manifest,
    Outcome, Result,
};
pub use verifier::Verifier;
