//! Core types and errors for the dependency checker.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors that abort the whole run.
#[derive(Error, Debug)]
pub enum DepprobeError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DepprobeError>;

/// Errors that abort processing of a single manifest URL.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("non-200 response: {0}")]
    HttpStatus(u16),

    #[error("failed to decode manifest: {0}")]
    Decode(String),
}

/// A decoded package manifest.
///
/// Only the two flat name-to-version mappings are kept. Versions are carried
/// along but never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
}

impl Manifest {
    /// Total number of declared entries across both sets.
    pub fn len(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand the manifest into one check per entry, runtime set first.
    ///
    /// A name present in both sets yields two independent checks.
    pub fn checks(&self, source_url: &str) -> Vec<DependencyCheck> {
        let runtime = self
            .dependencies
            .keys()
            .map(|name| DependencyCheck::new(name, DependencyKind::Runtime, source_url));
        let dev = self
            .dev_dependencies
            .keys()
            .map(|name| DependencyCheck::new(name, DependencyKind::Dev, source_url));
        runtime.chain(dev).collect()
    }
}

/// Which manifest set a dependency was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyKind {
    /// Declared under `dependencies`.
    Runtime,
    /// Declared under `devDependencies`.
    Dev,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Runtime => f.write_str("dependency"),
            DependencyKind::Dev => f.write_str("devDependency"),
        }
    }
}

/// One dependency name to verify against the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyCheck {
    pub name: String,
    pub kind: DependencyKind,
    pub source_url: String,
}

impl DependencyCheck {
    pub fn new(name: &str, kind: DependencyKind, source_url: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            source_url: source_url.to_string(),
        }
    }
}

/// Result of a single registry lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupStatus {
    /// The name is published.
    Found,
    /// The registry reported zero results (potential confusion target).
    NotFound,
    /// The lookup could not be completed; the name's state is unknown.
    Failed { reason: String },
}

/// Log level a status line is reported at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl Level {
    /// The bracketed tag that prefixes every status line.
    pub fn tag(self) -> &'static str {
        match self {
            Level::Info => "[INFO]",
            Level::Warning => "[WARNING]",
            Level::Error => "[ERROR]",
        }
    }
}

/// A classified result for one dependency check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Outcome {
    pub check: DependencyCheck,
    pub status: LookupStatus,
}

impl Outcome {
    pub fn level(&self) -> Level {
        match self.status {
            LookupStatus::Found => Level::Info,
            LookupStatus::NotFound => Level::Warning,
            LookupStatus::Failed { .. } => Level::Error,
        }
    }

    /// Whether this outcome flags a potential dependency confusion.
    pub fn is_confusable(&self) -> bool {
        self.status == LookupStatus::NotFound
    }
}
