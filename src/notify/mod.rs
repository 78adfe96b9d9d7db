//! Status reporting.
//!
//! Pipeline components report [`Event`]s to a [`Sink`]; the sink decides
//! what reaches the user.

pub mod console;

pub use console::ConsoleOutput;

use crate::types::{DependencyKind, Level, LookupStatus, Outcome};
use std::fmt;

/// Something worth telling the user about.
#[derive(Debug, Clone)]
pub enum Event {
    /// A manifest URL was admitted and is being fetched.
    Fetching { url: String },
    /// A manifest URL could not be fetched or decoded.
    FetchFailed { url: String, error: String },
    /// A dependency check finished.
    Dependency(Outcome),
}

impl Event {
    pub fn level(&self) -> Level {
        match self {
            Event::Fetching { .. } => Level::Info,
            Event::FetchFailed { .. } => Level::Error,
            Event::Dependency(outcome) => outcome.level(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Fetching { url } => write!(f, "Fetching URL: {}", url),
            Event::FetchFailed { url, error } => {
                write!(f, "Failed to process '{}': {}", url, error)
            }
            Event::Dependency(Outcome { check, status }) => match status {
                LookupStatus::NotFound => write!(
                    f,
                    "Potential Dependency Confusion: '{}' not found on npm ({}, {})",
                    check.name, check.kind, check.source_url
                ),
                LookupStatus::Found => {
                    let label = match check.kind {
                        DependencyKind::Runtime => "Dependency",
                        DependencyKind::Dev => "DevDependency",
                    };
                    write!(
                        f,
                        "{} '{}' exists on npm ({})",
                        label, check.name, check.source_url
                    )
                }
                LookupStatus::Failed { reason } => write!(
                    f,
                    "Failed to look up {} '{}' from '{}': {}",
                    check.kind, check.name, check.source_url, reason
                ),
            },
        }
    }
}

/// Receives status events from concurrently running tasks.
pub trait Sink: Send + Sync {
    fn emit(&self, event: &Event);
}
