//! Events dispatched to the worker and what its handlers resolve with.

use crate::http::{Request, Response};

/// Install lifecycle event. `attempt` counts installs of this worker, from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallEvent {
    pub attempt: u32,
}

/// A request the host routed through the worker.
#[derive(Debug, Clone)]
pub struct FetchEvent {
    pub request: Request,
}

impl FetchEvent {
    pub fn new(request: Request) -> Self {
        Self { request }
    }
}

/// Outcome of a successful install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub cache_name: String,
    /// Storage writes performed, one per manifest entry.
    pub stored: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Cache,
    Network,
}

impl std::fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseSource::Cache => write!(f, "cache"),
            ResponseSource::Network => write!(f, "network"),
        }
    }
}

/// Response a fetch event resolved with, and where it came from.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub response: Response,
    pub source: ResponseSource,
}
