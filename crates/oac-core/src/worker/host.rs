//! Host side of the worker lifecycle: install dispatch with a deadline and
//! routing of fetches.

use std::time::Duration;

use super::{
    FetchEvent, FetchOutcome, InstallEvent, InstallReport, OfflineAssetCache, ResponseSource,
    WorkerError,
};
use crate::http::{fetch_async, Request};

/// Lifecycle state of the hosted worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Not installed yet.
    Parsed,
    Installing,
    /// Install succeeded; fetches are routed through the worker.
    Installed,
    /// Last install failed or timed out. Installing again starts a fresh attempt.
    Redundant,
}

impl WorkerState {
    pub fn controls_fetches(self) -> bool {
        matches!(self, WorkerState::Installed)
    }
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerState::Parsed => write!(f, "parsed"),
            WorkerState::Installing => write!(f, "installing"),
            WorkerState::Installed => write!(f, "installed"),
            WorkerState::Redundant => write!(f, "redundant"),
        }
    }
}

pub struct WorkerHost {
    worker: OfflineAssetCache,
    state: WorkerState,
    attempts: u32,
    install_timeout: Duration,
}

impl WorkerHost {
    pub fn new(worker: OfflineAssetCache, install_timeout: Duration) -> Self {
        Self {
            worker,
            state: WorkerState::Parsed,
            attempts: 0,
            install_timeout,
        }
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Install attempts so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn worker(&self) -> &OfflineAssetCache {
        &self.worker
    }

    /// Dispatch an install event and wait for it, at most `install_timeout`.
    ///
    /// On failure or timeout the worker becomes redundant; calling `install`
    /// again re-runs the whole population.
    pub async fn install(&mut self) -> Result<InstallReport, WorkerError> {
        self.attempts += 1;
        self.state = WorkerState::Installing;
        let event = InstallEvent {
            attempt: self.attempts,
        };

        let install = self.worker.on_install(&event);
        let result = match tokio::time::timeout(self.install_timeout, install).await {
            Ok(result) => result,
            Err(_) => Err(WorkerError::InstallTimedOut(self.install_timeout)),
        };

        match &result {
            Ok(report) => {
                self.state = WorkerState::Installed;
                tracing::info!(
                    cache = %report.cache_name,
                    stored = report.stored,
                    attempt = self.attempts,
                    "worker installed"
                );
            }
            Err(e) => {
                self.state = WorkerState::Redundant;
                tracing::warn!(attempt = self.attempts, "worker install failed: {}", e);
            }
        }
        result
    }

    /// Treat the worker as installed if a previous install completed against
    /// the same store (a restarted host). Returns the new state.
    pub async fn resume_installed(&mut self) -> Result<WorkerState, WorkerError> {
        if self.state == WorkerState::Parsed && self.worker.is_installed().await? {
            self.state = WorkerState::Installed;
        }
        Ok(self.state)
    }

    /// Route a request: through the worker once it is installed, straight to
    /// the network otherwise.
    pub async fn dispatch_fetch(&self, request: Request) -> Result<FetchOutcome, WorkerError> {
        if self.state.controls_fetches() {
            return self.worker.on_fetch(FetchEvent::new(request)).await;
        }
        tracing::debug!(state = %self.state, url = %request.url, "fetch not controlled by worker");
        let response = fetch_async(self.worker.fetcher(), request).await?;
        Ok(FetchOutcome {
            response,
            source: ResponseSource::Network,
        })
    }
}
