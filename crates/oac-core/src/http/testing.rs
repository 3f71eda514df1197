//! In-process `Fetcher` for handler and storage tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::{FetchError, Fetcher, Request, Response};

type Route = (u32, Vec<(String, String)>, Vec<u8>);

/// Serves canned bodies by absolute URL, 404 for anything else, and records
/// every call. When offline, every fetch fails like an unreachable host.
#[derive(Default)]
pub(crate) struct StubFetcher {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<String>>,
    offline: AtomicBool,
    delay: Option<Duration>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(self, url: &str, status: u32, body: &[u8]) -> Self {
        self.set_route(url, status, body);
        self
    }

    /// Like `route`, with extra response headers.
    pub(crate) fn route_with_headers(
        self,
        url: &str,
        status: u32,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Self {
        let headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), (status, headers, body.to_vec()));
        self
    }

    /// Block for `delay` before answering each fetch.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn set_route(&self, url: &str, status: u32, body: &[u8]) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), (status, Vec::new(), body.to_vec()));
    }

    pub(crate) fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Fetcher for StubFetcher {
    fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        let url = request.url.to_string();
        self.calls.lock().unwrap().push(url.clone());
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.offline.load(Ordering::SeqCst) {
            // CURLE_COULDNT_CONNECT
            return Err(FetchError::Network(curl::Error::new(7)));
        }
        let (status, extra, body) = self
            .routes
            .lock()
            .unwrap()
            .get(&url)
            .cloned()
            .unwrap_or((404, Vec::new(), Vec::new()));
        let mut headers = vec![("Content-Length".to_string(), body.len().to_string())];
        headers.extend(extra);
        Ok(Response {
            url,
            status,
            status_text: String::new(),
            headers,
            body,
        })
    }
}
