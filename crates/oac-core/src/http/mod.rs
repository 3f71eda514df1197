//! Request / response values and the network side of a fetch.
//!
//! `Fetcher` is the seam between the worker and the network; `CurlFetcher`
//! is the libcurl implementation used by the CLI host.

mod error;
mod fetch;
mod parse;

pub use error::FetchError;
pub use fetch::{fetch_async, CurlFetcher, Fetcher};

use url::Url;

/// An outgoing request as seen by the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Upper-case method name, e.g. `GET`.
    pub method: String,
    pub url: Url,
}

impl Request {
    pub fn new(method: &str, url: Url) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            url,
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new("GET", url)
    }

    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }

    /// True for `http` and `https` URLs, the only schemes a cache bucket stores.
    pub fn is_http(&self) -> bool {
        matches!(self.url.scheme(), "http" | "https")
    }

    /// Key under which a response for this request is stored: the URL
    /// without its fragment. The query string stays significant.
    pub fn cache_key(&self) -> String {
        let mut url = self.url.clone();
        url.set_fragment(None);
        url.into()
    }
}

/// A complete response, either fresh from the network or read back from a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Final URL after redirects.
    pub url: String,
    pub status: u32,
    pub status_text: String,
    /// Header lines in the order received; names keep their original case.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// True for 2xx statuses.
    pub fn ok(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// First header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}


#[cfg(test)]
pub(crate) mod testing;
