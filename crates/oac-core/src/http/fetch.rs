//! Network fetch via libcurl.

use std::str;
use std::sync::Arc;

use super::{parse, FetchError, Request, Response};
use crate::config::NetworkConfig;

/// Issues a request to the network and returns the full response.
///
/// Implementations block; async callers go through [`fetch_async`].
pub trait Fetcher: Send + Sync {
    fn fetch(&self, request: &Request) -> Result<Response, FetchError>;
}

/// Run `fetcher` for `request` on the blocking pool.
pub async fn fetch_async(
    fetcher: Arc<dyn Fetcher>,
    request: Request,
) -> Result<Response, FetchError> {
    tokio::task::spawn_blocking(move || fetcher.fetch(&request))
        .await
        .map_err(|e| FetchError::Join(e.to_string()))?
}

/// `Fetcher` backed by a fresh curl Easy handle per request. Follows redirects.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    network: NetworkConfig,
}

impl CurlFetcher {
    pub fn new(network: NetworkConfig) -> Self {
        Self { network }
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        if !request.is_http() {
            return Err(FetchError::UnsupportedScheme(
                request.url.scheme().to_string(),
            ));
        }

        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(request.url.as_str())?;
        match request.method.as_str() {
            "GET" => easy.get(true)?,
            "HEAD" => easy.nobody(true)?,
            other => easy.custom_request(other)?,
        }
        easy.follow_location(true)?;
        easy.max_redirections(self.network.max_redirects)?;
        easy.connect_timeout(self.network.connect_timeout())?;
        easy.timeout(self.network.timeout())?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        let url = easy
            .effective_url()?
            .map(str::to_string)
            .unwrap_or_else(|| request.url.to_string());
        let (status_text, headers) = parse::parse_headers(&header_lines);

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            status,
            bytes = body.len(),
            "network fetch"
        );

        Ok(Response {
            url,
            status,
            status_text,
            headers,
            body,
        })
    }
}
