//! `oac fetch <target>` – dispatch a GET fetch event.

use anyhow::{Context, Result};
use oac_core::http::Request;
use oac_core::worker::WorkerHost;
use std::path::Path;
use url::Url;

pub async fn run_fetch(host: &mut WorkerHost, target: &str, output: Option<&Path>) -> Result<()> {
    let url = resolve_target(host.worker().origin(), target)?;
    let state = host.resume_installed().await?;
    tracing::debug!(%url, %state, "dispatching fetch");

    let outcome = host.dispatch_fetch(Request::get(url.clone())).await?;
    let response = &outcome.response;
    println!(
        "{} {} ({}, {} bytes) {}",
        response.status,
        response.status_text,
        outcome.source,
        response.body.len(),
        url
    );
    if let Some(path) = output {
        tokio::fs::write(path, &response.body)
            .await
            .with_context(|| format!("write {}", path.display()))?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

/// Absolute URLs are used as-is; anything else is joined onto the origin.
pub(crate) fn resolve_target(origin: &Url, target: &str) -> Result<Url> {
    match Url::parse(target) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => origin
            .join(target)
            .with_context(|| format!("invalid path {target}")),
        Err(e) => Err(e).with_context(|| format!("invalid URL {target}")),
    }
}
