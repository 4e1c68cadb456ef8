//! Latest-version lookup on CRAN and Bioconductor package pages.

use crate::config::ClientConfig;
use crate::error::CheckError;
use aurrpkgs_core::{SourceKind, UpstreamRelease};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

/// Where the version lives on a package page: first the enclosing table,
/// then the `Version` row inside it.
struct PagePattern {
    table: Regex,
    version: Regex,
}

static CRAN_PAGE: LazyLock<PagePattern> = LazyLock::new(|| PagePattern {
    table: Regex::new(r#"(?s)<table summary="Package.*? summary">(.*?)</table>"#)
        .expect("static pattern compiles"),
    version: Regex::new(r"(?s)<tr>\s*<td>Version:</td>\s*<td>(.*?)</td>")
        .expect("static pattern compiles"),
});

static BIOC_PAGE: LazyLock<PagePattern> = LazyLock::new(|| PagePattern {
    table: Regex::new(r#"(?s)<table class="details">(.*?)</table>"#)
        .expect("static pattern compiles"),
    version: Regex::new(r"(?s)<tr[^>]*>\s*<td>Version</td>\s*<td>(.*?)</td>")
        .expect("static pattern compiles"),
});

fn page_pattern(kind: SourceKind) -> &'static PagePattern {
    match kind {
        SourceKind::Cran => &CRAN_PAGE,
        SourceKind::Bioconductor => &BIOC_PAGE,
    }
}

/// Work out which registry serves `raw_url`
pub fn detect_source(raw_url: &str) -> Result<(SourceKind, Url), CheckError> {
    let url = Url::parse(raw_url.trim())
        .map_err(|_| CheckError::UnsupportedSource(format!("URL '{raw_url}'")))?;

    let Some(host) = url.host_str() else {
        return Err(CheckError::UnsupportedSource(format!("URL '{raw_url}'")));
    };
    let bare_host = host.strip_prefix("www.").unwrap_or(host);

    match SourceKind::from_host(bare_host) {
        Some(kind) => Ok((kind, url)),
        None => Err(CheckError::UnsupportedSource(format!("repository {host}"))),
    }
}

/// Pull the version string out of a package page
pub fn extract_version(kind: SourceKind, html: &str) -> Result<String, CheckError> {
    let pattern = page_pattern(kind);

    let table = pattern
        .table
        .captures(html)
        .and_then(|c| c.get(1))
        .ok_or_else(|| CheckError::VersionNotFound("can't find package info".to_string()))?;

    let version = pattern
        .version
        .captures(table.as_str())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CheckError::VersionNotFound("can't find version info".to_string()))?;

    Ok(version.to_string())
}

/// Client fetching upstream package pages
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    mirrors: HashMap<SourceKind, Url>,
}

impl UpstreamClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: config.http_client(),
            mirrors: config.mirrors.clone(),
        }
    }

    /// Fetch the latest release advertised at `raw_url`
    pub async fn latest_release(&self, raw_url: &str) -> Result<UpstreamRelease, CheckError> {
        let (source, url) = detect_source(raw_url)?;
        let target = self.request_url(source, &url);

        debug!(%source, url = %target, "fetching upstream page");

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| CheckError::UpstreamUnreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::UpstreamUnreachable(format!(
                "server returned {status}"
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| CheckError::UpstreamUnreachable(e.to_string()))?;

        let version = extract_version(source, &html)?;
        debug!(%source, version = %version, "found upstream version");

        Ok(UpstreamRelease { source, version })
    }

    /// Swap in the configured mirror's scheme, host and port, keeping the
    /// original path and query. A path on the mirror itself is not kept.
    fn request_url(&self, source: SourceKind, url: &Url) -> Url {
        match self.mirrors.get(&source) {
            Some(mirror) => {
                let mut target = mirror.clone();
                target.set_path(url.path());
                target.set_query(url.query());
                target
            }
            None => url.clone(),
        }
    }
}
