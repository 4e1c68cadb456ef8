//! AUR RPC client listing a maintainer's R packages.

use crate::config::ClientConfig;
use crate::error::AurError;
use aurrpkgs_core::Package;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

const API_VERSION: &str = "5";

/// AUR RPC response envelope
#[derive(Debug, Deserialize)]
struct AurResponse {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(rename = "resultcount", default)]
    result_count: usize,
    #[serde(default)]
    results: Vec<AurPackage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AurPackage {
    name: String,
    version: String,
    #[serde(rename = "URL")]
    url: Option<String>,
}

impl From<AurPackage> for Package {
    fn from(pkg: AurPackage) -> Self {
        Package {
            name: pkg.name,
            version: pkg.version,
            url: pkg.url.filter(|u| !u.trim().is_empty()),
        }
    }
}

/// Client for the AUR RPC interface
#[derive(Clone)]
pub struct AurClient {
    client: reqwest::Client,
    base_url: String,
}

impl AurClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: config.http_client(),
            base_url: config.aur_url.clone(),
        }
    }

    /// List the R packages maintained by `username`, in the order the AUR
    /// returns them.
    ///
    /// A user without any (R) packages yields an empty list.
    pub async fn r_packages(&self, username: &str) -> Result<Vec<Package>, AurError> {
        let url = Url::parse_with_params(
            &self.base_url,
            [
                ("v", API_VERSION),
                ("type", "search"),
                ("by", "maintainer"),
                ("arg", username),
            ],
        )
        .map_err(|e| AurError::Api(format!("invalid endpoint '{}': {e}", self.base_url)))?;

        debug!(%url, "querying AUR");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AurError::Status(status));
        }

        let body = response.text().await?;
        let data: AurResponse = serde_json::from_str(&body)?;

        if data.kind == "error" {
            return Err(AurError::Api(
                data.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        if data.kind != "search" {
            return Err(AurError::Api(format!("response type '{}' is invalid", data.kind)));
        }

        if data.result_count == 0 {
            info!(username, "user has no packages in the AUR");
            return Ok(Vec::new());
        }

        let packages: Vec<Package> = data
            .results
            .into_iter()
            .map(Package::from)
            .filter(Package::is_r_package)
            .collect();

        info!(
            username,
            total = data.result_count,
            r_packages = packages.len(),
            "fetched maintainer packages"
        );

        Ok(packages)
    }
}
