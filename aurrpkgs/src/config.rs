use aurrpkgs_core::SourceKind;
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;
use url::Url;

pub const DEFAULT_AUR_URL: &str = "https://aur.archlinux.org/rpc/";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!(
    "aurrpkgs/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/folknor/aurrpkgs)"
);

/// Settings for the HTTP clients
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// AUR RPC endpoint
    pub aur_url: String,
    /// Base URLs replacing the canonical host of a source
    pub mirrors: HashMap<SourceKind, Url>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            aur_url: DEFAULT_AUR_URL.to_string(),
            mirrors: HashMap::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Build a reqwest client carrying our user agent and timeout
    pub fn http_client(&self) -> reqwest::Client {
        build_client(USER_AGENT, self.timeout)
    }
}

/// Falls back to reqwest's defaults (no user agent, no timeout) if the
/// builder rejects the settings
fn build_client(user_agent: &str, timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "failed to configure HTTP client, using defaults");
            reqwest::Client::new()
        })
}
