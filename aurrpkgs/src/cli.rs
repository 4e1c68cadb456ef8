use crate::config::{ClientConfig, DEFAULT_AUR_URL};
use aurrpkgs_core::SourceKind;
use clap::Parser;
use std::time::Duration;
use url::Url;

/// Check AUR R packages of a maintainer for newer upstream releases
#[derive(Parser, Debug, Clone)]
#[command(name = "aurrpkgs")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// AUR username(s) whose R packages should be checked
    #[arg(value_name = "USERNAME", required = true, value_parser = parse_username)]
    pub usernames: Vec<String>,

    /// Only print outdated packages and errors
    #[arg(short, long)]
    pub outdated_only: bool,

    /// AUR RPC endpoint
    #[arg(long, value_name = "URL", default_value = DEFAULT_AUR_URL)]
    pub aur_url: Url,

    /// Fetch CRAN package pages from this mirror instead (only its scheme, host and port are used)
    #[arg(long, value_name = "URL")]
    pub cran_mirror: Option<Url>,

    /// Fetch Bioconductor package pages from this mirror instead (only its scheme, host and port are used)
    #[arg(long, value_name = "URL")]
    pub bioc_mirror: Option<Url>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Network settings shared by the AUR and upstream clients
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig {
            aur_url: self.aur_url.to_string(),
            timeout: Duration::from_secs(self.timeout),
            ..ClientConfig::default()
        };

        if let Some(mirror) = &self.cran_mirror {
            config.mirrors.insert(SourceKind::Cran, mirror.clone());
        }
        if let Some(mirror) = &self.bioc_mirror {
            config.mirrors.insert(SourceKind::Bioconductor, mirror.clone());
        }

        config
    }
}

fn parse_username(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("username must not be empty".to_string());
    }
    Ok(trimmed.to_string())
}
