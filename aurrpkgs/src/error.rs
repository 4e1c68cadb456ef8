use aurrpkgs_core::VersionError;
use thiserror::Error;

/// Failures of the maintainer lookup. These abort the run for that user.
#[derive(Debug, Error)]
pub enum AurError {
    #[error("network error while querying the AUR: {0}")]
    Network(#[from] reqwest::Error),

    #[error("AUR server returned {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid AUR response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("AUR API error: {0}")]
    Api(String),
}

/// Failures of a single package check. Reported, then skipped.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("no upstream URL declared")]
    MissingUrl,

    #[error("upstream {0} is not supported")]
    UnsupportedSource(String),

    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("version not found: {0}")]
    VersionNotFound(String),

    #[error(transparent)]
    MalformedVersion(#[from] VersionError),
}
