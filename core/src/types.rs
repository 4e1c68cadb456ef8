use crate::version::Version;
use std::fmt;

/// Prefix shared by every AUR package wrapping an R package
pub const R_PACKAGE_PREFIX: &str = "r-";

/// An AUR package as listed for a maintainer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// AUR package name, e.g. `r-ggplot2`
    pub name: String,
    /// Full Arch version as recorded in the AUR, e.g. `3.4.4-1`
    pub version: String,
    /// Upstream project URL declared in the PKGBUILD
    pub url: Option<String>,
}

impl Package {
    /// Whether this is a release build of an R package (VCS builds are skipped)
    pub fn is_r_package(&self) -> bool {
        self.name.starts_with(R_PACKAGE_PREFIX) && !self.name.ends_with("-git")
    }
}

/// Upstream registry an R package is published in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Cran,
    Bioconductor,
}

impl SourceKind {
    pub const ALL: [SourceKind; 2] = [SourceKind::Cran, SourceKind::Bioconductor];

    /// Host serving the package pages
    pub fn host(self) -> &'static str {
        match self {
            SourceKind::Cran => "cran.r-project.org",
            SourceKind::Bioconductor => "bioconductor.org",
        }
    }

    /// Find the source served from `host` (case-insensitive)
    pub fn from_host(host: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.host().eq_ignore_ascii_case(host))
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Cran => write!(f, "CRAN"),
            SourceKind::Bioconductor => write!(f, "Bioconductor"),
        }
    }
}

/// Latest version published upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRelease {
    pub source: SourceKind,
    /// Version string exactly as the registry shows it
    pub version: String,
}

/// Outcome of checking one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageStatus {
    UpToDate {
        upstream: Version,
    },
    Outdated {
        aur: Version,
        upstream: Version,
        source: SourceKind,
    },
    Failed(String),
}

impl PackageStatus {
    pub fn is_outdated(&self) -> bool {
        matches!(self, PackageStatus::Outdated { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PackageStatus::Failed(_))
    }
}

/// A package name paired with its check outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    pub name: String,
    pub status: PackageStatus,
}

impl PackageReport {
    pub fn new(name: impl Into<String>, status: PackageStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}
