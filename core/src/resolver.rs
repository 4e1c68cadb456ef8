use crate::types::{Package, PackageStatus, UpstreamRelease};
use crate::version::{Version, VersionError};
use std::str::FromStr;

/// Decides whether an AUR package lags behind its upstream release
#[derive(Debug, Default, Clone, Copy)]
pub struct UpdateResolver;

impl UpdateResolver {
    pub fn new() -> Self {
        Self
    }

    /// Compare the AUR version of `package` against `release`.
    ///
    /// An AUR version ahead of upstream is reported as up to date.
    pub fn resolve(
        &self,
        package: &Package,
        release: &UpstreamRelease,
    ) -> Result<PackageStatus, VersionError> {
        let aur = Version::from_pkgver(&package.version)?;
        let upstream = Version::from_str(&release.version)?;

        if aur < upstream {
            Ok(PackageStatus::Outdated {
                aur,
                upstream,
                source: release.source,
            })
        } else {
            Ok(PackageStatus::UpToDate { upstream })
        }
    }
}
