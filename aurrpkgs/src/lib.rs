pub mod aur;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod reporter;
pub mod upstream;

// Re-export core types for convenience
pub use aurrpkgs_core::{
    Package, PackageReport, PackageStatus, SourceKind, StatusRenderer, UpdateResolver,
    UpstreamRelease, Version, VersionError,
};
