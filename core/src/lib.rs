pub mod output;
pub mod resolver;
pub mod types;
pub mod version;

// Re-export commonly used types at crate root
pub use output::StatusRenderer;
pub use resolver::UpdateResolver;
pub use types::{Package, PackageReport, PackageStatus, SourceKind, UpstreamRelease, R_PACKAGE_PREFIX};
pub use version::{Segment, Version, VersionError};
