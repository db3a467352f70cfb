//! Build-time configuration
//!
//! Nothing here is read at runtime: the target manifest, the epoch and the
//! version tag are fixed when the binary is compiled.

use chrono::NaiveDate;

/// Directory entry that marks a repository root
pub const REPOSITORY_MARKER: &str = ".git";

/// Manifest location, relative to the repository root
pub const MANIFEST_RELATIVE_PATH: [&str; 2] = ["Mile.HyperV.NuGet", "Mile.HyperV.nuspec"];

/// Pre-release suffix appended to the version
#[cfg(feature = "preview")]
pub const VERSION_TAG: &str = "-preview";

/// Pre-release suffix appended to the version
#[cfg(not(feature = "preview"))]
pub const VERSION_TAG: &str = "";

/// Message printed once the manifest has been written
pub const COMPLETION_MESSAGE: &str = "Mile.HyperV.RefreshPackageVersion task has been completed.";

/// Date from which version day counts are measured
pub const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2023, 9, 21) {
    Some(date) => date,
    None => panic!("epoch is not a valid calendar date"),
};
