//! Refresh Package Version - stamps the Mile.HyperV NuGet manifest
//!
//! The package version is `1.0.{days}.0{tag}`, where `days` counts calendar
//! days since 2023-09-21. The tool finds the enclosing git repository, writes
//! that version into `Mile.HyperV.NuGet/Mile.HyperV.nuspec`, and leaves the
//! rest of the file untouched.

pub mod cli;
pub mod config;
pub mod domain;
pub mod storage;

pub use domain::VersionStamp;
pub use storage::{Manifest, Repository};
