//! Domain models for the version refresh
//!
//! Contains the version computation without any I/O concerns.

mod version;

pub use version::VersionStamp;
