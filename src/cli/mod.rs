//! # Command-Line Interface
//!
//! The tool takes no arguments: it finds the repository root, stamps the
//! NuGet manifest with today's version, and prints a completion message.
//!
//! ## Output Formats
//!
//! `--format` selects how the completion message is printed:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON, followed by the stamp outcome
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! refresh-package-version --verbose
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and refresh the manifest.

mod app;
mod output;

pub use app::{refresh, run, Cli};
pub use output::{Output, OutputFormat};
