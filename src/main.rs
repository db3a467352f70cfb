//! Refreshes the Mile.HyperV NuGet package version

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = refresh_package_version::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
