//! vehicle-catalog entry point
//!
//! Delegates everything to the CLI module and exits non-zero on failure.

use vehicle_catalog::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
