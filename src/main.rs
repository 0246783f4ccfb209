//! CLI entry point for lumenr.
//!
//! Parses arguments and dispatches to the command implementations in the
//! library. All application logic lives in the library crate so it stays
//! testable.

use lumenr::args::ParsedArgs;
use lumenr::commands;
use lumenr::{log_end, log_error, log_pipe};

fn main() {
    let parsed = ParsedArgs::from_env();

    if let Err(error) = commands::dispatch(parsed.action) {
        if lumenr::logger::Log::is_enabled() {
            log_pipe!();
            log_error!("{error:#}");
            log_end!();
        } else {
            // JSON mode keeps the logger quiet; report on stderr instead
            eprintln!("Error: {error:#}");
        }
        std::process::exit(1);
    }
}
