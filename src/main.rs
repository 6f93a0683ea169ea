//! Flagstack demo
//!
//! Resolves a handful of options from the command line, `FLAGSTACK_*`
//! environment variables and an optional config file, then logs them.

use flagstack::flag::{FlagSet, Outcome, settings};
use std::process::ExitCode;

mod app;

use app::{ENV_PREFIX, Options, exit_code, print_error_hint, set_verbose, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let filter = setup_tracing();

    let mut fs = FlagSet::new();
    let options = match Options::register(&mut fs) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Definition error: {e}");
            return exit_code::RESOLUTION_ERROR;
        }
    };

    let sources = [settings::env_prefix(ENV_PREFIX), settings::file(&options.config)];
    match fs.parse(std::env::args().skip(1), sources) {
        Ok(Outcome::HelpShown) => return exit_code::SUCCESS,
        Ok(Outcome::Resolved) => {}
        Err(e) => {
            eprintln!("Error: {e}");
            print_error_hint(&e);
            return exit_code::RESOLUTION_ERROR;
        }
    }

    set_verbose(&filter, options.debug.get());
    tracing::info!("{options}");

    exit_code::SUCCESS
}
