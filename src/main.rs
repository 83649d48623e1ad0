use std::env;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

mod cli;
mod exits;
mod terminal;
mod tui;

fn main() -> ExitCode {
    exits::install_handlers();
    exits::harden_process();
    init_tracing();

    let args: Vec<String> = env::args().collect();
    cli::run(args)
}

/// Query decode warnings are shown by the CLI's own prompts and stay quiet here.
const DEFAULT_FILTER: &str = "warn,sharepass::settings::query=error";

/// Diagnostics go to stderr so they never mix with generated passwords.
/// Verbosity comes from `RUST_LOG` and defaults to warnings only.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}
