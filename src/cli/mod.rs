mod context;
mod flags;
mod parse;
pub mod prompts;
pub mod quiet;

use std::process::ExitCode;

pub use context::{Context, Exit};
pub use flags::CliFlags;
pub use parse::{ParseError, parse};

/// Run a non-interactive or interactive CLI session from raw arguments.
pub fn run(args: Vec<String>) -> ExitCode {
    let mut ctx = match Context::new(args) {
        Ok(ctx) => ctx,
        Err(e) => {
            prompts::error(&e.to_string());
            prompts::error("Try `sharepass --help` for usage.");
            return ExitCode::from(2);
        }
    };

    match ctx.run() {
        Ok(()) | Err(Exit::Done) => ExitCode::SUCCESS,
        Err(Exit::Failed) => ExitCode::FAILURE,
    }
}
