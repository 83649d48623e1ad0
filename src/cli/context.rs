//! CLI context - bundles settings, flags, and clipboard state.

use std::env;
use std::io::Write;

use copypasta::{ClipboardContext, ClipboardProvider};
use sharepass::settings::query;
use sharepass::{Settings, pass};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::{CliFlags, ParseError, prompts, quiet};
use crate::tui;

/// Environment variable holding a share query used when `--query` is absent.
pub const QUERY_ENV: &str = "SHAREPASS_QUERY";

/// How a CLI run stopped short of the normal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Early exit - not an error, just done.
    Done,
    /// Generation failed; the reason has already been printed.
    Failed,
}

/// Application context for CLI mode.
pub struct Context {
    pub settings: Settings,
    pub flags: CliFlags,
    clipboard: Option<ClipboardContext>,
}

impl Context {
    /// Create a new context by parsing command-line arguments.
    pub fn new(args: Vec<String>) -> Result<Self, ParseError> {
        let flags = super::parse(&args)?;
        quiet::set(flags.quiet);

        let settings = initial_settings(&flags, env::var(QUERY_ENV).ok());

        Ok(Self {
            settings,
            flags,
            clipboard: None,
        })
    }

    /// Run CLI. Returns `Err(Exit::Done)` for early exits, `Ok(())` on completion.
    pub fn run(&mut self) -> Result<(), Exit> {
        self.handle_info_flags()?;
        self.handle_interactive()?;
        self.handle_clipboard()?;
        self.generate_output()?;
        if self.flags.share {
            prompts::share_query(&self.share_query());
        }
        Ok(())
    }

    /// Query string that reproduces the effective settings.
    pub fn share_query(&self) -> String {
        query::to_query_string(&query::encode(&self.settings))
    }

    fn handle_info_flags(&self) -> Result<(), Exit> {
        if self.flags.help {
            tui::print_help();
            return Err(Exit::Done);
        }
        if self.flags.version {
            println!("sharepass {}", env!("CARGO_PKG_VERSION"));
            return Err(Exit::Done);
        }
        Ok(())
    }

    fn handle_interactive(&self) -> Result<(), Exit> {
        if !self.flags.interactive {
            return Ok(());
        }
        if !quiet::is_interactive() {
            prompts::warn("Warning: stdin is not a terminal, ignoring --interactive");
            return Ok(());
        }
        match tui::run(&self.settings) {
            Ok(()) => Err(Exit::Done),
            Err(e) => {
                prompts::error(&format!("Error: {e}"));
                Err(Exit::Failed)
            }
        }
    }

    fn handle_clipboard(&mut self) -> Result<(), Exit> {
        if !self.flags.clipboard {
            return Ok(());
        }
        match ClipboardContext::new() {
            Ok(ctx) => self.clipboard = Some(ctx),
            Err(e) => {
                warn!(error = %e, "clipboard unavailable");
                if !prompts::clipboard_fallback_prompt() {
                    return Err(Exit::Done);
                }
            }
        }
        Ok(())
    }

    /// Generate passwords and hand them to the clipboard or stdout.
    /// Nothing is written if any generation attempt fails.
    pub fn generate_output(&mut self) -> Result<(), Exit> {
        let count = self.flags.number.unwrap_or(1).max(1);
        let mut passwords = Zeroizing::new(String::new());

        for _ in 0..count {
            let password = pass::generate(&self.settings).map(Zeroizing::new).map_err(|e| {
                prompts::error(&format!("Error: {e}"));
                Exit::Failed
            })?;
            passwords.push_str(&password);
            passwords.push('\n');
        }
        debug!(count, "generated passwords");

        match self.clipboard.as_mut() {
            Some(ctx) => copy_to_clipboard(ctx, &passwords, count),
            None => {
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                let _ = out.write_all(passwords.as_bytes());
                let _ = out.flush();
                Ok(())
            }
        }
    }
}

/// Hand newline-separated passwords to the clipboard. A failed write is a
/// failed run: the passwords were never delivered anywhere.
fn copy_to_clipboard(
    ctx: &mut impl ClipboardProvider,
    passwords: &str,
    count: usize,
) -> Result<(), Exit> {
    match ctx.set_contents(passwords.trim_end().to_string()) {
        Ok(()) => {
            if let Ok(retrieved) = ctx.get_contents() {
                drop(Zeroizing::new(retrieved));
            }
            prompts::clipboard_copied(count);
            Ok(())
        }
        Err(e) => {
            prompts::clipboard_error(&e.to_string());
            Err(Exit::Failed)
        }
    }
}

/// Starting settings: `--query` beats the environment, which beats the
/// defaults. Flags are layered on top. Undecodable fields are reported.
fn initial_settings(flags: &CliFlags, env_query: Option<String>) -> Settings {
    let mut settings = match flags.query.clone().or(env_query) {
        Some(raw) => {
            let decoded = query::decode(&query::parse_query_string(&raw));
            for diagnostic in &decoded.diagnostics {
                prompts::warn(&format!("Warning: {diagnostic}"));
            }
            decoded.settings
        }
        None => Settings::default(),
    };
    flags.apply(&mut settings);
    debug!(?settings, "effective settings");
    settings
}
