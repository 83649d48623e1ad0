//! Interactive generation session: regenerate, copy, and a short history.

use std::collections::VecDeque;
use std::mem;

use copypasta::{ClipboardContext, ClipboardProvider};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sharepass::settings::query;
use sharepass::{GenerateError, Settings, pass};
use tracing::debug;
use zeroize::Zeroizing;

use super::print_session;
use crate::terminal::{clear, read_key, reset_terminal};

/// Passwords kept in the history panel, newest first.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Regenerate,
    Copy,
    Quit,
    Ignore,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Self {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => Action::Quit,
            KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char(' ') => Action::Regenerate,
            KeyCode::Char('c') => Action::Copy,
            _ => Action::Ignore,
        }
    }
}

/// Outcome of the last copy, shown under the session box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Copied,
    Failed(String),
}

pub struct Session<'a> {
    settings: &'a Settings,
    current: Zeroizing<String>,
    history: VecDeque<Zeroizing<String>>,
    clipboard: Option<ClipboardContext>,
    status: Option<Status>,
}

impl<'a> Session<'a> {
    /// Start a session with a first password. Fails if the settings cannot
    /// produce one, so an unusable session never opens.
    pub fn new(settings: &'a Settings) -> Result<Self, GenerateError> {
        Ok(Self {
            settings,
            current: Zeroizing::new(pass::generate(settings)?),
            history: VecDeque::with_capacity(HISTORY_LIMIT),
            clipboard: None,
            status: None,
        })
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(|p| p.as_str())
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn share_query(&self) -> String {
        query::to_query_string(&query::encode(self.settings))
    }

    /// Replace the current password, pushing the old one into history.
    pub fn regenerate(&mut self) -> Result<(), GenerateError> {
        let next = Zeroizing::new(pass::generate(self.settings)?);
        let previous = mem::replace(&mut self.current, next);
        self.history.push_front(previous);
        self.history.truncate(HISTORY_LIMIT);
        self.status = None;
        Ok(())
    }

    pub fn copy(&mut self) {
        if self.clipboard.is_none() {
            self.clipboard = ClipboardContext::new().ok();
        }
        self.status = Some(match self.clipboard.as_mut() {
            Some(ctx) => match ctx.set_contents(self.current.to_string()) {
                Ok(()) => Status::Copied,
                Err(e) => Status::Failed(format!("Clipboard error: {e}")),
            },
            None => Status::Failed("Clipboard unavailable".to_string()),
        });
    }

    fn draw(&self) {
        clear();
        print_session(self);
    }
}

/// Run the interactive loop until the user quits.
pub fn run(settings: &Settings) -> Result<(), GenerateError> {
    let mut session = Session::new(settings)?;

    loop {
        session.draw();
        let key = match read_key() {
            Ok(key) => key,
            Err(e) => {
                debug!(error = %e, "terminal input unavailable");
                break;
            }
        };
        match Action::from_key(key) {
            Action::Regenerate => session.regenerate()?,
            Action::Copy => session.copy(),
            Action::Quit => break,
            Action::Ignore => {}
        }
    }

    clear();
    reset_terminal();
    Ok(())
}
