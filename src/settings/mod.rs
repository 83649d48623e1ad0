//! Password generation settings.

pub mod query;

pub use query::{DecodeDiagnostic, Decoded, QueryKeys};

/// Shortest password the generator accepts.
pub const MIN_LENGTH: usize = 1;
/// Longest password the generator accepts.
pub const MAX_LENGTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub length: usize,
    pub exclude_lowercase: bool,
    pub exclude_uppercase: bool,
    pub exclude_numbers: bool,
    pub exclude_symbols: bool,
    /// Individual characters that must never appear, as literal text.
    pub excluded_chars: String,
    /// First character must be a letter, never a digit or symbol.
    pub rule_no_leading_special: bool,
}

impl Settings {
    pub const DEFAULT: Settings = Settings {
        length: 20,
        exclude_lowercase: false,
        exclude_uppercase: false,
        exclude_numbers: false,
        exclude_symbols: false,
        excluded_chars: String::new(),
        rule_no_leading_special: false,
    };

    pub fn length_in_range(length: usize) -> bool {
        (MIN_LENGTH..=MAX_LENGTH).contains(&length)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
