//! Character classes and pool building for password generation.

use crate::settings::Settings;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+~`|}{[]:;?><,./-=\\";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
}

impl CharClass {
    /// Canonical order in which classes seed required characters.
    pub const ALL: [CharClass; 4] = [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digit,
        CharClass::Symbol,
    ];

    pub fn chars(self) -> &'static str {
        match self {
            CharClass::Lowercase => LOWERCASE,
            CharClass::Uppercase => UPPERCASE,
            CharClass::Digit => DIGITS,
            CharClass::Symbol => SYMBOLS,
        }
    }

    /// Class of `c`, or `None` for characters outside every pool.
    pub fn of(c: char) -> Option<CharClass> {
        Self::ALL.into_iter().find(|class| class.chars().contains(c))
    }

    pub fn is_letter(self) -> bool {
        matches!(self, CharClass::Lowercase | CharClass::Uppercase)
    }

    fn excluded_by(self, settings: &Settings) -> bool {
        match self {
            CharClass::Lowercase => settings.exclude_lowercase,
            CharClass::Uppercase => settings.exclude_uppercase,
            CharClass::Digit => settings.exclude_numbers,
            CharClass::Symbol => settings.exclude_symbols,
        }
    }
}

/// One class pool after removing excluded characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pub class: CharClass,
    pub chars: Vec<char>,
}

/// Active pools in canonical order. A class is active when its flag does not
/// exclude it and at least one of its characters survives `excluded_chars`.
pub fn build(settings: &Settings) -> Vec<Pool> {
    CharClass::ALL
        .into_iter()
        .filter(|class| !class.excluded_by(settings))
        .map(|class| Pool {
            class,
            chars: class
                .chars()
                .chars()
                .filter(|c| !settings.excluded_chars.contains(*c))
                .collect(),
        })
        .filter(|pool| !pool.chars.is_empty())
        .collect()
}

/// Every character the active pools can produce.
pub fn combined(pools: &[Pool]) -> Vec<char> {
    pools.iter().flat_map(|pool| pool.chars.iter().copied()).collect()
}
