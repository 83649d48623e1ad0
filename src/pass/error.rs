use crate::settings::{MAX_LENGTH, MIN_LENGTH};

/// Why a single generation attempt failed. None of these are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error(
        "invalid length {0}: must be between {min} and {max}",
        min = MIN_LENGTH,
        max = MAX_LENGTH
    )]
    InvalidLength(usize),
    #[error("all character types excluded or all characters excluded")]
    NoCharactersAvailable,
    #[error("length {length} is too short to include all {required} required character types")]
    LengthTooShortForRequiredClasses { length: usize, required: usize },
    #[error("cannot satisfy the no-leading-special rule without any letters available")]
    CannotSatisfyLeadingRule,
}
