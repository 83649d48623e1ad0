//! Password generation.

pub mod charset;
mod error;
mod generate;

pub use error::GenerateError;
pub use generate::{generate, generate_with, shuffled};
