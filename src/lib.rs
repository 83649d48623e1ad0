//! Constrained password generation with shareable settings.
//!
//! [`pass`] turns a [`Settings`] value into a password that honors the
//! character-class and positional rules. [`settings::query`] maps the same
//! settings to and from a compact URL query string so a configuration can be
//! bookmarked or shared. The two halves never call each other.

pub mod pass;
pub mod settings;

pub use pass::{GenerateError, generate, generate_with};
pub use settings::Settings;
