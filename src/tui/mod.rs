//! Interactive session and help screens.

mod session;
mod text;

pub use session::*;
pub use text::*;
