//! Session runner for the `deck-cache` DJ services.

pub mod session;
pub mod settings;

pub use session::{DjSession, SessionStats};
