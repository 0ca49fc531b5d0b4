//! Session provider implementations

pub mod file;

pub use file::{FileSessionProvider, event_slug};
