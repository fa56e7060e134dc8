//! cmedit - edit content manager resources from the terminal
//!
//! The library half holds everything that does not touch the terminal:
//! the HTTP client, the form model with its load/save rules, and the
//! persisted configuration.

pub mod cms;
pub mod config;
pub mod editor;
pub mod error;

pub use error::EditorError;
