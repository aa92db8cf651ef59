//! Application shell around the `mathbasics` library.
//!
//! Loads the library through a [`LibraryRegistry`](mathbasics::LibraryRegistry)
//! at startup and turns user events into [`Message`]s.

pub mod config;
pub mod error;
pub mod shell;

pub use config::ShellConfig;
pub use error::ShellError;
pub use shell::{dispatch, Event, Icon, Message, Shell};
