//! Headless customer-support inbox with a simulated AI assistant panel.
//!
//! The [`inbox`] module mounts a view that owns the conversation thread, the
//! agent's composer and the assistant session, and drives every timer the
//! view needs. Rendering is left to whoever consumes [`inbox::InboxSnapshot`]
//! and [`inbox::InboxEvent`].

pub mod config;
pub mod error;
pub mod inbox;
pub mod keymap;
pub mod repl;
pub mod services;
pub mod state;

pub use config::InboxConfig;
pub use error::{ErrorCode, InboxError};
pub use inbox::{InboxDeps, InboxEvent, InboxHandle, InboxSnapshot, spawn_inbox, spawn_inbox_from_env};
