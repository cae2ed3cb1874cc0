//! Error taxonomy for the inbox view.
//!
//! DESIGN
//! ======
//! Each concern owns a `thiserror` enum; `InboxError` is what callers of the
//! view handle and the bootstrap see. Responder failures never reach it:
//! the view records them on the assistant session instead. Empty or
//! whitespace-only input is never an error: those submissions are guard
//! clauses that silently do nothing.

use crate::config::ConfigError;

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag for surfaced errors.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// INBOX ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum InboxError {
    /// The view has been torn down; no further commands are accepted.
    #[error("inbox view is closed")]
    Closed,
    /// The environment did not yield a usable configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl ErrorCode for InboxError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Closed => "E_INBOX_CLOSED",
            Self::Config(e) => e.error_code(),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
