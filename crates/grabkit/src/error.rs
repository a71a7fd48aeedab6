#![forbid(unsafe_code)]

//! Application-level error type.
//!
//! Sessions never fail on bad input: precondition rejections come back as
//! [`IgnoredReason`](grabkit_session::IgnoredReason) values. What can fail is
//! building a configuration and the host's own surface operations, and
//! [`Error`] folds both together.

use grabkit_runtime::ConfigError;
use grabkit_session::SurfaceError;

/// Top-level error type for grabkit hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or unreadable interaction configuration.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    /// A surface collaborator failed.
    #[error("surface: {0}")]
    Surface(#[from] SurfaceError),
}

impl Error {
    /// Whether the error came from configuration loading or validation.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Standard result type for grabkit APIs.
pub type Result<T> = std::result::Result<T, Error>;
