//! Errors raised by the outer surfaces of the portrait overlay.
//!
//! Only configuration loading and plugin command parsing can fail. The
//! resolver, the director and the motion engine are total and never return
//! an error: a missing picture is a normal outcome, not a fault.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortraitError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to load config file: {0}")]
    Config(String),

    #[error("unknown victory actor policy '{0}'")]
    InvalidVictoryPolicy(String),

    #[error("invalid boolean literal '{0}' (expected 'true' or 'false')")]
    InvalidBool(String),

    #[error("unknown portrait command '{0}'")]
    UnknownCommand(String),
}
