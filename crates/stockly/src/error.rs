//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and distinct exit codes.

use miette::Diagnostic;
use thiserror::Error;

use stockly_core::CoreError;

/// Exit codes for scripting.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the inventory service")]
    #[diagnostic(
        code(stockly::connection_failed),
        help(
            "Check that the service is running and --server points at it.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Inventory service rejected the request: {message}")]
    #[diagnostic(code(stockly::api_error))]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("Could not load products: {message}")]
    #[diagnostic(
        code(stockly::fetch_failed),
        help("Re-run the command to retry; nothing is retried automatically.")
    )]
    Fetch { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid configuration: {reason}")]
    #[diagnostic(
        code(stockly::config),
        help("See `stockly --help` for flags, or edit the config file.")
    )]
    Config { reason: String },

    #[error("invalid {field}: {reason}")]
    #[diagnostic(code(stockly::validation))]
    Validation { field: String, reason: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    #[diagnostic(code(stockly::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Api {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            Self::Config { .. } | Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Network { reason } => Self::ConnectionFailed { reason },
            CoreError::Api { message, status } => Self::Api { message, status },
            CoreError::MalformedResponse { message } => Self::Api {
                message,
                status: None,
            },
            CoreError::Config { message } => Self::Config { reason: message },
        }
    }
}

impl From<stockly_config::ConfigError> for CliError {
    fn from(err: stockly_config::ConfigError) -> Self {
        Self::Config {
            reason: err.to_string(),
        }
    }
}
