// ── Core error types ──
//
// User-facing errors from stockly-core. Consumers never see reqwest or
// serde failures directly -- the `From<stockly_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The request never reached the server or the connection dropped.
    #[error("Cannot reach inventory service: {reason}")]
    Network { reason: String },

    /// The service answered with a non-2xx status. The message is the
    /// server's own when it sent one.
    #[error("{message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    /// A 2xx response whose body did not match the wire contract.
    #[error("Unexpected response from inventory service: {message}")]
    MalformedResponse { message: String },

    /// Client-side configuration problem (bad URL etc.).
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<stockly_api::Error> for CoreError {
    fn from(err: stockly_api::Error) -> Self {
        match err {
            stockly_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_timeout() {
                    CoreError::Network {
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            stockly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            stockly_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            stockly_api::Error::Deserialization { message, .. } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}
