//! ISY994 adapter error types.

use minihub_domain::error::MiniHubError;

/// Errors specific to the ISY994 adapter.
#[derive(Debug, thiserror::Error)]
pub enum IsyError {
    /// Setup was attempted without a live controller connection.
    #[error("a connection has not been made to the ISY controller")]
    NotConnected,

    /// A domain-level error (validation, not-found, etc.).
    #[error("domain error")]
    Domain(#[from] MiniHubError),
}

impl From<IsyError> for MiniHubError {
    fn from(err: IsyError) -> Self {
        match err {
            IsyError::Domain(err) => err,
            other => MiniHubError::Integration(Box::new(other)),
        }
    }
}
