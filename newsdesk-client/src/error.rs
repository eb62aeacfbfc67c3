//! Error taxonomy surfaced to views and commands.

use thiserror::Error;

/// Failures raised by a [`CredentialStore`](crate::store::CredentialStore) backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend is not usable at all, e.g. `localStorage` is missing or full.
    #[error("credential storage is unavailable: {0}")]
    Unavailable(String),
    /// Reading or writing the credential file failed.
    #[error("failed to access credential file: {0}")]
    Io(String),
    /// Stored data could not be parsed.
    #[error("credential file is corrupt: {0}")]
    Corrupt(String),
}

/// Every way a session or API operation can fail.
///
/// Nothing in this crate retries; each variant is terminal for the call that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Login was refused; carries the server message or a generic fallback.
    #[error("{0}")]
    Authentication(String),

    /// Registration was refused.
    #[error("{0}")]
    Registration(String),

    /// The backend answered 401 or 403. The session has already been cleared.
    #[error("Session expired. Please login again.")]
    SessionExpired,

    /// Any other non-2xx status.
    #[error("{message} (HTTP {status})")]
    Request {
        /// HTTP status code.
        status: u16,
        /// The body's `message`, or a generic fallback.
        message: String,
    },

    /// A 2xx response whose envelope reported `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The body was not valid JSON or did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),

    /// Input rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The view that started the request went away.
    #[error("request cancelled")]
    Cancelled,

    /// The credential store could not be written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Headers or multipart parts that could not be encoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Whether the caller should send the user back to the login view.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    pub(crate) fn transport(err: &reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }

    pub(crate) fn malformed(err: impl std::fmt::Display) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
