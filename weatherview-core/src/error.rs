use thiserror::Error;

/// Failure of a single current-conditions lookup.
///
/// Every variant is surfaced to the user the same way: a transient banner
/// carrying [`ApiError::message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The provider answered with an error payload (e.g. 404 "city not found").
    #[error("{message}")]
    Lookup { status: u16, message: String },

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Transport(String),

    /// The provider answered 2xx but the body had an unexpected shape.
    #[error("unexpected response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// User-displayable message.
    pub fn message(&self) -> String {
        match self {
            ApiError::Lookup { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
