//! Error types for Backplane protocol operations

/// Errors from Backplane protocol operations.
///
/// `ExpiredToken`, `InvalidToken` and `Protocol` carry the raw response body
/// exactly as the server sent it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("access token has expired")]
    ExpiredToken(String),

    #[error("access token is invalid: {0}")]
    InvalidToken(String),

    #[error("backplane returned {status}: {body}")]
    Protocol { status: u16, body: String },

    #[error(transparent)]
    Http(#[from] transport::Error),

    #[error(transparent)]
    Config(#[from] common::Error),

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("no access token, call initialize_access_token first")]
    MissingAccessToken,

    #[error("scope has no channel grant: {0:?}")]
    MissingChannel(String),
}

impl Error {
    /// True for failures that a token refresh or re-initialization can fix.
    pub fn is_token_error(&self) -> bool {
        matches!(self, Error::ExpiredToken(_) | Error::InvalidToken(_))
    }

    /// Raw server body for classified failures.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::ExpiredToken(body) | Error::InvalidToken(body) | Error::Protocol { body, .. } => {
                Some(body.as_str())
            }
            _ => None,
        }
    }
}

/// Result alias for Backplane operations.
pub type Result<T> = std::result::Result<T, Error>;
