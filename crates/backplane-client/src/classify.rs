//! Failure classification for bearer-authenticated calls
//!
//! Backplane reports the token problem only in the free-text
//! `error_description`, so classification is a substring search over the raw
//! body, never a JSON field lookup. Matching is case-sensitive and ordered:
//! an expired token wins over an invalid one.

use tracing::warn;

use crate::error::Error;

const EXPIRED_TOKEN_PATTERN: &str = "expired token";
const INVALID_TOKEN_PATTERN: &str = "invalid token";

/// Turn an unexpected response into the matching error.
pub fn classify_failure(status: u16, body: &str) -> Error {
    let error = if body.contains(EXPIRED_TOKEN_PATTERN) {
        Error::ExpiredToken(body.to_owned())
    } else if body.contains(INVALID_TOKEN_PATTERN) {
        Error::InvalidToken(body.to_owned())
    } else {
        Error::Protocol {
            status,
            body: body.to_owned(),
        }
    };
    warn!(status, error = %error, "backplane request failed");
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{EXPIRED_TOKEN_BODY, INVALID_TOKEN_BODY};

    #[test]
    fn expired_token_description() {
        let err = classify_failure(403, EXPIRED_TOKEN_BODY);
        assert!(matches!(err, Error::ExpiredToken(ref b) if b == EXPIRED_TOKEN_BODY));
    }

    #[test]
    fn invalid_token_description() {
        let err = classify_failure(403, INVALID_TOKEN_BODY);
        assert!(matches!(err, Error::InvalidToken(ref b) if b == INVALID_TOKEN_BODY));
    }

    #[test]
    fn expired_wins_over_invalid() {
        let err = classify_failure(401, "invalid token or expired token");
        assert!(matches!(err, Error::ExpiredToken(_)), "got: {err:?}");
    }

    #[test]
    fn anything_else_is_protocol_error_with_raw_body() {
        let err = classify_failure(500, "random server error");
        match err {
            Error::Protocol { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "random server error");
            }
            other => panic!("expected Protocol, got {other:?}"),
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        let err = classify_failure(403, "Expired Token");
        assert!(matches!(err, Error::Protocol { .. }), "got: {err:?}");
    }

    #[test]
    fn empty_body_is_protocol_error() {
        assert!(matches!(classify_failure(502, ""), Error::Protocol { status: 502, .. }));
    }
}
