//! Authentication types for the request boundary.
//!
//! Credentials are checked for presence and shape only. No signature or
//! expiry verification happens here; the token is carried as an opaque value.

use serde::Serialize;

use crate::error::AppError;

/// A bearer credential taken from an `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerCredential(String);

impl BearerCredential {
    /// Parses an `Authorization` header value of the form `Bearer <token>`.
    ///
    /// The scheme is matched case-insensitively. The token must be non-empty
    /// and must not contain whitespace.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` when the header is missing the scheme,
    /// uses another scheme, or carries an empty or malformed token.
    pub fn parse(header: &str) -> Result<Self, AppError> {
        let (scheme, token) = header
            .trim()
            .split_once(' ')
            .ok_or_else(|| AppError::Unauthorized("malformed authorization header".into()))?;

        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AppError::Unauthorized(format!(
                "unsupported authorization scheme: {scheme}"
            )));
        }

        let token = token.trim();
        if token.is_empty() || token.chars().any(char::is_whitespace) {
            return Err(AppError::Unauthorized("malformed bearer token".into()));
        }

        Ok(Self(token.to_string()))
    }

    /// Returns the raw token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }
}

/// The authenticated caller of a request.
///
/// Identity is the unverified token itself; it exists so handlers and logs
/// can refer to "who asked" without touching headers.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    /// Short fingerprint of the token, safe to log.
    pub fingerprint: String,
}

impl Principal {
    /// Builds a principal from a parsed credential.
    #[must_use]
    pub fn from_credential(credential: &BearerCredential) -> Self {
        let fingerprint: String = credential.token().chars().take(6).collect();
        Self {
            fingerprint: format!("{fingerprint}…"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc.def.ghi", "abc.def.ghi")]
    #[case("bearer token123", "token123")]
    #[case("BEARER   spaced ", "spaced")]
    fn test_parse_accepts_bearer(#[case] header: &str, #[case] expected: &str) {
        let credential = BearerCredential::parse(header).unwrap();
        assert_eq!(credential.token(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("Bearer")]
    #[case("Bearer ")]
    #[case("Basic dXNlcjpwYXNz")]
    #[case("Bearer two tokens")]
    #[case("token-without-scheme")]
    fn test_parse_rejects_malformed(#[case] header: &str) {
        let err = BearerCredential::parse(header).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_principal_fingerprint_truncates_token() {
        let credential = BearerCredential::parse("Bearer 0123456789").unwrap();
        let principal = Principal::from_credential(&credential);
        assert_eq!(principal.fingerprint, "012345…");
    }
}
