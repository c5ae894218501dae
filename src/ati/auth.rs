//! Credential parsing and wire placement for AT Internet authentication.
//!
//! The API accepts two schemes: HTTP Basic (a base64 `email:password` value
//! sent in the `authorization` header) and an API key (sent as the `apikey`
//! query parameter). Callers select the scheme with a mandatory `header:` or
//! `apikey:` prefix on the credential string.

use crate::error::AuthError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::str::FromStr;

/// A validated credential, tagged with its authentication scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// Base64-encoded `email:password`, sent as `authorization: Basic ...`
    Header(String),
    /// API key, sent as the `apikey` query parameter
    ApiKey(String),
}

impl AuthCredential {
    /// Returns the scheme name (`header` or `apikey`).
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Header(_) => "header",
            Self::ApiKey(_) => "apikey",
        }
    }

    /// Returns the `authorization` header value, if this credential is
    /// header-based.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::Header(encoded) => Some(format!("Basic {}", encoded)),
            Self::ApiKey(_) => None,
        }
    }

    /// Returns the `apikey` query parameter value, if this credential is
    /// key-based.
    pub fn query_value(&self) -> Option<&str> {
        match self {
            Self::Header(_) => None,
            Self::ApiKey(key) => Some(key.as_str()),
        }
    }
}

impl FromStr for AuthCredential {
    type Err = AuthError;

    /// Parses a prefixed credential string.
    ///
    /// The value is everything after the first `:`, so base64 padding and
    /// keys containing `:` pass through untouched. Absence of a known
    /// prefix is an error, never a silent default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(value) = s.strip_prefix("header:") {
            if value.is_empty() {
                return Err(AuthError::empty_value("header"));
            }
            return Ok(Self::Header(value.to_string()));
        }
        if let Some(value) = s.strip_prefix("apikey:") {
            if value.is_empty() {
                return Err(AuthError::empty_value("apikey"));
            }
            return Ok(Self::ApiKey(value.to_string()));
        }
        Err(AuthError::MissingPrefix(s.to_string()))
    }
}

/// Builds a `header:` credential string from a raw email and password.
///
/// The API wants the base64 of `email:password`; doing the encoding here
/// saves callers from shipping a pre-encoded blob around.
pub fn basic_credential(email: &str, password: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", email, password));
    format!("header:{}", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_apikey() {
        let cred: AuthCredential = "apikey:abc".parse().unwrap();
        assert_eq!(cred, AuthCredential::ApiKey("abc".to_string()));
        assert_eq!(cred.scheme(), "apikey");
        assert_eq!(cred.query_value(), Some("abc"));
        assert_eq!(cred.header_value(), None);
    }

    #[test]
    fn test_parse_header() {
        let cred: AuthCredential = "header:dXNlcjpwYXNz".parse().unwrap();
        assert_eq!(cred, AuthCredential::Header("dXNlcjpwYXNz".to_string()));
        assert_eq!(cred.scheme(), "header");
        assert_eq!(cred.header_value(), Some("Basic dXNlcjpwYXNz".to_string()));
        assert_eq!(cred.query_value(), None);
    }

    #[test]
    fn test_parse_value_keeps_colons() {
        let cred: AuthCredential = "apikey:a:b:c".parse().unwrap();
        assert_eq!(cred, AuthCredential::ApiKey("a:b:c".to_string()));
    }

    #[test]
    fn test_parse_missing_prefix() {
        let err = "someapikey".parse::<AuthCredential>().unwrap_err();
        assert!(matches!(err, AuthError::MissingPrefix(_)));
    }

    #[test]
    fn test_parse_prefix_typo() {
        let err = "api-key:abc".parse::<AuthCredential>().unwrap_err();
        assert!(matches!(err, AuthError::MissingPrefix(_)));
    }

    #[test]
    fn test_parse_empty_string() {
        let err = "".parse::<AuthCredential>().unwrap_err();
        assert!(matches!(err, AuthError::MissingPrefix(_)));
    }

    #[test]
    fn test_parse_empty_value() {
        let err = "apikey:".parse::<AuthCredential>().unwrap_err();
        assert!(matches!(err, AuthError::EmptyValue { .. }));
        let err = "header:".parse::<AuthCredential>().unwrap_err();
        assert!(matches!(err, AuthError::EmptyValue { .. }));
    }

    #[test]
    fn test_basic_credential_roundtrip() {
        let cred_string = basic_credential("user@example.com", "secret");
        let cred: AuthCredential = cred_string.parse().unwrap();
        match cred {
            AuthCredential::Header(encoded) => {
                let decoded = STANDARD.decode(encoded).unwrap();
                assert_eq!(decoded, b"user@example.com:secret");
            }
            other => panic!("expected header credential, got {:?}", other),
        }
    }
}
