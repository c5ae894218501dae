//! Error types for the AT Internet API client.
//!
//! This module defines typed errors for the two phases a request goes
//! through: construction (credential and parameter validation) and the
//! operation itself (HTTP round trip plus response decoding).

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all client errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Credential string validation failed at construction
    #[error("invalid auth format")]
    Auth(#[from] AuthError),

    /// Parameter string parsing failed at construction
    #[error("malformed parameters")]
    Params(#[from] ParamsError),

    /// An API operation failed (transport, upstream status, or decoding)
    #[error("API request error")]
    Api(#[from] ApiError),

    /// Generic errors that don't fit other categories
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Credential string validation errors.
///
/// A credential string must carry a `header:` or `apikey:` prefix followed
/// by a non-empty value. There is no silent default scheme.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Credential string carries neither recognized prefix
    #[error("credential string must start with 'header:' or 'apikey:', got '{0}'")]
    MissingPrefix(String),

    /// Prefix is present but the tagged value is empty
    #[error("credential value after '{scheme}:' is empty")]
    EmptyValue { scheme: String },
}

/// Query parameter string parsing errors.
#[derive(Error, Debug)]
pub enum ParamsError {
    /// A `key=value` pair has no `=` separator
    #[error("parameter segment '{segment}' has no '=' separator")]
    MissingSeparator { segment: String },

    /// Braces in a parameter value do not balance
    #[error("unbalanced braces in parameter string: {0}")]
    UnbalancedBraces(String),

    /// The whole string is empty or reduces to nothing after trimming
    #[error("parameter string is empty")]
    Empty,

    /// Configured page size cannot drive pagination
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Per-operation errors: HTTP transport, upstream status, and decoding.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication rejected by the provider (401)
    #[error("authentication failed: invalid credentials")]
    AuthFailed,

    /// Provider returned a non-success status
    #[error("upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// Response body does not match the requested format
    #[error("failed to decode response as {format}: {message}")]
    Decode { format: String, message: String },

    /// A parameter the operation requires is absent from the mapping
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),
}

impl ApiError {
    /// Creates an upstream error from HTTP status and response body.
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        if status == 401 {
            Self::AuthFailed
        } else {
            Self::Upstream {
                status,
                message: body.into(),
            }
        }
    }

    /// Creates a decode error for the given format.
    pub fn decode(format: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            format: format.into(),
            message: err.to_string(),
        }
    }
}

impl AuthError {
    /// Creates an empty-value error for the given scheme.
    pub fn empty_value(scheme: impl Into<String>) -> Self {
        Self::EmptyValue {
            scheme: scheme.into(),
        }
    }
}

impl ParamsError {
    /// Creates a missing-separator error for the given segment.
    pub fn missing_separator(segment: impl Into<String>) -> Self {
        Self::MissingSeparator {
            segment: segment.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod auth_error {
        use super::*;

        #[test]
        fn test_missing_prefix() {
            let err = AuthError::MissingPrefix("token abc".to_string());
            assert_eq!(
                err.to_string(),
                "credential string must start with 'header:' or 'apikey:', got 'token abc'"
            );
        }

        #[test]
        fn test_empty_value() {
            let err = AuthError::empty_value("apikey");
            assert_eq!(err.to_string(), "credential value after 'apikey:' is empty");
        }
    }

    mod params_error {
        use super::*;

        #[test]
        fn test_missing_separator() {
            let err = ParamsError::missing_separator("columns");
            assert_eq!(
                err.to_string(),
                "parameter segment 'columns' has no '=' separator"
            );
        }

        #[test]
        fn test_unbalanced_braces() {
            let err = ParamsError::UnbalancedBraces("space={s:1".to_string());
            assert_eq!(
                err.to_string(),
                "unbalanced braces in parameter string: space={s:1"
            );
        }
    }

    mod api_error {
        use super::*;

        #[test]
        fn test_upstream_maps_401_to_auth_failed() {
            let err = ApiError::upstream(401, "Unauthorized");
            assert!(matches!(err, ApiError::AuthFailed));
        }

        #[test]
        fn test_upstream_keeps_status_and_body() {
            let err = ApiError::upstream(503, "Service Unavailable");
            assert_eq!(
                err.to_string(),
                "upstream error (status 503): Service Unavailable"
            );
        }

        #[test]
        fn test_decode() {
            let err = ApiError::decode("json", "expected value at line 1");
            assert_eq!(
                err.to_string(),
                "failed to decode response as json: expected value at line 1"
            );
        }
    }

    mod error_conversion {
        use super::*;

        #[test]
        fn test_auth_error_conversion() {
            let auth_err = AuthError::MissingPrefix("x".to_string());
            let err: Error = auth_err.into();
            assert!(matches!(err, Error::Auth(_)));
        }

        #[test]
        fn test_anyhow_conversion() {
            let err = Error::Params(ParamsError::Empty);
            let anyhow_err: anyhow::Error = err.into();
            assert!(anyhow_err.to_string().contains("malformed parameters"));
        }
    }
}
