//! HTTP transport bootstrap for the storefront REST backend.
//!
//! # Responsibility
//! - Build configured HTTP agents bound to one backend base URL.
//! - Map transport, status and decode failures into `NetError`.
//!
//! # Invariants
//! - Credentials are passed explicitly per request, never read from ambient
//!   state.
//! - Bearer tokens never appear in logs or `Debug` output.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

mod client;

pub use client::{ApiClient, DEFAULT_TIMEOUT};

pub type NetResult<T> = Result<T, NetError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetError {
    /// Base URL is blank or not an `http(s)://` URL.
    InvalidBaseUrl(String),
    /// Connection, DNS, TLS or timeout failure.
    Transport(String),
    /// Backend answered with a non-success status code.
    Status { status: u16, url: String },
    /// Response body could not be decoded into the expected shape.
    Decode(String),
}

impl Display for NetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => {
                write!(f, "base url must be an absolute http(s) url, got `{value}`")
            }
            Self::Transport(message) => write!(f, "request failed: {message}"),
            Self::Status { status, url } => write!(f, "{url} responded with status {status}"),
            Self::Decode(message) => write!(f, "response body could not be decoded: {message}"),
        }
    }
}

impl Error for NetError {}

impl NetError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidBaseUrl(_) => "invalid_base_url",
            Self::Transport(_) => "transport_failed",
            Self::Status { .. } => "http_status",
            Self::Decode(_) => "decode_failed",
        }
    }
}

/// Bearer credential forwarded to the backend when present.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    /// Wraps a bearer token; blank tokens yield `None`.
    pub fn bearer(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            token: trimmed.to_string(),
        })
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::{Credential, NetError};

    #[test]
    fn blank_token_is_no_credential() {
        assert!(Credential::bearer("  ").is_none());
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::bearer(" secret-token ").unwrap();
        assert_eq!(credential.header_value(), "Bearer secret-token");
        assert!(!format!("{credential:?}").contains("secret"));
    }

    #[test]
    fn status_error_mentions_code() {
        let err = NetError::Status {
            status: 503,
            url: "http://shop.test/products/categories/".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert_eq!(err.code(), "http_status");
    }
}
