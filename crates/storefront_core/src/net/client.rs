//! Blocking JSON client for the storefront backend.
//!
//! # Responsibility
//! - Resolve endpoint paths against one validated base URL.
//! - Issue GET requests and decode JSON bodies.
//!
//! # Invariants
//! - Every request emits one `http_get` start event and one ok/error event
//!   with duration, never the credential.
//! - `404` is only treated as absence by `get_json_optional`.

use super::{Credential, NetError, NetResult};
use log::{error, info};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// Request timeout used when callers do not configure one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ApiClient {
    /// Creates a client for `base_url` with the default timeout.
    pub fn new(base_url: &str) -> NetResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client for `base_url` with an overall request timeout.
    ///
    /// # Errors
    /// - Returns `NetError::InvalidBaseUrl` when the URL is blank or does not
    ///   use the `http` or `https` scheme.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> NetResult<Self> {
        let base_url = normalize_base_url(base_url)?;
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Ok(Self { base_url, agent })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins an absolute endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GETs `path` and decodes the JSON body.
    ///
    /// # Errors
    /// - `NetError::Status` for non-success responses.
    /// - `NetError::Transport` for connection failures and timeouts.
    /// - `NetError::Decode` when the body does not match `T`.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        credential: Option<&Credential>,
    ) -> NetResult<T> {
        let url = self.endpoint(path);
        let started_at = Instant::now();
        info!("event=http_get module=net status=start path={path}");

        let mut request = self.agent.get(&url).set("Accept", "application/json");
        for (key, value) in query {
            request = request.query(key, value);
        }
        if let Some(credential) = credential {
            request = request.set("Authorization", &credential.header_value());
        }

        let result = match request.call() {
            Ok(response) => response
                .into_json::<T>()
                .map_err(|err| NetError::Decode(err.to_string())),
            Err(ureq::Error::Status(status, _)) => Err(NetError::Status { status, url }),
            Err(ureq::Error::Transport(err)) => Err(NetError::Transport(err.to_string())),
        };

        match &result {
            Ok(_) => info!(
                "event=http_get module=net status=ok path={} duration_ms={}",
                path,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=http_get module=net status=error path={} duration_ms={} error_code={}",
                path,
                started_at.elapsed().as_millis(),
                err.code()
            ),
        }
        result
    }

    /// Like [`ApiClient::get_json`], mapping `404` to `Ok(None)`.
    pub fn get_json_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: Option<&Credential>,
    ) -> NetResult<Option<T>> {
        match self.get_json(path, &[], credential) {
            Ok(value) => Ok(Some(value)),
            Err(NetError::Status { status: 404, .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

fn normalize_base_url(value: &str) -> NetResult<String> {
    let trimmed = value.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed
        .split_once("://")
        .map(|(_, rest)| !rest.is_empty())
        .unwrap_or(false);
    if !has_scheme || !has_host {
        return Err(NetError::InvalidBaseUrl(value.to_string()));
    }
    Ok(trimmed.to_string())
}
