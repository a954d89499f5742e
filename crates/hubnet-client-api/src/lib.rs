// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Transport abstraction for the hubnet client
//!
//! Operations in `hubnet-client` are written against the [`ApiTransport`]
//! trait rather than a concrete HTTP stack, so tests and alternative
//! backends can substitute the network layer. A transport call is atomic
//! from the caller's perspective: it yields either a complete response
//! envelope or an error, never a partial stream.
//!
//! With the `mocks` feature enabled, a `MockApiTransport` generated by
//! `mockall` is available for tests.

use hubnet_api_contract::{GraphQlRequest, GraphQlResponse};
use thiserror::Error;

// Re-exported so implementors don't need their own async-trait dependency
pub use async_trait::async_trait;

/// Errors surfaced by an API transport implementation
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

pub type TransportResult<T> = Result<T, TransportError>;

/// HTTP method subset used by the REST v3 surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl RestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestMethod::Get => "GET",
            RestMethod::Post => "POST",
            RestMethod::Patch => "PATCH",
            RestMethod::Delete => "DELETE",
        }
    }
}

/// Request/reply primitive the hubnet operations are written against
///
/// Implementations own connection management, authentication headers,
/// and timeouts. Service-level errors inside a GraphQL envelope are NOT
/// transport errors; the envelope is returned as-is and interpreted by
/// the caller.
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Execute a GraphQL document and return the raw response envelope
    async fn graphql(
        &self,
        request: &GraphQlRequest,
    ) -> TransportResult<GraphQlResponse<serde_json::Value>>;

    /// Execute a REST v3 request and return the decoded JSON body
    async fn rest(
        &self,
        method: RestMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> TransportResult<serde_json::Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_method_names() {
        assert_eq!(RestMethod::Get.as_str(), "GET");
        assert_eq!(RestMethod::Post.as_str(), "POST");
        assert_eq!(RestMethod::Patch.as_str(), "PATCH");
        assert_eq!(RestMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_status_error_display() {
        let err = TransportError::Status {
            status: 403,
            body: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 403: rate limited");
    }
}
