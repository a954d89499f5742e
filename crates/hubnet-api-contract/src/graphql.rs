// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! GraphQL wire envelopes
//!
//! The request payload and the response/error shapes of the GraphQL v4
//! endpoint. The response `data` slot is generic because batched queries
//! produce a schema that is only known at request time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error kind the service reports for sub-queries naming a missing resource.
///
/// This is the only kind a batched call is allowed to survive.
pub const NOT_FOUND_TYPE: &str = "NOT_FOUND";

/// GraphQL request payload
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

impl GraphQlRequest {
    /// Request without bound variables (fully interpolated documents)
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
        }
    }

    /// Request with a bound variables object
    pub fn with_variables(query: impl Into<String>, variables: serde_json::Value) -> Self {
        Self {
            query: query.into(),
            variables: Some(variables),
        }
    }
}

/// GraphQL response envelope
///
/// `data` and `errors` are not mutually exclusive: a batched query can
/// return partial data alongside per-field errors.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A single structured error reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlError {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<serde_json::Value>,
}

impl GraphQlError {
    /// True when the error only reports a missing resource
    pub fn is_not_found(&self) -> bool {
        self.error_type.as_deref() == Some(NOT_FOUND_TYPE)
    }
}

/// Non-empty set of errors attached to a failed GraphQL call
#[derive(Debug, Clone, Error)]
#[error("GraphQL error: {}", summarize(.errors))]
pub struct GraphQlErrorSet {
    errors: Vec<GraphQlError>,
}

fn summarize(errors: &[GraphQlError]) -> String {
    errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>().join("; ")
}

impl GraphQlErrorSet {
    pub fn new(errors: Vec<GraphQlError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[GraphQlError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<GraphQlError> {
        self.errors
    }

    /// True when every reported error is a tolerable "resource missing"
    pub fn all_not_found(&self) -> bool {
        !self.errors.is_empty() && self.errors.iter().all(GraphQlError::is_not_found)
    }
}
