// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for hubnet client operations

use hubnet_api_contract::{ApiContractError, GraphQlErrorSet};
use hubnet_client_api::TransportError;
use thiserror::Error;

/// Errors surfaced by hubnet client operations
///
/// `ShapeMismatch` signals a protocol contract violation between the
/// composed query and the decoded response; it is deliberately distinct
/// from `GraphQl`, which carries errors the service itself reported.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    GraphQl(#[from] GraphQlErrorSet),

    #[error("Contract error: {0}")]
    Contract(#[from] ApiContractError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response shape: {0}")]
    ShapeMismatch(String),

    #[error("Batch of {len} repositories exceeds the supported maximum of {max}")]
    BatchTooLarge { len: usize, max: usize },
}

pub type ClientResult<T> = Result<T, ClientError>;
