// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for API contract validation and parsing

use thiserror::Error;

/// Errors that can occur during API contract validation and parsing
#[derive(Debug, Error)]
pub enum ApiContractError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid repository reference: {0}")]
    InvalidRepoRef(String),

    #[error("Invalid repository owner: {0}")]
    InvalidOwner(String),

    #[error("Invalid repository name: {0}")]
    InvalidRepoName(String),
}
