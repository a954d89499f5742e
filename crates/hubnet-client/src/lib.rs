// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! GitHub API client with batched repository-network queries
//!
//! The core capability is [`repo_network`]: one composite GraphQL query
//! fetching the viewer identity plus an arbitrary, request-time set of
//! repositories (each with its fork parent), tolerant of per-repository
//! "not found" results and returning records in caller order.
//!
//! Everything is written against the `ApiTransport` trait from
//! `hubnet-client-api`; [`GitHubClient`] is the reqwest-backed
//! implementation for the real service.

pub mod client;
pub mod error;
pub mod network;
pub mod repos;

pub use client::*;
pub use error::*;
pub use network::{
    MAX_NETWORK_REPOS, QueryOutcome, RepoNetworkResult, ResponseKey, classify_key,
    compose_network_query, network_alias, repo_network,
};
pub use repos::*;
