// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! GitHub API contract types and validation
//!
//! This crate defines the schema types shared between the hubnet client,
//! its transport abstraction, and the CLI: repository records and
//! references, the GraphQL request/response envelopes, and the REST v3
//! response shapes. These types carry no transport logic of their own.

pub mod error;
pub mod graphql;
pub mod types;
pub mod validation;

pub use error::*;
pub use graphql::*;
pub use types::*;
