// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Batched repository-network queries
//!
//! Fetches the viewer identity plus an arbitrary set of repositories in a
//! single round trip. The service's query language requires each
//! repository to be named as a distinct field, so the document is
//! composed dynamically with one positional alias per input and the
//! response is decoded by runtime key inspection rather than a static
//! shape.
//!
//! The pipeline is linear: compose -> execute -> classify outcome ->
//! demultiplex -> assemble. Its single branch point is the outcome
//! classification, which decides whether per-field "not found" errors are
//! survivable. All state is call-local.

use hubnet_api_contract::{
    GraphQlError, GraphQlErrorSet, GraphQlRequest, GraphQlResponse, RepoRef, Repository, Viewer,
};
use hubnet_client_api::ApiTransport;
use serde::Serialize;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Prefix of the synthetic per-repository aliases
pub const NETWORK_ALIAS_PREFIX: &str = "repo_";

// Aliases are zero-padded to this width so that lexicographic order of
// keys equals numeric input order. Width 3 covers indices 000-999.
const NETWORK_ALIAS_WIDTH: usize = 3;

/// Largest batch a single network query accepts
///
/// Bounded by the alias pad width: index 999 is the last alias that still
/// sorts numerically. Larger batches are rejected outright rather than
/// silently widening the scheme.
pub const MAX_NETWORK_REPOS: usize = 1000;

// Field selection shared by every repository sub-query and its parent.
const REPO_FRAGMENT: &str = "\
fragment repo on Repository {
\tid
\tname
\towner { login }
\tviewerPermission
\tdefaultBranchRef {
\t\tname
\t\ttarget { oid }
\t}
\tisPrivate
}";

/// Raw keyed response fragments, not yet decoded
pub type RawFragments = serde_json::Map<String, serde_json::Value>;

/// The relationship between related repositories, in caller order
///
/// `repositories` has exactly one entry per input reference; `None` at
/// index `i` means the service reported input `i` as not found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepoNetworkResult {
    pub viewer_login: String,
    pub repositories: Vec<Option<Repository>>,
}

/// Alias assigned to the repository at `index` in the input order
pub fn network_alias(index: usize) -> String {
    format!("{NETWORK_ALIAS_PREFIX}{index:0width$}", width = NETWORK_ALIAS_WIDTH)
}

/// Compose the batched query document for `repos`
///
/// One `viewer` field plus one aliased sub-query per input, in input
/// order, each selecting the shared fragment for itself and its parent.
/// Owner and name are interpolated as string literals, so both are
/// validated against the identifier character set first. Duplicate
/// references are kept and resolve independently.
pub fn compose_network_query(repos: &[RepoRef]) -> ClientResult<String> {
    if repos.len() > MAX_NETWORK_REPOS {
        return Err(ClientError::BatchTooLarge {
            len: repos.len(),
            max: MAX_NETWORK_REPOS,
        });
    }

    let mut document = String::new();
    if !repos.is_empty() {
        document.push_str(REPO_FRAGMENT);
        document.push('\n');
    }
    document.push_str("query {\n\tviewer { login }");
    for (index, repo) in repos.iter().enumerate() {
        repo.validate()?;
        document.push_str(&format!(
            "\n\t{alias}: repository(owner: \"{owner}\", name: \"{name}\") {{\n\t\t...repo\n\t\tparent {{\n\t\t\t...repo\n\t\t}}\n\t}}",
            alias = network_alias(index),
            owner = repo.owner,
            name = repo.name,
        ));
    }
    document.push_str("\n}");
    Ok(document)
}

/// Classification of a top-level response key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKey {
    /// The literal `viewer` field
    Viewer,
    /// An alias carrying the input index it encodes
    RepoSlot(usize),
    /// Neither pattern; indicates a composer/decoder version mismatch
    Unknown,
}

/// Classify a response key by exact match or alias pattern
pub fn classify_key(key: &str) -> ResponseKey {
    if key == "viewer" {
        return ResponseKey::Viewer;
    }
    match key.strip_prefix(NETWORK_ALIAS_PREFIX) {
        Some(digits)
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            match digits.parse() {
                Ok(index) => ResponseKey::RepoSlot(index),
                Err(_) => ResponseKey::Unknown,
            }
        }
        _ => ResponseKey::Unknown,
    }
}

/// Outcome of a batched query after error-tolerance classification
///
/// Downstream code matches on the variant and never re-inspects error
/// kinds.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// Every sub-query resolved
    Success(RawFragments),
    /// Some sub-queries failed, but only with "resource missing"
    Partial(RawFragments, Vec<GraphQlError>),
    /// At least one error is not survivable
    Failure(GraphQlErrorSet),
}

impl QueryOutcome {
    /// Partition a response envelope into success, tolerated-partial, or
    /// failure
    pub fn classify(response: GraphQlResponse<serde_json::Value>) -> ClientResult<Self> {
        let fragments = match response.data {
            Some(serde_json::Value::Object(map)) => map,
            Some(other) => {
                return Err(ClientError::ShapeMismatch(format!(
                    "expected an object at the response root, got {}",
                    json_type_name(&other)
                )));
            }
            None => RawFragments::new(),
        };

        if response.errors.is_empty() {
            return Ok(QueryOutcome::Success(fragments));
        }
        let errors = GraphQlErrorSet::new(response.errors);
        if errors.all_not_found() {
            Ok(QueryOutcome::Partial(fragments, errors.into_errors()))
        } else {
            Ok(QueryOutcome::Failure(errors))
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Decode the raw fragments into an ordered result
///
/// Output ordering is defined solely by each alias's encoded index, never
/// by map iteration order: records are placed into a pre-sized vector.
/// An alias missing from the map and an alias present with a null value
/// both leave their slot as `None`. A missing `viewer` key, an unknown
/// key, or an out-of-range alias is a fatal shape mismatch.
fn decode_network(fragments: RawFragments, expected: usize) -> ClientResult<RepoNetworkResult> {
    let mut viewer_login = None;
    let mut repositories: Vec<Option<Repository>> = vec![None; expected];

    for (key, value) in fragments {
        match classify_key(&key) {
            ResponseKey::Viewer => {
                let viewer: Viewer = serde_json::from_value(value).map_err(|e| {
                    ClientError::ShapeMismatch(format!("malformed viewer fragment: {e}"))
                })?;
                viewer_login = Some(viewer.login);
            }
            ResponseKey::RepoSlot(index) => {
                if index >= expected {
                    return Err(ClientError::ShapeMismatch(format!(
                        "alias {key:?} is out of range for a batch of {expected}"
                    )));
                }
                if value.is_null() {
                    // reported not found; slot stays empty
                    continue;
                }
                let repo: Repository = serde_json::from_value(value).map_err(|e| {
                    ClientError::ShapeMismatch(format!("malformed fragment for {key:?}: {e}"))
                })?;
                repositories[index] = Some(repo);
            }
            ResponseKey::Unknown => {
                return Err(ClientError::ShapeMismatch(format!(
                    "unknown result key {key:?}"
                )));
            }
        }
    }

    let viewer_login = viewer_login.ok_or_else(|| {
        ClientError::ShapeMismatch("viewer field missing from response".to_string())
    })?;

    Ok(RepoNetworkResult {
        viewer_login,
        repositories,
    })
}

/// Inspect the relationship between multiple GitHub repositories
///
/// Issues one composite query for the viewer plus every referenced
/// repository (with its fork parent, one level deep). Sub-queries the
/// service reports as not found become `None` entries at their input
/// position; any other reported error fails the whole call.
pub async fn repo_network<T>(transport: &T, repos: &[RepoRef]) -> ClientResult<RepoNetworkResult>
where
    T: ApiTransport + ?Sized,
{
    let document = compose_network_query(repos)?;
    debug!(repos = repos.len(), "fetching repository network");

    let response = transport.graphql(&GraphQlRequest::new(document)).await?;
    let fragments = match QueryOutcome::classify(response)? {
        QueryOutcome::Success(fragments) => fragments,
        QueryOutcome::Partial(fragments, tolerated) => {
            debug!(missing = tolerated.len(), "continuing past not-found sub-queries");
            fragments
        }
        QueryOutcome::Failure(errors) => return Err(errors.into()),
    };

    decode_network(fragments, repos.len())
}
