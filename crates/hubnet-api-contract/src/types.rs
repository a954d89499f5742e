//! Repository types shared by the hubnet client and its consumers

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiContractError;
use crate::validation;

/// Reference to a repository by owner and name
///
/// Supplied by the caller, never fetched. Parses from and displays as
/// `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Check both components against the allowed identifier character set.
    ///
    /// Must pass before either component is interpolated into a query
    /// document or URL path.
    pub fn validate(&self) -> Result<(), ApiContractError> {
        validation::validate_repo_ref(self)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = ApiContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self::new(owner, name))
            }
            _ => Err(ApiContractError::InvalidRepoRef(format!(
                "expected OWNER/NAME, got {s:?}"
            ))),
        }
    }
}

/// The owner of a GitHub repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

/// The current viewer identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub login: String,
}

/// Information about a GitHub repository
///
/// Decodes from the GraphQL wire format. Fields outside a given query's
/// selection set fall back to their defaults, so the same record type
/// serves both the batched network fragment and the narrower
/// single-repository and mutation responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub owner: RepositoryOwner,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub is_private: bool,
    pub has_issues_enabled: bool,
    pub viewer_permission: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch_ref: Option<DefaultBranchRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Repository>>,
}

impl Repository {
    /// Login name of the owner
    pub fn repo_owner(&self) -> &str {
        &self.owner.login
    }

    /// Name of the repository
    pub fn repo_name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }

    /// True when this repository has a parent repository
    pub fn is_fork(&self) -> bool {
        self.parent.is_some()
    }

    /// True when the requesting user has push access
    pub fn viewer_can_push(&self) -> bool {
        matches!(self.viewer_permission.as_str(), "ADMIN" | "MAINTAIN" | "WRITE")
    }

    pub fn default_branch(&self) -> Option<&str> {
        self.default_branch_ref.as_ref().map(|r| r.name.as_str())
    }

    pub fn default_branch_oid(&self) -> Option<&str> {
        self.default_branch_ref
            .as_ref()
            .and_then(|r| r.target.as_ref())
            .map(|t| t.oid.as_str())
    }
}

/// Pointer to a repository's default branch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultBranchRef {
    pub name: String,
    // null for branches without a resolvable target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<CommitTarget>,
}

/// The commit a branch ref points at
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTarget {
    pub oid: String,
}

/// Repository visibility accepted by the create mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RepoVisibility {
    #[default]
    Public,
    Private,
    Internal,
}

impl fmt::Display for RepoVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoVisibility::Public => write!(f, "PUBLIC"),
            RepoVisibility::Private => write!(f, "PRIVATE"),
            RepoVisibility::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Input parameters for creating a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoCreateInput {
    pub name: String,
    pub visibility: RepoVisibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub has_issues_enabled: bool,
    pub has_wiki_enabled: bool,
}

/// Repository payload returned by the REST v3 API
///
/// The v3 wire format is snake_case, so field names map directly.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryV3 {
    pub node_id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub clone_url: Option<String>,
    pub owner: RepositoryOwner,
}
