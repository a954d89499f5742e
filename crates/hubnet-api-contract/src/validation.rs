//! Validation helpers for API contract types

use crate::error::ApiContractError;
use crate::types::RepoRef;

// Owner and repository names are interpolated into query documents and
// URL paths as source-level literals, so the accepted character set must
// exclude anything that could terminate or extend the surrounding syntax.

/// Validate a repository owner login
///
/// GitHub logins are ASCII alphanumeric with internal dashes; organization
/// logins may also contain underscores.
pub fn validate_owner(owner: &str) -> Result<(), ApiContractError> {
    if owner.is_empty() {
        return Err(ApiContractError::InvalidOwner(
            "owner must not be empty".to_string(),
        ));
    }
    for c in owner.chars() {
        if !c.is_ascii_alphanumeric() && c != '-' && c != '_' {
            return Err(ApiContractError::InvalidOwner(format!(
                "owner contains invalid character {c:?}: {owner}"
            )));
        }
    }
    Ok(())
}

/// Validate a repository name
///
/// Repository names additionally allow dots, but `.` and `..` are
/// reserved path components and are rejected.
pub fn validate_repo_name(name: &str) -> Result<(), ApiContractError> {
    if name.is_empty() {
        return Err(ApiContractError::InvalidRepoName(
            "name must not be empty".to_string(),
        ));
    }
    if name == "." || name == ".." {
        return Err(ApiContractError::InvalidRepoName(format!(
            "name {name:?} is reserved"
        )));
    }
    for c in name.chars() {
        if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.' {
            return Err(ApiContractError::InvalidRepoName(format!(
                "name contains invalid character {c:?}: {name}"
            )));
        }
    }
    Ok(())
}

/// Validate both components of a repository reference
pub fn validate_repo_ref(repo: &RepoRef) -> Result<(), ApiContractError> {
    validate_owner(&repo.owner)?;
    validate_repo_name(&repo.name)?;
    Ok(())
}
