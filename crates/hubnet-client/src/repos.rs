// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Single-repository lookups and mutations
//!
//! Unlike the batched network query, every operation here has a
//! statically-known response shape and decodes directly into typed
//! structs. Lookups bind owner/name through GraphQL variables; only the
//! batched composer interpolates literals.

use hubnet_api_contract::{
    ApiContractError, GraphQlErrorSet, GraphQlRequest, RepoCreateInput, RepoRef, Repository,
    RepositoryV3,
};
use hubnet_client_api::{ApiTransport, RestMethod};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Execute a statically-shaped GraphQL request and decode its data slot
///
/// Any reported error fails the call; tolerance for partial results is a
/// property of the batched network query only.
pub(crate) async fn graphql_data<T, D>(transport: &T, request: &GraphQlRequest) -> ClientResult<D>
where
    T: ApiTransport + ?Sized,
    D: DeserializeOwned,
{
    let response = transport.graphql(request).await?;
    if !response.errors.is_empty() {
        return Err(GraphQlErrorSet::new(response.errors).into());
    }
    let data = response
        .data
        .ok_or_else(|| ClientError::ShapeMismatch("response carried no data".to_string()))?;
    serde_json::from_value(data)
        .map_err(|e| ClientError::ShapeMismatch(format!("malformed response data: {e}")))
}

/// Fetch a single repository record
pub async fn fetch_repository<T>(transport: &T, repo: &RepoRef) -> ClientResult<Repository>
where
    T: ApiTransport + ?Sized,
{
    #[derive(Deserialize)]
    struct Data {
        repository: Repository,
    }

    let query = "\
query($owner: String!, $name: String!) {
\trepository(owner: $owner, name: $name) {
\t\tid
\t\thasIssuesEnabled
\t}
}";
    let request = GraphQlRequest::with_variables(
        query,
        json!({"owner": repo.owner, "name": repo.name}),
    );
    let data: Data = graphql_data(transport, &request).await?;
    Ok(data.repository)
}

/// Fork a repository on behalf of the current viewer
///
/// Forking goes through the REST v3 surface; the response is converted
/// into the shared record shape. The viewer owns the new copy, so its
/// permission is WRITE.
pub async fn fork_repository<T>(transport: &T, repo: &RepoRef) -> ClientResult<Repository>
where
    T: ApiTransport + ?Sized,
{
    // owner/name land in the URL path
    repo.validate()?;
    let path = format!("repos/{}/forks", repo.full_name());
    debug!(repo = %repo, "forking repository");

    let body = transport.rest(RestMethod::Post, &path, Some(json!({}))).await?;
    let v3: RepositoryV3 = serde_json::from_value(body)?;

    Ok(Repository {
        id: v3.node_id,
        name: v3.name,
        clone_url: v3.clone_url,
        created_at: v3.created_at,
        owner: v3.owner,
        viewer_permission: "WRITE".to_string(),
        ..Repository::default()
    })
}

/// Create a new repository
///
/// When a team is named, the owning organization and team logins are
/// resolved to node IDs first; an organization owner alone is resolved
/// the same way.
pub async fn create_repository<T>(
    transport: &T,
    mut input: RepoCreateInput,
) -> ClientResult<Repository>
where
    T: ApiTransport + ?Sized,
{
    if let Some(team_slug) = input.team_id.clone() {
        let org_login = input.owner_id.clone().ok_or_else(|| {
            ApiContractError::InvalidOwner(format!(
                "team {team_slug:?} was specified without an owning organization"
            ))
        })?;
        let (org_id, team_id) = resolve_organization_team(transport, &org_login, &team_slug).await?;
        input.owner_id = Some(org_id);
        input.team_id = Some(team_id);
    } else if let Some(org_login) = input.owner_id.clone() {
        input.owner_id = Some(resolve_organization(transport, &org_login).await?);
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Data {
        create_repository: CreateRepositoryPayload,
    }

    #[derive(Deserialize)]
    struct CreateRepositoryPayload {
        repository: Repository,
    }

    let query = "\
mutation($input: CreateRepositoryInput!) {
\tcreateRepository(input: $input) {
\t\trepository {
\t\t\tid
\t\t\tname
\t\t\towner { login }
\t\t\turl
\t\t}
\t}
}";
    debug!(name = %input.name, "creating repository");
    let request = GraphQlRequest::with_variables(query, json!({"input": input}));
    let data: Data = graphql_data(transport, &request).await?;
    Ok(data.create_repository.repository)
}

/// Resolve an organization login to its node ID
pub async fn resolve_organization<T>(transport: &T, login: &str) -> ClientResult<String>
where
    T: ApiTransport + ?Sized,
{
    #[derive(Deserialize)]
    struct Data {
        organization: OrganizationNode,
    }

    #[derive(Deserialize)]
    struct OrganizationNode {
        id: String,
    }

    let request = GraphQlRequest::with_variables(
        "query($login: String!) {\n\torganization(login: $login) { id }\n}",
        json!({"login": login}),
    );
    let data: Data = graphql_data(transport, &request).await?;
    Ok(data.organization.id)
}

/// Resolve an organization login and team slug to their node IDs
pub async fn resolve_organization_team<T>(
    transport: &T,
    login: &str,
    team_slug: &str,
) -> ClientResult<(String, String)>
where
    T: ApiTransport + ?Sized,
{
    #[derive(Deserialize)]
    struct Data {
        organization: OrganizationNode,
    }

    #[derive(Deserialize)]
    struct OrganizationNode {
        id: String,
        team: Option<TeamNode>,
    }

    #[derive(Deserialize)]
    struct TeamNode {
        id: String,
    }

    let request = GraphQlRequest::with_variables(
        "query($login: String!, $teamSlug: String!) {\n\torganization(login: $login) {\n\t\tid\n\t\tteam(slug: $teamSlug) { id }\n\t}\n}",
        json!({"login": login, "teamSlug": team_slug}),
    );
    let data: Data = graphql_data(transport, &request).await?;
    let team = data.organization.team.ok_or_else(|| {
        ClientError::ShapeMismatch(format!("organization {login:?} has no team {team_slug:?}"))
    })?;
    Ok((data.organization.id, team.id))
}
