// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! End-to-end tests for the batched network query and the sibling
//! operations, driven through a mocked transport.

use hubnet_api_contract::{GraphQlError, GraphQlResponse, RepoCreateInput, RepoRef, RepoVisibility};
use hubnet_client::{ClientError, create_repository, fetch_repository, fork_repository, repo_network};
use hubnet_client_api::{MockApiTransport, RestMethod, TransportError};
use serde_json::json;

fn refs(names: &[&str]) -> Vec<RepoRef> {
    names.iter().map(|n| n.parse().unwrap()).collect()
}

fn not_found(path: &str) -> GraphQlError {
    GraphQlError {
        error_type: Some("NOT_FOUND".to_string()),
        message: format!("Could not resolve to a Repository with the name '{path}'."),
        path: vec![json!(path)],
    }
}

fn repo_fragment(owner: &str, name: &str) -> serde_json::Value {
    json!({
        "id": format!("id-{owner}-{name}"),
        "name": name,
        "owner": {"login": owner},
        "viewerPermission": "WRITE",
        "defaultBranchRef": {"name": "main", "target": {"oid": "abc123"}},
        "isPrivate": false
    })
}

fn ok_response(data: serde_json::Value) -> GraphQlResponse<serde_json::Value> {
    GraphQlResponse {
        data: Some(data),
        errors: Vec::new(),
    }
}

#[tokio::test]
async fn network_preserves_input_order() {
    let mut transport = MockApiTransport::new();
    transport
        .expect_graphql()
        .withf(|req| {
            req.query.contains("repo_000: repository(owner: \"octo\", name: \"hello\")")
                && req.query.contains("repo_001: repository(owner: \"octo\", name: \"world\")")
                && req.query.contains("viewer { login }")
        })
        .times(1)
        .returning(|_| {
            Ok(ok_response(json!({
                "viewer": {"login": "octocat"},
                "repo_001": repo_fragment("octo", "world"),
                "repo_000": repo_fragment("octo", "hello")
            })))
        });

    let result = repo_network(&transport, &refs(&["octo/hello", "octo/world"])).await.unwrap();
    assert_eq!(result.viewer_login, "octocat");
    assert_eq!(result.repositories.len(), 2);
    assert_eq!(result.repositories[0].as_ref().unwrap().repo_name(), "hello");
    assert_eq!(result.repositories[1].as_ref().unwrap().repo_name(), "world");
}

#[tokio::test]
async fn network_tolerates_not_found_sub_queries() {
    let mut transport = MockApiTransport::new();
    transport.expect_graphql().times(1).returning(|_| {
        Ok(GraphQlResponse {
            data: Some(json!({
                "viewer": {"login": "octocat"},
                "repo_000": repo_fragment("octo", "a"),
                "repo_001": null,
                "repo_002": repo_fragment("octo", "c")
            })),
            errors: vec![not_found("repo_001")],
        })
    });

    let result =
        repo_network(&transport, &refs(&["octo/a", "octo/b", "octo/c"])).await.unwrap();
    assert_eq!(result.repositories.len(), 3);
    assert!(result.repositories[0].is_some());
    assert!(result.repositories[1].is_none());
    assert!(result.repositories[2].is_some());
}

#[tokio::test]
async fn network_fails_on_non_tolerated_errors() {
    let mut transport = MockApiTransport::new();
    transport.expect_graphql().times(1).returning(|_| {
        Ok(GraphQlResponse {
            data: Some(json!({
                "viewer": {"login": "octocat"},
                "repo_000": repo_fragment("octo", "a"),
                "repo_001": null
            })),
            errors: vec![
                not_found("repo_001"),
                GraphQlError {
                    error_type: Some("RATE_LIMITED".to_string()),
                    message: "API rate limit exceeded".to_string(),
                    path: Vec::new(),
                },
            ],
        })
    });

    let err = repo_network(&transport, &refs(&["octo/a", "octo/b"])).await.unwrap_err();
    assert!(matches!(err, ClientError::GraphQl(_)), "got {err:?}");
}

#[tokio::test]
async fn network_transport_errors_propagate() {
    let mut transport = MockApiTransport::new();
    transport.expect_graphql().times(1).returning(|_| {
        Err(TransportError::Status {
            status: 401,
            body: "Bad credentials".to_string(),
        })
    });

    let err = repo_network(&transport, &refs(&["octo/a"])).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn network_missing_viewer_is_fatal() {
    let mut transport = MockApiTransport::new();
    transport.expect_graphql().times(1).returning(|_| {
        Ok(ok_response(json!({
            "repo_000": repo_fragment("octo", "a")
        })))
    });

    let err = repo_network(&transport, &refs(&["octo/a"])).await.unwrap_err();
    assert!(matches!(err, ClientError::ShapeMismatch(_)), "got {err:?}");
}

#[tokio::test]
async fn network_empty_batch_fetches_viewer_only() {
    let mut transport = MockApiTransport::new();
    transport
        .expect_graphql()
        .withf(|req| !req.query.contains("repository(") && !req.query.contains("fragment repo"))
        .times(1)
        .returning(|_| Ok(ok_response(json!({"viewer": {"login": "octocat"}}))));

    let result = repo_network(&transport, &[]).await.unwrap();
    assert_eq!(result.viewer_login, "octocat");
    assert!(result.repositories.is_empty());
}

#[tokio::test]
async fn network_decodes_fork_parents() {
    let mut transport = MockApiTransport::new();
    transport.expect_graphql().times(1).returning(|_| {
        let mut fork = repo_fragment("forker", "hello");
        fork["parent"] = repo_fragment("octo", "hello");
        Ok(ok_response(json!({
            "viewer": {"login": "forker"},
            "repo_000": fork
        })))
    });

    let result = repo_network(&transport, &refs(&["forker/hello"])).await.unwrap();
    let repo = result.repositories[0].as_ref().unwrap();
    assert!(repo.is_fork());
    assert_eq!(repo.parent.as_deref().unwrap().full_name(), "octo/hello");
}

#[tokio::test]
async fn fetch_repository_binds_variables() {
    let mut transport = MockApiTransport::new();
    transport
        .expect_graphql()
        .withf(|req| {
            let vars = req.variables.as_ref().unwrap();
            vars["owner"] == "octo" && vars["name"] == "hello"
        })
        .times(1)
        .returning(|_| {
            Ok(ok_response(json!({
                "repository": {"id": "X", "hasIssuesEnabled": true}
            })))
        });

    let repo = fetch_repository(&transport, &"octo/hello".parse().unwrap()).await.unwrap();
    assert_eq!(repo.id, "X");
    assert!(repo.has_issues_enabled);
}

#[tokio::test]
async fn fork_converts_v3_response() {
    let mut transport = MockApiTransport::new();
    transport
        .expect_rest()
        .withf(|method, path, body| {
            *method == RestMethod::Post && path == "repos/octo/hello/forks" && body.is_some()
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(json!({
                "node_id": "FORK",
                "name": "hello",
                "created_at": "2020-02-28T12:30:00Z",
                "clone_url": "https://github.com/me/hello.git",
                "owner": {"login": "me"}
            }))
        });

    let repo = fork_repository(&transport, &"octo/hello".parse().unwrap()).await.unwrap();
    assert_eq!(repo.id, "FORK");
    assert_eq!(repo.repo_owner(), "me");
    assert_eq!(repo.viewer_permission, "WRITE");
    assert!(repo.viewer_can_push());
    assert!(!repo.is_fork());
}

#[tokio::test]
async fn create_resolves_owner_and_team_ids() {
    let mut seq = mockall::Sequence::new();
    let mut transport = MockApiTransport::new();
    transport
        .expect_graphql()
        .withf(|req| req.query.contains("team(slug: $teamSlug)"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            Ok(ok_response(json!({
                "organization": {"id": "ORG_ID", "team": {"id": "TEAM_ID"}}
            })))
        });
    transport
        .expect_graphql()
        .withf(|req| {
            let input = &req.variables.as_ref().unwrap()["input"];
            req.query.contains("createRepository")
                && input["ownerId"] == "ORG_ID"
                && input["teamId"] == "TEAM_ID"
                && input["visibility"] == "PRIVATE"
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            Ok(ok_response(json!({
                "createRepository": {
                    "repository": {
                        "id": "NEW",
                        "name": "widget",
                        "owner": {"login": "acme"},
                        "url": "https://github.com/acme/widget"
                    }
                }
            })))
        });

    let input = RepoCreateInput {
        name: "widget".to_string(),
        visibility: RepoVisibility::Private,
        owner_id: Some("acme".to_string()),
        team_id: Some("platform".to_string()),
        has_issues_enabled: true,
        ..RepoCreateInput::default()
    };
    let repo = create_repository(&transport, input).await.unwrap();
    assert_eq!(repo.id, "NEW");
    assert_eq!(repo.full_name(), "acme/widget");
}

#[tokio::test]
async fn create_without_owner_skips_resolution() {
    let mut transport = MockApiTransport::new();
    transport
        .expect_graphql()
        .withf(|req| {
            let input = &req.variables.as_ref().unwrap()["input"];
            req.query.contains("createRepository") && input.get("ownerId").is_none()
        })
        .times(1)
        .returning(|_| {
            Ok(ok_response(json!({
                "createRepository": {
                    "repository": {
                        "id": "NEW",
                        "name": "widget",
                        "owner": {"login": "octocat"},
                        "url": "https://github.com/octocat/widget"
                    }
                }
            })))
        });

    let input = RepoCreateInput {
        name: "widget".to_string(),
        ..RepoCreateInput::default()
    };
    let repo = create_repository(&transport, input).await.unwrap();
    assert_eq!(repo.repo_owner(), "octocat");
}

#[tokio::test]
async fn create_with_team_requires_owner() {
    let transport = MockApiTransport::new();
    let input = RepoCreateInput {
        name: "widget".to_string(),
        team_id: Some("platform".to_string()),
        ..RepoCreateInput::default()
    };
    let err = create_repository(&transport, input).await.unwrap_err();
    assert!(matches!(err, ClientError::Contract(_)), "got {err:?}");
}
