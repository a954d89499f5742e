// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! GitHub API client implementation
//!
//! A thin reqwest-backed [`ApiTransport`]: it attaches authentication,
//! executes one request, and decodes the response envelope. Everything
//! above that (query composition, error tolerance, demultiplexing) lives
//! in the operation modules.

use async_trait::async_trait;
use hubnet_api_contract::{GraphQlRequest, GraphQlResponse};
use hubnet_client_api::{ApiTransport, RestMethod, TransportError, TransportResult};
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Default GraphQL v4 endpoint
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
/// Default REST v3 base URL
pub const DEFAULT_REST_URL: &str = "https://api.github.com/";

const USER_AGENT: &str = concat!("hubnet/", env!("CARGO_PKG_VERSION"));

/// GitHub API client speaking GraphQL v4 and REST v3
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http_client: HttpClient,
    graphql_url: Url,
    rest_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client against the public GitHub endpoints
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_urls(DEFAULT_GRAPHQL_URL, DEFAULT_REST_URL, token)
            .expect("default GitHub endpoints are valid URLs")
    }

    /// Create a client against custom endpoints (enterprise hosts, test servers)
    pub fn with_base_urls(
        graphql_url: &str,
        rest_url: &str,
        token: Option<String>,
    ) -> TransportResult<Self> {
        let http_client = HttpClient::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            http_client,
            graphql_url: Url::parse(graphql_url)?,
            rest_url: Url::parse(rest_url)?,
            token,
        })
    }

    pub fn graphql_url(&self) -> &Url {
        &self.graphql_url
    }

    pub fn rest_url(&self) -> &Url {
        &self.rest_url
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("token {token}")),
            None => request,
        }
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> TransportResult<T> {
        let status = response.status();
        let text = response.text().await.map_err(|e| TransportError::Http(e.to_string()))?;

        if status.is_success() {
            Ok(serde_json::from_str(&text)?)
        } else {
            Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}

#[async_trait]
impl ApiTransport for GitHubClient {
    async fn graphql(
        &self,
        request: &GraphQlRequest,
    ) -> TransportResult<GraphQlResponse<serde_json::Value>> {
        debug!(url = %self.graphql_url, "executing GraphQL request");
        let response = self
            .authenticated(self.http_client.post(self.graphql_url.clone()))
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;
        self.handle_response(response).await
    }

    async fn rest(
        &self,
        method: RestMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> TransportResult<serde_json::Value> {
        let url = self.rest_url.join(path)?;
        debug!(method = method.as_str(), %url, "executing REST request");

        let method = match method {
            RestMethod::Get => Method::GET,
            RestMethod::Post => Method::POST,
            RestMethod::Patch => Method::PATCH,
            RestMethod::Delete => Method::DELETE,
        };

        let mut request = self
            .authenticated(self.http_client.request(method, url))
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| TransportError::Http(e.to_string()))?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GitHubClient::new(None);
        assert_eq!(client.graphql_url().as_str(), DEFAULT_GRAPHQL_URL);
        assert_eq!(client.rest_url().as_str(), DEFAULT_REST_URL);
    }

    #[test]
    fn test_custom_base_urls() {
        let client = GitHubClient::with_base_urls(
            "https://github.example.com/api/graphql",
            "https://github.example.com/api/v3/",
            Some("secret".to_string()),
        )
        .unwrap();
        assert_eq!(
            client.rest_url().join("repos/octo/hello/forks").unwrap().as_str(),
            "https://github.example.com/api/v3/repos/octo/hello/forks"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(GitHubClient::with_base_urls("not a url", DEFAULT_REST_URL, None).is_err());
    }
}
