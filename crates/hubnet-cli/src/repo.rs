// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Repository subcommands

use clap::Args;
use hubnet_api_contract::{RepoCreateInput, RepoRef, RepoVisibility, Repository};
use hubnet_client::{GitHubClient, create_repository, fetch_repository, fork_repository, repo_network};

/// Arguments for the view command
#[derive(Args)]
#[command(about = "Look up a single repository")]
pub struct ViewArgs {
    /// Repository to inspect, as OWNER/NAME
    pub repo: String,

    /// Output in JSON format
    #[arg(long, help = "Output in JSON format")]
    json: bool,
}

impl ViewArgs {
    pub async fn run(self, client: &GitHubClient) -> anyhow::Result<()> {
        let repo_ref: RepoRef = self.repo.parse()?;
        let repo = fetch_repository(client, &repo_ref).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&repo)?);
        } else {
            println!("{}", repo_ref.full_name());
            println!("  id:     {}", repo.id);
            println!("  issues: {}", if repo.has_issues_enabled { "enabled" } else { "disabled" });
        }
        Ok(())
    }
}

/// Arguments for the network command
#[derive(Args)]
#[command(about = "Fetch the viewer and a batch of repositories in one round trip")]
pub struct NetworkArgs {
    /// Repositories to fetch, as OWNER/NAME
    pub repos: Vec<String>,

    /// Output in JSON format
    #[arg(long, help = "Output in JSON format")]
    json: bool,
}

impl NetworkArgs {
    pub async fn run(self, client: &GitHubClient) -> anyhow::Result<()> {
        let refs = self
            .repos
            .iter()
            .map(|r| r.parse())
            .collect::<Result<Vec<RepoRef>, _>>()?;
        let result = repo_network(client, &refs).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        println!("viewer: {}", result.viewer_login);
        for (repo_ref, repo) in refs.iter().zip(&result.repositories) {
            match repo {
                Some(repo) => println!("{}  {}", repo_ref.full_name(), describe(repo)),
                None => println!("{}  not found", repo_ref.full_name()),
            }
        }
        Ok(())
    }
}

fn describe(repo: &Repository) -> String {
    let mut parts = Vec::new();
    if let Some(branch) = repo.default_branch() {
        parts.push(branch.to_string());
    }
    if repo.is_private {
        parts.push("private".to_string());
    }
    if let Some(parent) = repo.parent.as_deref() {
        parts.push(format!("fork of {}", parent.full_name()));
    }
    parts.join(", ")
}

/// Arguments for the fork command
#[derive(Args)]
#[command(about = "Fork a repository for the current viewer")]
pub struct ForkArgs {
    /// Repository to fork, as OWNER/NAME
    pub repo: String,
}

impl ForkArgs {
    pub async fn run(self, client: &GitHubClient) -> anyhow::Result<()> {
        let repo_ref: RepoRef = self.repo.parse()?;
        let fork = fork_repository(client, &repo_ref).await?;
        println!("forked {} to {}", repo_ref.full_name(), fork.full_name());
        if let Some(clone_url) = &fork.clone_url {
            println!("  clone: {clone_url}");
        }
        Ok(())
    }
}

/// Arguments for the create command
#[derive(Args)]
#[command(about = "Create a new repository")]
pub struct CreateArgs {
    /// Name of the repository to create
    pub name: String,

    /// Repository visibility
    #[arg(long, value_enum, default_value_t = CreateVisibility::Public)]
    visibility: CreateVisibility,

    /// Repository description
    #[arg(long)]
    description: Option<String>,

    /// Repository home page URL
    #[arg(long)]
    homepage: Option<String>,

    /// Organization login that will own the repository
    #[arg(long)]
    org: Option<String>,

    /// Team slug granted access (requires --org)
    #[arg(long, requires = "org")]
    team: Option<String>,

    /// Disable the issue tracker
    #[arg(long)]
    no_issues: bool,

    /// Disable the wiki
    #[arg(long)]
    no_wiki: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum CreateVisibility {
    Public,
    Private,
    Internal,
}

impl From<CreateVisibility> for RepoVisibility {
    fn from(visibility: CreateVisibility) -> Self {
        match visibility {
            CreateVisibility::Public => RepoVisibility::Public,
            CreateVisibility::Private => RepoVisibility::Private,
            CreateVisibility::Internal => RepoVisibility::Internal,
        }
    }
}

impl CreateArgs {
    pub async fn run(self, client: &GitHubClient) -> anyhow::Result<()> {
        let input = RepoCreateInput {
            name: self.name,
            visibility: self.visibility.into(),
            description: self.description,
            homepage: self.homepage,
            owner_id: self.org,
            team_id: self.team,
            has_issues_enabled: !self.no_issues,
            has_wiki_enabled: !self.no_wiki,
        };
        let repo = create_repository(client, input).await?;
        println!("created {}", repo.full_name());
        if let Some(url) = &repo.url {
            println!("  {url}");
        }
        Ok(())
    }
}
