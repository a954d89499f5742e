// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use clap::Subcommand;
use hubnet_logging::CliLoggingArgs;

pub mod repo;

pub use clap::Parser;

#[derive(clap::Parser)]
#[command(
    name = "hubnet",
    about = "GitHub repository network client",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// API token sent in the Authorization header
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    #[command(flatten)]
    pub logging: CliLoggingArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up a single repository
    View(repo::ViewArgs),
    /// Fetch the viewer and a batch of repositories in one round trip
    Network(repo::NetworkArgs),
    /// Fork a repository for the current viewer
    Fork(repo::ForkArgs),
    /// Create a new repository
    Create(repo::CreateArgs),
}
