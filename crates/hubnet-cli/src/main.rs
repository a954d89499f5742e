// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use hubnet_cli::{Cli, Commands, Parser};
use hubnet_client::GitHubClient;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    cli.logging.clone().init("hubnet")?;

    let client = GitHubClient::new(cli.token.clone());

    match cli.command {
        Commands::View(args) => args.run(&client).await,
        Commands::Network(args) => args.run(&client).await,
        Commands::Fork(args) => args.run(&client).await,
        Commands::Create(args) => args.run(&client).await,
    }
}
