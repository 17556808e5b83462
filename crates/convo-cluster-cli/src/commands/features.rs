//! `features` command: show the attribute columns a request encodes into.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use convo_cluster_core::describe_features;

use super::input::read_request;

/// Arguments for `features`
#[derive(Args, Debug)]
pub struct FeaturesArgs {
    /// Request JSON file (`-` reads standard input)
    pub input: PathBuf,
}

pub async fn features_command(args: FeaturesArgs) -> Result<()> {
    let request = read_request(&args.input).await?;
    let report = describe_features(&request.conversations);
    let json = serde_json::to_string_pretty(&report).context("serializing feature report")?;
    println!("{json}");
    Ok(())
}
