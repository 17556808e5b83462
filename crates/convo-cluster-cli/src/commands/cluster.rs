//! `cluster` command.
//!
//! Each request runs on its own blocking worker; requests share nothing but
//! the read-only configuration.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::info;

use convo_cluster_core::{ClusterResponse, ClusteringService};

use super::input::{display_name, is_stdin, load_config, output_path, read_request};

/// Arguments for `cluster`
#[derive(Args, Debug)]
pub struct ClusterArgs {
    /// Request JSON files (`-` reads standard input)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// TOML configuration supplying default weights and cluster counts
    #[arg(long, env = "CONVO_CLUSTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write `<stem>.clusters.json` per input into this directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn cluster_command(args: ClusterArgs) -> Result<()> {
    if args.inputs.len() > 1 && args.output_dir.is_none() {
        bail!("--output-dir is required when clustering more than one input");
    }
    if args.inputs.iter().filter(|p| is_stdin(p)).count() > 1 {
        bail!("standard input can only be read once");
    }

    let service = Arc::new(ClusteringService::new(load_config(args.config.as_deref())?));

    let mut workers = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let request = read_request(input).await?;
        let service = Arc::clone(&service);
        let handle = tokio::task::spawn_blocking(move || service.cluster(&request));
        workers.push((input, handle));
    }

    if let Some(dir) = &args.output_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }

    for (input, handle) in workers {
        let response = handle
            .await
            .context("clustering worker failed")?
            .with_context(|| format!("clustering {}", display_name(input)))?;
        let json = render(&response, args.pretty)?;

        match &args.output_dir {
            Some(dir) => {
                let path = output_path(dir, input);
                tokio::fs::write(&path, json)
                    .await
                    .with_context(|| format!("writing {}", path.display()))?;
                info!(
                    input = %display_name(input),
                    output = %path.display(),
                    clusters = response.cluster_stats.total_clusters,
                    "response written"
                );
            }
            None => println!("{json}"),
        }
    }

    Ok(())
}

fn render(response: &ClusterResponse, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    };
    json.context("serializing response")
}
