//! `config` command: print the effective configuration as TOML.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::input::load_config;

/// Arguments for `config`
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// TOML configuration file; defaults apply when omitted
    #[arg(long, env = "CONVO_CLUSTER_CONFIG")]
    pub config: Option<PathBuf>,
}

pub fn config_command(args: ConfigArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let toml = config.to_toml_string().context("rendering configuration")?;
    print!("{toml}");
    Ok(())
}
