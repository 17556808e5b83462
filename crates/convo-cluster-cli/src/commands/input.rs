//! Shared input loading for commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing::debug;

use convo_cluster_core::{ClusterRequest, ClusteringConfig};

/// Path argument that means "read standard input".
pub const STDIN_MARKER: &str = "-";

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_MARKER
}

/// Load the effective configuration: file (or defaults), then env overrides.
pub fn load_config(path: Option<&Path>) -> Result<ClusteringConfig> {
    let config = match path {
        Some(path) => ClusteringConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ClusteringConfig::default(),
    }
    .with_env_overrides();

    config.validate().context("validating configuration")?;
    debug!(?config, "configuration loaded");
    Ok(config)
}

/// Read and parse one request document.
pub async fn read_request(path: &Path) -> Result<ClusterRequest> {
    let raw = if is_stdin(path) {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("reading request from stdin")?;
        buffer
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading request {}", path.display()))?
    };

    let request: ClusterRequest = serde_json::from_str(&raw)
        .with_context(|| format!("parsing request {}", display_name(path)))?;
    debug!(
        input = %display_name(path),
        records = request.conversations.len(),
        "request parsed"
    );
    Ok(request)
}

/// Human-readable name of an input.
pub fn display_name(path: &Path) -> String {
    if is_stdin(path) {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

/// `<dir>/<input-stem>.clusters.json`
pub fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = if is_stdin(input) {
        "stdin".to_string()
    } else {
        input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "request".to_string())
    };
    dir.join(format!("{stem}.clusters.json"))
}
