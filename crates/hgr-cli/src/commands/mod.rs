pub mod coarsen;
pub mod compress;
pub mod evaluate;
pub mod info;
pub mod project;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use hgr_core::NodeId;
use hgr_graph::{read_hmetis, GraphConfig, HyperGraph};
use tracing::debug;

/// Options shared by every command that loads an hMETIS graph.
#[derive(Args, Debug)]
pub struct GraphInput {
    /// Input graph in hMETIS format.
    #[arg(long = "in")]
    pub input: PathBuf,
    /// YAML file with `node_weight_factor` / `edge_weight_factor`.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl GraphInput {
    pub fn load(&self) -> Result<HyperGraph, Box<dyn Error>> {
        let config = match &self.config {
            Some(path) => load_config(path)?,
            None => GraphConfig::default(),
        };
        Ok(read_hmetis(&self.input, config)?)
    }
}

pub fn load_config(path: &Path) -> Result<GraphConfig, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    let config: GraphConfig = serde_yaml::from_str(&contents)?;
    config.validate()?;
    debug!(path = %path.display(), ?config, "loaded graph configuration");
    Ok(config)
}

/// Reads one cluster per line as whitespace separated 0-based node ids.
///
/// Blank lines and `%` comments are skipped.
pub fn read_clusters(path: &Path) -> Result<Vec<Vec<NodeId>>, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    parse_clusters(&contents)
}

fn parse_clusters(contents: &str) -> Result<Vec<Vec<NodeId>>, Box<dyn Error>> {
    let mut clusters = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let members = line
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<u64>()
                    .map(NodeId::from_raw)
                    .map_err(|err| format!("cluster file line {}: {token:?}: {err}", idx + 1))
            })
            .collect::<Result<Vec<_>, _>>()?;
        clusters.push(members);
    }
    Ok(clusters)
}

pub fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
