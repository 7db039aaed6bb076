use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use super::parse::parse_snapshot;
use super::snapshot::GraphSnapshot;

pub fn load_snapshot(path: &Path) -> Result<GraphSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph snapshot {}", path.display()))?;
    let snapshot = parse_snapshot(&raw)
        .with_context(|| format!("failed to parse graph snapshot {}", path.display()))?;

    info!(
        "loaded {} nodes and {} edges from {}",
        snapshot.node_count(),
        snapshot.edge_count(),
        path.display()
    );
    Ok(snapshot)
}
