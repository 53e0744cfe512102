//! JSON dataset export
//!
//! The dataset has two arrays: `nodes`, one object per person in
//! first-encounter order, and `edges`, one row per (pair, relation, year).

use crate::error::JuryGraphResult;
use crate::graph::{CoGraph, EdgeRow, PersonId, Relation, Role, Year};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub key: PersonId,
    /// Display name
    pub label: String,
    /// Betweenness centrality
    pub weight: f64,
    pub role: Role,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cluster: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: PersonId,
    pub target: PersonId,
    pub label: Relation,
    pub weight: u64,
    pub year: Year,
}

impl From<EdgeRow> for EdgeRecord {
    fn from(row: EdgeRow) -> Self {
        EdgeRecord {
            source: row.source,
            target: row.target,
            label: row.relation,
            weight: row.weight,
            year: row.year,
        }
    }
}

/// The node/edge document written at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl Dataset {
    /// Snapshot a graph. Nodes without analytics get zero weight at the origin.
    pub fn from_graph(graph: &CoGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| {
                let metrics = node.metrics;
                NodeRecord {
                    key: node.id.clone(),
                    label: node.name.clone(),
                    weight: metrics.map_or(0.0, |m| m.weight),
                    role: node.role,
                    x: metrics.map_or(0.0, |m| m.x),
                    y: metrics.map_or(0.0, |m| m.y),
                    cluster: metrics.and_then(|m| m.cluster),
                }
            })
            .collect();
        let edges = graph.edge_rows().into_iter().map(EdgeRecord::from).collect();
        Dataset { nodes, edges }
    }

    pub fn to_json_pretty(&self) -> JuryGraphResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write to `dir/file_name`, creating `dir` when missing. Returns the written path.
    pub fn write(&self, dir: impl AsRef<Path>, file_name: &str) -> JuryGraphResult<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        fs::write(&path, self.to_json_pretty()?)?;
        info!(
            "Saved {} nodes and {} edges to {}",
            self.nodes.len(),
            self.edges.len(),
            path.display()
        );
        Ok(path)
    }

    pub fn load(path: impl AsRef<Path>) -> JuryGraphResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeKey, NodeMetrics, Participant};

    fn graph() -> CoGraph {
        let mut graph = CoGraph::new();
        graph.register(&Participant::new("S", "Ada Lovelace"), Role::PhdStudent);
        graph.register(&Participant::new("X", "Charles Babbage"), Role::Advisor);
        graph.add_edge(EdgeKey::supervizes(&PersonId::new("X"), &PersonId::new("S")), 2020);
        graph
    }

    #[test]
    fn test_field_names() {
        let mut graph = graph();
        graph
            .set_metrics(
                &PersonId::new("S"),
                NodeMetrics { weight: 0.5, x: 0.1, y: -0.2, cluster: Some(3) },
            )
            .unwrap();
        let value = serde_json::to_value(Dataset::from_graph(&graph)).unwrap();

        let node = &value["nodes"][0];
        assert_eq!(node["key"], "S");
        assert_eq!(node["label"], "Ada Lovelace");
        assert_eq!(node["role"], "phd_student");
        assert_eq!(node["weight"], 0.5);
        assert_eq!(node["cluster"], 3);

        // No analytics on X: no cluster field
        assert!(value["nodes"][1].get("cluster").is_none());

        let edge = &value["edges"][0];
        assert_eq!(edge["source"], "X");
        assert_eq!(edge["target"], "S");
        assert_eq!(edge["label"], "supervizes");
        assert_eq!(edge["weight"], 1);
        assert_eq!(edge["year"], 2020);
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let dataset = Dataset::from_graph(&graph());

        let path = dataset.write(&out, "dataset.json").unwrap();
        assert!(path.exists());

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n  \"nodes\""));
        assert_eq!(Dataset::load(&path).unwrap(), dataset);
    }
}
