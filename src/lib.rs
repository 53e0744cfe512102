//! Jurygraph
//!
//! Turns thesis-defense records into a co-participation graph: people are
//! nodes, and edges record supervision, examination and shared juries,
//! counted per year.
//!
//! # Pipeline
//!
//! - `ingest`: CSV loading of the defense and reference tables
//! - `pipeline`: extraction, scope filter, name correction, frequency
//!   filter, edge aggregation, external-node pruning
//! - `algo`: spring layout, betweenness centrality, Louvain clusters
//! - `export`: the JSON node/edge dataset
//!
//! ## Example Usage
//!
//! ```rust
//! use jurygraph::ingest::{NameSlot, RawDefense, ReferenceRecord};
//! use jurygraph::{Dataset, Pipeline, PipelineConfig};
//!
//! let slot = |id: &str| NameSlot::new(Some(id), Some(id), None);
//! let defense = RawDefense {
//!     date: Some("2020-06-15".to_string()),
//!     author: slot("S"),
//!     directors: vec![slot("X")],
//!     jury_members: vec![slot("Y"), slot("Z")],
//!     ..Default::default()
//! };
//! let reference = ReferenceRecord { author: slot("S"), directors: vec![] };
//!
//! let config = PipelineConfig { min_occurrences: 1, ..Default::default() };
//! let output = Pipeline::new(config).run(&[defense], &[reference]).unwrap();
//! let dataset = Dataset::from_graph(&output.graph);
//! assert_eq!(dataset.nodes.len(), 4);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod ingest;
pub mod pipeline;

// Re-export main types for convenience
pub use config::PipelineConfig;
pub use error::{JuryGraphError, JuryGraphResult};
pub use export::{Dataset, EdgeRecord, NodeRecord};
pub use graph::{
    CoGraph, EdgeCounts, EdgeKey, EdgeRow, GraphError, GraphResult, NodeMetrics, Participant,
    PersonId, PersonNode, Relation, Role, Year,
};
pub use pipeline::{Pipeline, PipelineOutput, PipelineStats};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
