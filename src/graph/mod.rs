//! Co-participation graph data model
//!
//! This module implements:
//! - Person identities and display roles with priority merging
//! - Directed supervision/examination edges and undirected shared-jury edges
//! - Per-year occurrence counts and per-person participation tallies

pub mod edge;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::{EdgeCounts, EdgeKey, EdgeRow};
pub use node::{NodeMetrics, PersonNode};
pub use store::{CoGraph, GraphError, GraphResult, PruneStats};
pub use types::{Participant, PersonId, Relation, Role, Year};
