//! Person node of the co-participation graph

use super::types::{PersonId, Role};
use serde::{Deserialize, Serialize};

/// Per-node output of graph analytics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
    /// Unnormalized betweenness centrality
    pub weight: f64,
    pub x: f64,
    pub y: f64,
    /// Community index, absent when detection did not run
    pub cluster: Option<usize>,
}

/// A person in the graph
///
/// Created the first time an identity is met while scanning records. The
/// display name is the one from that first record; the role only ever moves
/// up in priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonNode {
    pub id: PersonId,
    pub name: String,
    pub role: Role,
    pub metrics: Option<NodeMetrics>,
}

impl PersonNode {
    pub fn new(id: PersonId, name: impl Into<String>, role: Role) -> Self {
        PersonNode {
            id,
            name: name.into(),
            role,
            metrics: None,
        }
    }

    /// Upgrade the role if `candidate` ranks higher
    pub fn merge_role(&mut self, candidate: Role) {
        self.role = self.role.merge(candidate);
    }

    /// Fold another sighting of the same person into this node
    pub fn absorb(&mut self, other: &PersonNode) {
        debug_assert_eq!(self.id, other.id);
        self.merge_role(other.role);
    }

    pub fn is_external(&self) -> bool {
        self.role.is_external()
    }
}

impl PartialEq for PersonNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.role == other.role
    }
}
