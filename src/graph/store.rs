//! In-memory co-participation graph
//!
//! Holds the three maps built by the edge aggregator:
//! - nodes: PersonId -> PersonNode, in first-encounter order
//! - edges: (source, target, relation) -> year -> count
//! - participation: (PersonId, year) -> number of defenses

use super::edge::{EdgeCounts, EdgeKey, EdgeRow};
use super::node::{NodeMetrics, PersonNode};
use super::types::{Participant, PersonId, Relation, Role, Year};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Person {0} not found")]
    PersonNotFound(PersonId),

    #[error("Dangling {relation} edge {from} -> {to}")]
    DanglingEdge {
        from: PersonId,
        to: PersonId,
        relation: Relation,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Outcome of external-node pruning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneStats {
    pub nodes_removed: usize,
    pub edges_removed: usize,
}

/// Role-annotated, year-weighted multigraph of thesis participants
#[derive(Debug, Clone, Default)]
pub struct CoGraph {
    nodes: IndexMap<PersonId, PersonNode>,
    edges: FxHashMap<EdgeKey, EdgeCounts>,
    participation: FxHashMap<(PersonId, Year), u64>,
}

impl CoGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a person or upgrade their role. The first name seen is kept.
    pub fn register(&mut self, participant: &Participant, role: Role) -> &mut PersonNode {
        let node = self
            .nodes
            .entry(participant.id.clone())
            .or_insert_with(|| PersonNode::new(participant.id.clone(), participant.name.clone(), role));
        node.merge_role(role);
        node
    }

    /// Add one occurrence of `key` in `year`
    pub fn add_edge(&mut self, key: EdgeKey, year: Year) {
        self.edges.entry(key).or_default().increment(year);
    }

    /// Count one defense for `id` in `year`
    pub fn tally(&mut self, id: &PersonId, year: Year) {
        *self.participation.entry((id.clone(), year)).or_insert(0) += 1;
    }

    /// Fold another partial graph into this one.
    ///
    /// Nodes keep the name from `self` when both sides know the person and
    /// append in `other`'s order otherwise; roles merge by priority; edge
    /// and tally counts add. Merging partial graphs of consecutive record
    /// chunks in order yields the same graph as one sequential scan.
    pub fn merge(&mut self, other: CoGraph) {
        for (id, node) in other.nodes {
            match self.nodes.get_mut(&id) {
                Some(existing) => existing.absorb(&node),
                None => {
                    self.nodes.insert(id, node);
                }
            }
        }
        for (key, counts) in other.edges {
            self.edges.entry(key).or_default().merge(&counts);
        }
        for (key, count) in other.participation {
            *self.participation.entry(key).or_insert(0) += count;
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct (pair, relation) edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: &PersonId) -> Option<&PersonNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in first-encounter order
    pub fn nodes(&self) -> impl Iterator<Item = &PersonNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&EdgeKey, &EdgeCounts)> {
        self.edges.iter()
    }

    pub fn edge_counts(&self, key: &EdgeKey) -> Option<&EdgeCounts> {
        self.edges.get(key)
    }

    /// Defenses `id` took part in during `year`
    pub fn participation(&self, id: &PersonId, year: Year) -> u64 {
        self.participation.get(&(id.clone(), year)).copied().unwrap_or(0)
    }

    pub fn participation_entries(&self) -> impl Iterator<Item = (&(PersonId, Year), &u64)> {
        self.participation.iter()
    }

    /// One row per (pair, relation, year), sorted by source, target, year, label
    pub fn edge_rows(&self) -> Vec<EdgeRow> {
        let mut rows: Vec<EdgeRow> = self
            .edges
            .iter()
            .flat_map(|(key, counts)| {
                counts.iter().map(move |(year, weight)| EdgeRow {
                    source: key.source.clone(),
                    target: key.target.clone(),
                    relation: key.relation,
                    year,
                    weight,
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            a.source
                .cmp(&b.source)
                .then_with(|| a.target.cmp(&b.target))
                .then_with(|| a.year.cmp(&b.year))
                .then_with(|| a.relation.as_str().cmp(b.relation.as_str()))
        });
        rows
    }

    /// Undirected weight per unordered pair, summed across relations and years.
    ///
    /// Returned sorted by pair so callers get a reproducible edge order.
    pub fn pair_weights(&self) -> Vec<(PersonId, PersonId, u64)> {
        let mut pairs: BTreeMap<(&PersonId, &PersonId), u64> = BTreeMap::new();
        for (key, counts) in &self.edges {
            *pairs.entry(key.undirected_pair()).or_insert(0) += counts.total();
        }
        pairs
            .into_iter()
            .map(|((a, b), w)| (a.clone(), b.clone(), w))
            .collect()
    }

    /// Drop every external person and every edge that no longer has both endpoints.
    ///
    /// Must run after all records are aggregated, once roles are final.
    pub fn prune_external(&mut self) -> PruneStats {
        let before_nodes = self.nodes.len();
        self.nodes.retain(|_, node| !node.is_external());

        let before_edges = self.edges.len();
        let nodes = &self.nodes;
        self.edges
            .retain(|key, _| nodes.contains_key(&key.source) && nodes.contains_key(&key.target));

        PruneStats {
            nodes_removed: before_nodes - self.nodes.len(),
            edges_removed: before_edges - self.edges.len(),
        }
    }

    /// Attach analytics output to a node
    pub fn set_metrics(&mut self, id: &PersonId, metrics: NodeMetrics) -> GraphResult<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::PersonNotFound(id.clone()))?;
        node.metrics = Some(metrics);
        Ok(())
    }

    /// Check that every edge endpoint is a known person
    pub fn validate(&self) -> GraphResult<()> {
        for key in self.edges.keys() {
            if !self.contains(&key.source) || !self.contains(&key.target) {
                return Err(GraphError::DanglingEdge {
                    from: key.source.clone(),
                    to: key.target.clone(),
                    relation: key.relation,
                });
            }
        }
        Ok(())
    }
}
