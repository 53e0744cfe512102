//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

/// A dense, integer-indexed view of an undirected graph in Compressed Sparse Row (CSR) format.
///
/// Nodes are `0..node_count`. Every edge is stored in both endpoints'
/// adjacency rows, and algorithm results are indexed the same way.
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Offsets into `targets`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    pub targets: Vec<usize>,
    /// Edge weights, aligned with `targets`
    pub weights: Vec<f64>,
}

impl GraphView {
    /// Number of adjacency entries of a node
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Neighbors of a node
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.targets[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// Weights of a node's adjacency entries
    pub fn weights(&self, idx: usize) -> &[f64] {
        &self.weights[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// Neighbors paired with their edge weight
    pub fn weighted_neighbors(&self, idx: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.neighbors(idx)
            .iter()
            .copied()
            .zip(self.weights(idx).iter().copied())
    }

    /// Sum of edge weights of a node
    pub fn weighted_degree(&self, idx: usize) -> f64 {
        self.weights(idx).iter().sum()
    }

    /// Number of stored adjacency entries (each undirected edge counts twice)
    pub fn adjacency_len(&self) -> usize {
        self.targets.len()
    }

    /// Build an undirected view over `node_count` nodes from a weighted edge list.
    ///
    /// Self-loops are dropped. Each `(u, v, w)` is stored in both rows, in
    /// the order edges are given, so results are deterministic for a
    /// deterministic edge list.
    pub fn from_undirected_edges(node_count: usize, edges: &[(usize, usize, f64)]) -> Self {
        let mut offsets = vec![0; node_count + 1];
        for &(u, v, _) in edges {
            if u != v {
                offsets[u + 1] += 1;
                offsets[v + 1] += 1;
            }
        }
        for i in 0..node_count {
            offsets[i + 1] += offsets[i];
        }

        let len = offsets[node_count];
        let mut targets = vec![0; len];
        let mut weights = vec![0.0; len];
        let mut cursor = offsets[..node_count].to_vec();
        for &(u, v, w) in edges {
            if u == v {
                continue;
            }
            for (from, to) in [(u, v), (v, u)] {
                let slot = cursor[from];
                targets[slot] = to;
                weights[slot] = w;
                cursor[from] += 1;
            }
        }

        GraphView {
            node_count,
            offsets,
            targets,
            weights,
        }
    }
}
