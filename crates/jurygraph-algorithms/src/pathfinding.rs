//! Pathfinding algorithms
//!
//! Single-source Dijkstra that keeps every shortest path, as needed by
//! betweenness centrality.

use super::common::GraphView;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// State for Dijkstra priority queue
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    /// Push order, breaks cost ties so settling order is reproducible
    seq: usize,
    pred: usize,
    node_idx: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare costs reversed for min-heap
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// All shortest paths from one source, as a predecessor DAG
#[derive(Debug, Clone)]
pub struct ShortestPathDag {
    /// Source node index
    pub source: usize,
    /// Settled nodes in non-decreasing distance order
    pub order: Vec<usize>,
    /// Number of shortest paths from the source to each node
    pub sigma: Vec<f64>,
    /// Predecessors of each node on its shortest paths
    pub predecessors: Vec<Vec<usize>>,
    /// Distance from the source (`f64::INFINITY` when unreachable)
    pub distance: Vec<f64>,
}

/// Dijkstra's Algorithm recording every shortest path from `source_idx`.
///
/// Uses edge weights from GraphView when `weighted` is set, otherwise every
/// edge costs 1.0. Negative weights are skipped.
pub fn shortest_path_dag(view: &GraphView, source_idx: usize, weighted: bool) -> ShortestPathDag {
    let n = view.node_count;
    let mut order = Vec::with_capacity(n);
    let mut sigma = vec![0.0; n];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut distance = vec![f64::INFINITY; n];
    let mut seen = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();
    let mut seq = 0;

    seen[source_idx] = 0.0;
    heap.push(State { cost: 0.0, seq, pred: source_idx, node_idx: source_idx });

    while let Some(State { cost, pred, node_idx, .. }) = heap.pop() {
        if settled[node_idx] {
            continue;
        }
        settled[node_idx] = true;
        sigma[node_idx] = if node_idx == source_idx {
            1.0
        } else {
            sigma[node_idx] + sigma[pred]
        };
        distance[node_idx] = cost;
        order.push(node_idx);

        for (next_idx, weight) in view.weighted_neighbors(node_idx) {
            let weight = if weighted { weight } else { 1.0 };
            if weight < 0.0 {
                continue;
            }
            let next_cost = cost + weight;

            if settled[next_idx] {
                continue;
            }
            if next_cost < seen[next_idx] {
                seen[next_idx] = next_cost;
                seq += 1;
                heap.push(State { cost: next_cost, seq, pred: node_idx, node_idx: next_idx });
                sigma[next_idx] = 0.0;
                predecessors[next_idx] = vec![node_idx];
            } else if next_cost == seen[next_idx] {
                sigma[next_idx] += sigma[node_idx];
                predecessors[next_idx].push(node_idx);
            }
        }
    }

    ShortestPathDag {
        source: source_idx,
        order,
        sigma,
        predecessors,
        distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::GraphView;

    #[test]
    fn test_weighted_dag() {
        // 1-2 (10.0), 2-3 (5.0), 1-3 (50.0)
        let view = GraphView::from_undirected_edges(
            3,
            &[(0, 1, 10.0), (1, 2, 5.0), (0, 2, 50.0)],
        );

        let dag = shortest_path_dag(&view, 0, true);
        assert_eq!(dag.order, vec![0, 1, 2]);
        assert_eq!(dag.distance[2], 15.0);
        assert_eq!(dag.predecessors[2], vec![1]);
        assert_eq!(dag.sigma[2], 1.0);
    }

    #[test]
    fn test_counts_equal_paths() {
        // Diamond: 0-1, 0-2, 1-3, 2-3 all weight 1 -> two paths 0..3
        let view = GraphView::from_undirected_edges(
            4,
            &[(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)],
        );

        let dag = shortest_path_dag(&view, 0, true);
        assert_eq!(dag.sigma[3], 2.0);
        let mut preds = dag.predecessors[3].clone();
        preds.sort();
        assert_eq!(preds, vec![1, 2]);
    }

    #[test]
    fn test_unweighted_ignores_weights() {
        let view = GraphView::from_undirected_edges(
            3,
            &[(0, 1, 10.0), (1, 2, 5.0), (0, 2, 50.0)],
        );

        let dag = shortest_path_dag(&view, 0, false);
        assert_eq!(dag.distance[2], 1.0);
        assert_eq!(dag.predecessors[2], vec![0]);
    }

    #[test]
    fn test_unreachable_stays_infinite() {
        let view = GraphView::from_undirected_edges(3, &[(0, 1, 1.0)]);
        let dag = shortest_path_dag(&view, 0, true);
        assert!(dag.distance[2].is_infinite());
        assert_eq!(dag.sigma[2], 0.0);
        assert_eq!(dag.order.len(), 2);
    }
}
