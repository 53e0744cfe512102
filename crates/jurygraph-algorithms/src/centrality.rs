//! Betweenness centrality
//!
//! Brandes' accumulation over single-source shortest-path DAGs. Sources are
//! processed in parallel over fixed-size chunks and the partial sums are
//! added in chunk order, so the result does not depend on thread scheduling.

use super::common::GraphView;
use super::pathfinding::shortest_path_dag;
use rayon::prelude::*;

const SOURCE_CHUNK: usize = 64;

/// Betweenness configuration
#[derive(Debug, Clone)]
pub struct BetweennessConfig {
    /// Use edge weights as distances (otherwise every edge costs 1)
    pub weighted: bool,
    /// Scale by 1 / ((n-1)(n-2)) for undirected graphs
    pub normalized: bool,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        Self {
            weighted: true,
            normalized: false,
        }
    }
}

/// Betweenness centrality of every node of an undirected view.
///
/// Scores are indexed like the view's nodes. Each unordered pair is counted
/// once, matching the usual undirected definition (the raw Brandes sums are
/// halved).
pub fn betweenness_centrality(view: &GraphView, config: &BetweennessConfig) -> Vec<f64> {
    let n = view.node_count;
    if n == 0 {
        return Vec::new();
    }

    let sources: Vec<usize> = (0..n).collect();
    let partials: Vec<Vec<f64>> = sources
        .par_chunks(SOURCE_CHUNK)
        .map(|chunk| {
            let mut partial = vec![0.0; n];
            for &s in chunk {
                accumulate_source(view, s, config.weighted, &mut partial);
            }
            partial
        })
        .collect();

    let mut scores = vec![0.0; n];
    for partial in partials {
        for (score, p) in scores.iter_mut().zip(partial) {
            *score += p;
        }
    }

    let scale = if config.normalized {
        if n <= 2 {
            None
        } else {
            Some(1.0 / ((n - 1) * (n - 2)) as f64)
        }
    } else {
        Some(0.5)
    };
    if let Some(scale) = scale {
        for score in scores.iter_mut() {
            *score *= scale;
        }
    }

    scores
}

fn accumulate_source(view: &GraphView, source: usize, weighted: bool, scores: &mut [f64]) {
    let dag = shortest_path_dag(view, source, weighted);
    let mut delta = vec![0.0; view.node_count];

    for &w in dag.order.iter().rev() {
        let coeff = (1.0 + delta[w]) / dag.sigma[w];
        for &v in &dag.predecessors[w] {
            delta[v] += dag.sigma[v] * coeff;
        }
        if w != source {
            scores[w] += delta[w];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_graph() {
        // 0 - 1 - 2: node 1 lies on the single 0..2 path
        let view = GraphView::from_undirected_edges(3, &[(0, 1, 1.0), (1, 2, 1.0)]);
        let scores = betweenness_centrality(&view, &BetweennessConfig::default());

        assert_eq!(scores, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_star_graph() {
        // Center 0 with leaves 1..4: C(4,2) = 6 pairs route through the center
        let view = GraphView::from_undirected_edges(
            5,
            &[(0, 1, 1.0), (0, 2, 1.0), (0, 3, 1.0), (0, 4, 1.0)],
        );
        let scores = betweenness_centrality(&view, &BetweennessConfig::default());
        assert_eq!(scores[0], 6.0);
        assert_eq!(scores[3], 0.0);
    }

    #[test]
    fn test_weights_reroute_paths() {
        // Triangle a-b (1), b-c (1), a-c (5): weighted, a..c goes through b
        let view = GraphView::from_undirected_edges(
            3,
            &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 5.0)],
        );
        let weighted = betweenness_centrality(&view, &BetweennessConfig::default());
        assert_eq!(weighted[1], 1.0);

        let unweighted = betweenness_centrality(
            &view,
            &BetweennessConfig { weighted: false, normalized: false },
        );
        assert_eq!(unweighted[1], 0.0);
    }

    #[test]
    fn test_split_paths_share_credit() {
        // Square 0-1-3, 0-2-3: both middles get half of the 0..3 pair
        let view = GraphView::from_undirected_edges(
            4,
            &[(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)],
        );
        let scores = betweenness_centrality(&view, &BetweennessConfig::default());
        assert_eq!(scores[1], 0.5);
        assert_eq!(scores[2], 0.5);
    }

    #[test]
    fn test_degenerate_graphs() {
        let empty = GraphView::from_undirected_edges(0, &[]);
        assert!(betweenness_centrality(&empty, &BetweennessConfig::default()).is_empty());

        let single = GraphView::from_undirected_edges(1, &[]);
        let scores = betweenness_centrality(&single, &BetweennessConfig::default());
        assert_eq!(scores, vec![0.0]);
    }

    #[test]
    fn test_normalized_scale() {
        let view = GraphView::from_undirected_edges(3, &[(0, 1, 1.0), (1, 2, 1.0)]);
        let scores = betweenness_centrality(
            &view,
            &BetweennessConfig { weighted: true, normalized: true },
        );
        // raw sum 2 over ordered pairs, scaled by 1/(2*1)
        assert_eq!(scores[1], 1.0);
    }
}
