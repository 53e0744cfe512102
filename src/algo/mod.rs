//! Graph analytics adapter
//!
//! The algorithms live in the `jurygraph-algorithms` crate and work on a
//! dense [`GraphView`]. This module projects a [`CoGraph`] onto that view
//! and writes layout, betweenness and cluster ids back onto the nodes.

use crate::config::{CentralitySettings, CommunitySettings, PipelineConfig};
use crate::graph::{CoGraph, GraphResult, NodeMetrics, PersonId};
use jurygraph_algorithms::GraphView;
use std::collections::HashMap;
use tracing::info;

// Re-export algorithms
pub use jurygraph_algorithms::{
    betweenness_centrality, BetweennessConfig,
    louvain_communities, CommunityResult, LouvainConfig,
    spring_layout, SpringLayoutConfig,
};

impl From<&CentralitySettings> for BetweennessConfig {
    fn from(settings: &CentralitySettings) -> Self {
        BetweennessConfig {
            weighted: settings.weighted,
            normalized: false,
        }
    }
}

impl From<&CommunitySettings> for LouvainConfig {
    fn from(settings: &CommunitySettings) -> Self {
        LouvainConfig {
            resolution: settings.resolution,
            threshold: settings.threshold,
            seed: settings.seed,
        }
    }
}

/// Undirected projection of a graph together with the identity of each view node
pub struct Projection {
    pub view: GraphView,
    /// PersonId of view node `i`
    pub people: Vec<PersonId>,
}

impl Projection {
    pub fn person(&self, idx: usize) -> Option<&PersonId> {
        self.people.get(idx)
    }
}

/// Build the weighted simple graph used by every analytic.
///
/// Nodes keep the graph's first-encounter order, so isolated people are
/// present too. Each unordered pair gets the sum of its counts across
/// relations and years.
pub fn build_view(graph: &CoGraph) -> Projection {
    let people: Vec<PersonId> = graph.nodes().map(|n| n.id.clone()).collect();
    let index: HashMap<&PersonId, usize> = people.iter().enumerate().map(|(i, id)| (id, i)).collect();

    let edges: Vec<(usize, usize, f64)> = graph
        .pair_weights()
        .into_iter()
        .filter_map(|(a, b, weight)| match (index.get(&a), index.get(&b)) {
            (Some(&u), Some(&v)) => Some((u, v, weight as f64)),
            _ => None,
        })
        .collect();

    let view = GraphView::from_undirected_edges(people.len(), &edges);
    Projection { view, people }
}

/// What the analytics stage produced
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalyticsSummary {
    pub nodes: usize,
    /// Undirected pairs in the projection
    pub pairs: usize,
    /// Number of communities, when detection ran
    pub communities: Option<usize>,
    pub modularity: Option<f64>,
}

/// Compute layout, betweenness and clusters and store them on every node
pub fn annotate(graph: &mut CoGraph, config: &PipelineConfig) -> GraphResult<AnalyticsSummary> {
    let projection = build_view(graph);
    let view = &projection.view;
    let n = view.node_count;

    let layout_config = SpringLayoutConfig {
        k: config.layout.k_for(n),
        iterations: config.layout.iterations,
        seed: config.layout.seed,
        ..Default::default()
    };
    let positions = spring_layout(view, &layout_config);
    let centrality = betweenness_centrality(view, &BetweennessConfig::from(&config.centrality));
    let communities = if config.community.enabled {
        Some(louvain_communities(view, &LouvainConfig::from(&config.community)))
    } else {
        None
    };

    for (idx, person) in projection.people.iter().enumerate() {
        let (x, y) = positions.get(idx).copied().unwrap_or((0.0, 0.0));
        let metrics = NodeMetrics {
            weight: centrality.get(idx).copied().unwrap_or(0.0),
            x,
            y,
            cluster: communities
                .as_ref()
                .and_then(|c| c.node_community.get(idx).copied()),
        };
        graph.set_metrics(person, metrics)?;
    }

    let summary = AnalyticsSummary {
        nodes: n,
        pairs: view.adjacency_len() / 2,
        communities: communities.as_ref().map(|c| c.communities.len()),
        modularity: communities.as_ref().map(|c| c.modularity),
    };
    info!(
        "Analytics: {} nodes, {} pairs, {:?} communities",
        summary.nodes, summary.pairs, summary.communities
    );
    Ok(summary)
}
