//! Community detection algorithms
//!
//! Louvain modularity optimization on undirected weighted graphs: repeated
//! local moving over a seeded node order followed by community aggregation,
//! stopping once a level no longer raises modularity by more than the
//! configured threshold.

use super::common::GraphView;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;

/// Louvain configuration
#[derive(Debug, Clone)]
pub struct LouvainConfig {
    /// Resolution parameter (1.0 = classic modularity)
    pub resolution: f64,
    /// Minimum modularity gain for another aggregation level
    pub threshold: f64,
    /// Seed for the node visiting order
    pub seed: u64,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            threshold: 1e-7,
            seed: 1234,
        }
    }
}

/// Result of community detection
#[derive(Debug, Clone)]
pub struct CommunityResult {
    /// Communities ordered by their first member in view order; members in view order
    pub communities: Vec<Vec<usize>>,
    /// Index into `communities` for each view node
    pub node_community: Vec<usize>,
    /// Modularity of the returned partition
    pub modularity: f64,
}

/// Aggregated graph for one Louvain level
struct LevelGraph {
    /// Neighbors without self loops, stored in both directions
    adjacency: Vec<Vec<(usize, f64)>>,
    self_loops: Vec<f64>,
    /// Original view indices folded into each level node
    members: Vec<Vec<usize>>,
}

impl LevelGraph {
    fn from_view(view: &GraphView) -> Self {
        let n = view.node_count;
        let mut adjacency = vec![Vec::new(); n];
        for (u, row) in adjacency.iter_mut().enumerate() {
            for (v, w) in view.weighted_neighbors(u) {
                if v != u {
                    row.push((v, w));
                }
            }
        }
        Self {
            adjacency,
            self_loops: vec![0.0; n],
            members: (0..n).map(|i| vec![i]).collect(),
        }
    }

    fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Weighted degree, self loops counted twice
    fn degree(&self, u: usize) -> f64 {
        self.adjacency[u].iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * self.self_loops[u]
    }

    /// Total edge weight, each edge counted once
    fn size(&self) -> f64 {
        let twice: f64 = self.adjacency.iter().flatten().map(|&(_, w)| w).sum();
        twice / 2.0 + self.self_loops.iter().sum::<f64>()
    }

    fn modularity(&self, node2com: &[usize], m: f64, resolution: f64) -> f64 {
        let communities = node2com.iter().copied().max().map_or(0, |c| c + 1);
        let mut internal = vec![0.0; communities];
        let mut degree = vec![0.0; communities];

        for u in 0..self.len() {
            let c = node2com[u];
            internal[c] += self.self_loops[u];
            degree[c] += self.degree(u);
            for &(v, w) in &self.adjacency[u] {
                if node2com[v] == c {
                    internal[c] += w / 2.0;
                }
            }
        }

        internal
            .iter()
            .zip(&degree)
            .map(|(&l, &d)| l / m - resolution * (d / (2.0 * m)).powi(2))
            .sum()
    }

    /// Collapse each community into a single node
    fn aggregate(&self, node2com: &[usize], communities: usize) -> LevelGraph {
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); communities];
        let mut self_loops = vec![0.0; communities];
        let mut weights: Vec<HashMap<usize, f64>> = vec![HashMap::new(); communities];
        let mut order: Vec<Vec<usize>> = vec![Vec::new(); communities];

        for u in 0..self.len() {
            let cu = node2com[u];
            members[cu].extend(self.members[u].iter().copied());
            self_loops[cu] += self.self_loops[u];
            for &(v, w) in &self.adjacency[u] {
                let cv = node2com[v];
                if cu == cv {
                    self_loops[cu] += w / 2.0;
                } else {
                    let entry = weights[cu].entry(cv).or_insert_with(|| {
                        order[cu].push(cv);
                        0.0
                    });
                    *entry += w;
                }
            }
        }

        let adjacency = order
            .iter()
            .zip(&weights)
            .map(|(targets, w)| targets.iter().map(|t| (*t, w[t])).collect())
            .collect();

        LevelGraph {
            adjacency,
            self_loops,
            members,
        }
    }
}

/// One pass of local moving. Returns the dense community of each level node
/// and whether any node moved.
fn one_level(graph: &LevelGraph, m: f64, resolution: f64, rng: &mut StdRng) -> (Vec<usize>, bool) {
    let n = graph.len();
    let mut node2com: Vec<usize> = (0..n).collect();
    let degrees: Vec<f64> = (0..n).map(|u| graph.degree(u)).collect();
    let mut stot = degrees.clone();

    let mut visit: Vec<usize> = (0..n).collect();
    visit.shuffle(rng);

    let mut improvement = false;
    let mut moves = 1;
    while moves > 0 {
        moves = 0;
        for &u in &visit {
            let current = node2com[u];
            let degree = degrees[u];

            // neighbor community weights, in first-seen order
            let mut com_weights: Vec<(usize, f64)> = Vec::new();
            for &(v, w) in &graph.adjacency[u] {
                let c = node2com[v];
                match com_weights.iter_mut().find(|(com, _)| *com == c) {
                    Some(entry) => entry.1 += w,
                    None => com_weights.push((c, w)),
                }
            }

            stot[current] -= degree;
            let own = com_weights
                .iter()
                .find(|(c, _)| *c == current)
                .map_or(0.0, |&(_, w)| w);
            let remove_cost = -own / m + resolution * (stot[current] * degree) / (2.0 * m * m);

            let mut best_gain = 0.0;
            let mut best_com = current;
            for &(c, w) in &com_weights {
                let gain = remove_cost + w / m - resolution * (stot[c] * degree) / (2.0 * m * m);
                if gain > best_gain {
                    best_gain = gain;
                    best_com = c;
                }
            }

            stot[best_com] += degree;
            if best_com != current {
                node2com[u] = best_com;
                moves += 1;
                improvement = true;
            }
        }
    }

    (relabel(&node2com), improvement)
}

/// Renumber community labels densely in order of first appearance
fn relabel(node2com: &[usize]) -> Vec<usize> {
    let mut mapping: HashMap<usize, usize> = HashMap::new();
    node2com
        .iter()
        .map(|c| {
            let next = mapping.len();
            *mapping.entry(*c).or_insert(next)
        })
        .collect()
}

/// Louvain community detection over an undirected weighted view
pub fn louvain_communities(view: &GraphView, config: &LouvainConfig) -> CommunityResult {
    let mut graph = LevelGraph::from_view(view);
    let m = graph.size();

    if view.node_count == 0 || m <= 0.0 {
        let singletons: Vec<usize> = (0..view.node_count).collect();
        return build_result(&singletons, 0.0);
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let identity: Vec<usize> = (0..graph.len()).collect();
    let mut modularity = graph.modularity(&identity, m, config.resolution);

    let (mut node2com, mut improvement) = one_level(&graph, m, config.resolution, &mut rng);
    let mut assignment = expand(&graph, &node2com, view.node_count);

    while improvement {
        let new_modularity = graph.modularity(&node2com, m, config.resolution);
        if new_modularity - modularity <= config.threshold {
            break;
        }
        modularity = new_modularity;

        let communities = node2com.iter().copied().max().map_or(0, |c| c + 1);
        graph = graph.aggregate(&node2com, communities);
        let (next, moved) = one_level(&graph, m, config.resolution, &mut rng);
        node2com = next;
        improvement = moved;
        assignment = expand(&graph, &node2com, view.node_count);
    }

    let final_modularity = graph.modularity(&node2com, m, config.resolution);
    build_result(&assignment, final_modularity)
}

/// Map level communities back to view indices
fn expand(graph: &LevelGraph, node2com: &[usize], node_count: usize) -> Vec<usize> {
    let mut assignment = vec![0; node_count];
    for (u, members) in graph.members.iter().enumerate() {
        for &original in members {
            assignment[original] = node2com[u];
        }
    }
    assignment
}

fn build_result(assignment: &[usize], modularity: f64) -> CommunityResult {
    let node_community = relabel(assignment);
    let count = node_community.iter().copied().max().map_or(0, |c| c + 1);
    let mut communities: Vec<Vec<usize>> = vec![Vec::new(); count];
    for (idx, &c) in node_community.iter().enumerate() {
        communities[c].push(idx);
    }

    CommunityResult {
        communities,
        node_community,
        modularity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cliques() -> GraphView {
        // Two triangles {0,1,2} and {3,4,5} joined by a light bridge 2-3
        GraphView::from_undirected_edges(
            6,
            &[
                (0, 1, 5.0),
                (1, 2, 5.0),
                (0, 2, 5.0),
                (3, 4, 5.0),
                (4, 5, 5.0),
                (3, 5, 5.0),
                (2, 3, 1.0),
            ],
        )
    }

    #[test]
    fn test_two_cliques_split() {
        let result = louvain_communities(&two_cliques(), &LouvainConfig::default());

        assert_eq!(result.communities.len(), 2);
        assert_eq!(result.communities[0], vec![0, 1, 2]);
        assert_eq!(result.communities[1], vec![3, 4, 5]);
        assert_eq!(result.node_community, vec![0, 0, 0, 1, 1, 1]);
        assert!(result.modularity > 0.4);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let view = two_cliques();
        let a = louvain_communities(&view, &LouvainConfig::default());
        let b = louvain_communities(&view, &LouvainConfig::default());
        assert_eq!(a.communities, b.communities);
    }

    #[test]
    fn test_no_edges_gives_singletons() {
        let view = GraphView::from_undirected_edges(3, &[]);
        let result = louvain_communities(&view, &LouvainConfig::default());
        assert_eq!(result.communities, vec![vec![0], vec![1], vec![2]]);
        assert_eq!(result.node_community, vec![0, 1, 2]);
    }

    #[test]
    fn test_single_and_empty() {
        let single = GraphView::from_undirected_edges(1, &[]);
        let result = louvain_communities(&single, &LouvainConfig::default());
        assert_eq!(result.communities, vec![vec![0]]);

        let empty = GraphView::from_undirected_edges(0, &[]);
        assert!(louvain_communities(&empty, &LouvainConfig::default()).communities.is_empty());
    }

    #[test]
    fn test_isolated_node_keeps_own_community() {
        let view = GraphView::from_undirected_edges(3, &[(0, 1, 1.0)]);
        let result = louvain_communities(&view, &LouvainConfig::default());
        assert_eq!(result.communities, vec![vec![0, 1], vec![2]]);
    }
}
