//! External-node pruning
//!
//! Runs once every record has been aggregated: a person first met as an
//! external advisor may turn out to be an in-scope advisor later on, and
//! only the final role decides.

use crate::graph::{CoGraph, GraphResult, PruneStats};
use tracing::info;

/// Remove external people and every edge touching them.
///
/// A second call on the result removes nothing.
pub fn prune_external(graph: &mut CoGraph) -> GraphResult<PruneStats> {
    let stats = graph.prune_external();
    graph.validate()?;
    info!(
        "Pruned {} external nodes and {} edges ({} nodes left)",
        stats.nodes_removed,
        stats.edges_removed,
        graph.node_count()
    );
    Ok(stats)
}
