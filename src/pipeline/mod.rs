//! Batch pipeline from defense tables to an annotated graph
//!
//! Stages run strictly in order, each over the whole dataset:
//!
//! 1. participant extraction
//! 2. reference-set filter and name correction
//! 3. jury frequency filter
//! 4. edge aggregation
//! 5. external-node pruning
//! 6. graph analytics
//!
//! The graph is rebuilt from scratch on every run.

pub mod aggregate;
pub mod extract;
pub mod frequency;
pub mod prune;
pub mod reference;

pub use aggregate::{add_defense, aggregate, aggregate_parallel};
pub use extract::{extract_all, extract_participants, DefenseParticipants};
pub use frequency::{filter_infrequent_members, FrequencyStats};
pub use prune::prune_external;
pub use reference::{correct_names, filter_in_scope, ReferenceSet};

use crate::algo::{self, AnalyticsSummary};
use crate::config::PipelineConfig;
use crate::error::JuryGraphResult;
use crate::graph::CoGraph;
use crate::ingest::{load_defenses, load_references, RawDefense, ReferenceRecord};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Counts collected while the pipeline runs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineStats {
    pub records_loaded: usize,
    pub reference_records: usize,
    pub records_in_scope: usize,
    pub names_corrected: usize,
    pub jury_slots_removed: usize,
    pub records_kept: usize,
    pub nodes_aggregated: usize,
    pub edges_aggregated: usize,
    pub nodes_pruned: usize,
    pub edges_pruned: usize,
    pub nodes: usize,
    /// Output rows, one per (pair, relation, year)
    pub edge_rows: usize,
    pub communities: Option<usize>,
    pub modularity: Option<f64>,
}

/// Result of a full run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub graph: CoGraph,
    pub stats: PipelineStats,
}

/// Configured pipeline
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load both input tables from `input_dir` and run every stage
    pub fn run_from_dir(&self, input_dir: impl AsRef<Path>) -> JuryGraphResult<PipelineOutput> {
        let input_dir = input_dir.as_ref();
        let defenses = load_defenses(input_dir.join(&self.config.inputs.defenses_file))?;
        let references = load_references(input_dir.join(&self.config.inputs.references_file))?;
        info!(
            "Loaded {} defenses and {} reference records from {}",
            defenses.len(),
            references.len(),
            input_dir.display()
        );
        self.run(&defenses, &references)
    }

    /// Run every stage, analytics included
    pub fn run(&self, defenses: &[RawDefense], references: &[ReferenceRecord]) -> JuryGraphResult<PipelineOutput> {
        let (mut graph, mut stats) = self.build_graph(defenses, references)?;

        let start = Instant::now();
        let summary: AnalyticsSummary = algo::annotate(&mut graph, &self.config)?;
        info!("Analytics done in {:?}", start.elapsed());

        stats.communities = summary.communities;
        stats.modularity = summary.modularity;
        Ok(PipelineOutput { graph, stats })
    }

    /// Stages 1 to 5: the pruned graph without analytics
    pub fn build_graph(
        &self,
        defenses: &[RawDefense],
        references: &[ReferenceRecord],
    ) -> JuryGraphResult<(CoGraph, PipelineStats)> {
        let mut stats = PipelineStats {
            records_loaded: defenses.len(),
            reference_records: references.len(),
            ..Default::default()
        };

        let extracted = extract_all(defenses);

        let reference = ReferenceSet::from_records(references);
        let mut in_scope = filter_in_scope(extracted, &reference);
        stats.records_in_scope = in_scope.len();
        stats.names_corrected = correct_names(&mut in_scope, &reference);
        info!(
            "{} of {} records in scope, {} names corrected",
            stats.records_in_scope, stats.records_loaded, stats.names_corrected
        );

        let (kept, frequency) = filter_infrequent_members(in_scope, self.config.min_occurrences);
        stats.jury_slots_removed = frequency.jury_slots_removed;
        stats.records_kept = kept.len();
        info!(
            "Frequency filter (min {}): removed {} jury slots, dropped {} records",
            self.config.min_occurrences, frequency.jury_slots_removed, frequency.records_dropped
        );

        let mut graph = if self.config.parallel {
            aggregate_parallel(&kept, &reference)
        } else {
            aggregate(&kept, &reference)
        };
        stats.nodes_aggregated = graph.node_count();
        stats.edges_aggregated = graph.edge_count();
        info!("Aggregated {} nodes and {} edges", stats.nodes_aggregated, stats.edges_aggregated);

        let pruned = prune_external(&mut graph)?;
        stats.nodes_pruned = pruned.nodes_removed;
        stats.edges_pruned = pruned.edges_removed;
        stats.nodes = graph.node_count();
        stats.edge_rows = graph.edge_rows().len();

        Ok((graph, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{PersonId, Role};
    use crate::ingest::NameSlot;

    fn slot(id: &str) -> NameSlot {
        NameSlot::new(Some(id), Some(id), None)
    }

    fn raw(date: &str, author: &str, directors: &[&str], jury: &[&str]) -> RawDefense {
        RawDefense {
            date: Some(date.to_string()),
            author: slot(author),
            directors: directors.iter().map(|d| slot(d)).collect(),
            jury_members: jury.iter().map(|j| slot(j)).collect(),
            reviewers: Vec::new(),
            president: None,
        }
    }

    fn reference(author: &str, directors: &[&str]) -> ReferenceRecord {
        ReferenceRecord {
            author: slot(author),
            directors: directors.iter().map(|d| slot(d)).collect(),
        }
    }

    #[test]
    fn test_stats_track_every_stage() {
        let defenses = vec![
            raw("2020-01-01", "S1", &["X"], &["J", "R"]),
            raw("2021-01-01", "S2", &["X"], &["J"]),
            raw("2021-01-01", "O", &["Q"], &["J"]),
        ];
        let references = vec![reference("S1", &["X"]), reference("S2", &["X"])];

        let pipeline = Pipeline::new(PipelineConfig::default());
        let (graph, stats) = pipeline.build_graph(&defenses, &references).unwrap();

        assert_eq!(stats.records_loaded, 3);
        assert_eq!(stats.records_in_scope, 2);
        // R sits on one jury only
        assert_eq!(stats.jury_slots_removed, 1);
        assert_eq!(stats.records_kept, 2);
        assert_eq!(stats.nodes_pruned, 0);
        assert_eq!(stats.nodes, 4);
        assert!(!graph.contains(&PersonId::new("R")));
        assert_eq!(graph.node(&PersonId::new("J")).unwrap().role, Role::JuryMember);
    }

    #[test]
    fn test_parallel_switch_gives_same_graph() {
        let defenses: Vec<_> = (0..600)
            .map(|i| {
                let student = format!("S{}", i % 40);
                let advisor = format!("X{}", i % 9);
                let jury = format!("J{}", i % 5);
                raw(&format!("{}-05-01", 2000 + i % 20), &student, &[advisor.as_str()], &[jury.as_str()])
            })
            .collect();
        let references: Vec<_> = (0..20).map(|i| reference(&format!("S{}", i), &[])).collect();

        let sequential = Pipeline::new(PipelineConfig::default());
        let parallel = Pipeline::new(PipelineConfig {
            parallel: true,
            ..Default::default()
        });

        let (a, stats_a) = sequential.build_graph(&defenses, &references).unwrap();
        let (b, stats_b) = parallel.build_graph(&defenses, &references).unwrap();
        assert_eq!(stats_a, stats_b);
        assert_eq!(a.edge_rows(), b.edge_rows());
        assert_eq!(a.nodes().collect::<Vec<_>>(), b.nodes().collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input_runs_to_completion() {
        let output = Pipeline::default().run(&[], &[]).unwrap();
        assert_eq!(output.stats.nodes, 0);
        assert_eq!(output.stats.edge_rows, 0);
        assert_eq!(output.stats.communities, Some(0));
    }
}
