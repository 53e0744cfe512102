use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jurygraph::algo::{annotate, build_view, betweenness_centrality, BetweennessConfig};
use jurygraph::ingest::{NameSlot, RawDefense, ReferenceRecord};
use jurygraph::pipeline::{aggregate, aggregate_parallel, extract_all, ReferenceSet};
use jurygraph::{Pipeline, PipelineConfig};

fn slot(id: String) -> NameSlot {
    NameSlot::new(Some(id.as_str()), Some(id.as_str()), None)
}

/// Synthetic tables: `size` defenses over a pool of advisors and jury members
fn synthetic(size: usize) -> (Vec<RawDefense>, Vec<ReferenceRecord>) {
    let defenses = (0..size)
        .map(|i| RawDefense {
            date: Some(format!("{}-06-01", 1990 + i % 30)),
            author: slot(format!("S{}", i)),
            directors: vec![slot(format!("A{}", i % 97)), slot(format!("A{}", (i * 7) % 97))],
            jury_members: (0..4).map(|j| slot(format!("J{}", (i * 13 + j * 31) % 211))).collect(),
            reviewers: vec![slot(format!("J{}", (i * 3) % 211))],
            president: None,
        })
        .collect();
    let references = (0..size)
        .step_by(2)
        .map(|i| ReferenceRecord {
            author: slot(format!("S{}", i)),
            directors: vec![slot(format!("A{}", i % 97))],
        })
        .collect();
    (defenses, references)
}

/// Sequential against rayon-chunked aggregation
fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for size in [1_000, 10_000].iter() {
        let (defenses, references) = synthetic(*size);
        let reference = ReferenceSet::from_records(&references);
        let extracted = extract_all(&defenses);

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            b.iter(|| criterion::black_box(aggregate(&extracted, &reference).edge_count()));
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, _| {
            b.iter(|| criterion::black_box(aggregate_parallel(&extracted, &reference).edge_count()));
        });
    }
    group.finish();
}

fn bench_analytics(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics");
    group.sample_size(10);

    let (defenses, references) = synthetic(2_000);
    let pipeline = Pipeline::new(PipelineConfig::default());
    let (graph, _) = pipeline.build_graph(&defenses, &references).unwrap();
    let projection = build_view(&graph);

    group.bench_function("betweenness", |b| {
        b.iter(|| criterion::black_box(betweenness_centrality(&projection.view, &BetweennessConfig::default()).len()));
    });
    group.bench_function("annotate", |b| {
        b.iter(|| {
            let mut graph = graph.clone();
            criterion::black_box(annotate(&mut graph, pipeline.config()).unwrap())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_aggregation, bench_analytics);
criterion_main!(benches);
