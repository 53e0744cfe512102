//! jurygraph CLI: build the co-participation dataset from the input tables

use anyhow::{Context, Result};
use clap::Parser;
use comfy_table::{ContentArrangement, Table};
use jurygraph::{Dataset, Pipeline, PipelineConfig, PipelineStats};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "jurygraph", version, about = "Build the thesis-defense co-participation graph")]
struct Cli {
    /// Directory holding the defense and reference tables
    #[arg(short, long, default_value = "./data")]
    input_path: PathBuf,

    /// Directory the dataset is written to
    #[arg(short, long, default_value = "./data")]
    output_path: PathBuf,

    /// Minimum number of juries a member must sit on to be kept
    #[arg(short, long)]
    min_occurrences: Option<usize>,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Aggregate records in parallel
    #[arg(long)]
    parallel: bool,

    /// Debug logging
    #[arg(long)]
    verbose: bool,

    /// Summary format
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    let output_file = config.output_file.clone();
    let pipeline = Pipeline::new(config);

    let output = pipeline
        .run_from_dir(&cli.input_path)
        .with_context(|| format!("Failed to build graph from {}", cli.input_path.display()))?;
    let dataset = Dataset::from_graph(&output.graph);
    dataset
        .write(&cli.output_path, &output_file)
        .with_context(|| format!("Failed to write dataset to {}", cli.output_path.display()))?;

    print_summary(&output.stats, &cli.format)?;
    println!(
        "Saved {} nodes and {} edges.",
        dataset.nodes.len(),
        dataset.edges.len()
    );
    Ok(())
}

/// File values first, then command-line overrides
fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(min) = cli.min_occurrences {
        config.min_occurrences = min;
    }
    if cli.parallel {
        config.parallel = true;
    }
    Ok(config)
}

fn print_summary(stats: &PipelineStats, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(stats)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Stage", "Count"]);

            let rows: [(&str, String); 11] = [
                ("Records loaded", stats.records_loaded.to_string()),
                ("Reference records", stats.reference_records.to_string()),
                ("Records in scope", stats.records_in_scope.to_string()),
                ("Names corrected", stats.names_corrected.to_string()),
                ("Jury slots removed", stats.jury_slots_removed.to_string()),
                ("Records kept", stats.records_kept.to_string()),
                ("Nodes aggregated", stats.nodes_aggregated.to_string()),
                ("External nodes pruned", stats.nodes_pruned.to_string()),
                ("Nodes", stats.nodes.to_string()),
                ("Edge rows", stats.edge_rows.to_string()),
                (
                    "Communities",
                    stats.communities.map_or_else(|| "-".to_string(), |c| c.to_string()),
                ),
            ];
            for (stage, count) in rows {
                table.add_row(vec![stage.to_string(), count]);
            }

            println!("{}", table);
        }
    }
    Ok(())
}
