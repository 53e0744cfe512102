//! Pipeline configuration
//!
//! Every field has a default, so a YAML file only needs the keys it changes.

use crate::error::JuryGraphResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Jury members seen fewer times than this are dropped
    pub min_occurrences: usize,
    /// Aggregate records on the rayon pool
    pub parallel: bool,
    pub inputs: InputConfig,
    /// File name of the JSON dataset inside the output directory
    pub output_file: String,
    pub layout: LayoutSettings,
    pub centrality: CentralitySettings,
    pub community: CommunitySettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_occurrences: 2,
            parallel: false,
            inputs: InputConfig::default(),
            output_file: "dataset.json".to_string(),
            layout: LayoutSettings::default(),
            centrality: CentralitySettings::default(),
            community: CommunitySettings::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> JuryGraphResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML file
    pub fn load(path: impl AsRef<Path>) -> JuryGraphResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

/// Input file names, relative to the input directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub defenses_file: String,
    pub references_file: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            defenses_file: "theses-soutenues-enhanced.csv".to_string(),
            references_file: "drm_phd_list_serialized.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub seed: u64,
    pub iterations: usize,
    /// Optimal node distance; derived from the node count when absent
    pub k: Option<f64>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            seed: 1234,
            iterations: 50,
            k: None,
        }
    }
}

impl LayoutSettings {
    /// Optimal distance for a graph of `node_count` nodes
    pub fn k_for(&self, node_count: usize) -> Option<f64> {
        match self.k {
            Some(k) => Some(k),
            None if node_count > 0 => Some(3.0 / (node_count as f64 / 2.0)),
            None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentralitySettings {
    /// Use summed pair weights as path lengths
    pub weighted: bool,
}

impl Default for CentralitySettings {
    fn default() -> Self {
        Self { weighted: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunitySettings {
    pub enabled: bool,
    pub seed: u64,
    pub resolution: f64,
    pub threshold: f64,
}

impl Default for CommunitySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            seed: 1234,
            resolution: 1.0,
            threshold: 1e-7,
        }
    }
}
