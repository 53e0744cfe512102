//! Graph algorithms for jurygraph
//!
//! Works on a dense CSR [`GraphView`] so the algorithms stay independent of
//! how the co-participation graph is stored.

pub mod common;
pub mod pathfinding;
pub mod centrality;
pub mod community;
pub mod layout;

pub use common::GraphView;
pub use pathfinding::{shortest_path_dag, ShortestPathDag};
pub use centrality::{betweenness_centrality, BetweennessConfig};
pub use community::{louvain_communities, CommunityResult, LouvainConfig};
pub use layout::{spring_layout, SpringLayoutConfig};
