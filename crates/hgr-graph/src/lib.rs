#![deny(missing_docs)]

//! Weighted hypergraphs and hierarchical coarsening.
//!
//! [`HyperGraph`] stores nodes and hyperedges with multi-dimensional weight
//! vectors and answers partition-quality queries. [`HierHyperGraph`] builds
//! coarser levels by clustering a parent level and moves partition results
//! and locations between levels.

mod compress;
mod config;
mod generators;
mod hash;
mod hier;
mod hmetis;
mod hypergraph;
mod ids;
mod metrics;
mod neighborhood;
mod serialization;
mod summary;

pub use config::{ClusterOptions, GraphConfig};
pub use generators::{gen_random_clustering, gen_random_hypergraph};
pub use hash::canonical_hash;
pub use hier::HierHyperGraph;
pub use hmetis::{
    parse_hmetis, parse_partition, read_hmetis, read_partition, save_partition, write_hmetis,
    write_partition,
};
pub use hypergraph::HyperGraph;
pub use summary::GraphSummary;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};

pub use hgr_core::{BlockId, Coordinate2D, EdgeId, ErrorInfo, HgrError, NodeId, PartResult};
