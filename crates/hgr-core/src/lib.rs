#![deny(missing_docs)]
#![doc = "Core identifiers, errors and weight arithmetic shared by the hgr hypergraph crates."]

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod coord;
pub mod errors;
pub mod rng;
pub mod stats;
pub mod weights;

pub use coord::Coordinate2D;
pub use errors::{ErrorInfo, HgrError};
pub use rng::RngHandle;

/// Dense identifier of a node within a hypergraph (`0..node_count`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }

    /// Creates an identifier from a position in the node arrays.
    pub fn from_index(index: usize) -> Self {
        Self(index as u64)
    }

    /// Returns the position of the node in the node arrays.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Dense identifier of a hyperedge within a hypergraph (`0..edge_count`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }

    /// Creates an identifier from a position in the edge arrays.
    pub fn from_index(index: usize) -> Self {
        Self(index as u64)
    }

    /// Returns the position of the edge in the edge arrays.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Identifier of a partition block.
pub type BlockId = usize;

/// Per-node block assignment; `None` marks an unassigned node.
pub type PartResult = Vec<Option<BlockId>>;

/// Convenience constructor for node identifier lists in tests and callers.
pub fn node_ids<I>(raw: I) -> Vec<NodeId>
where
    I: IntoIterator<Item = u64>,
{
    raw.into_iter().map(NodeId::from_raw).collect()
}
