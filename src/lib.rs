//! Public library API for recovering logic-node graphs from big-endian memory dumps.

/// Image loading, record decoding, anchored walks, and node-graph traversal.
pub mod dump;
