// SPDX-License-Identifier: MIT OR Apache-2.0
//! Structural indexing for NodeLoom graphs.
//!
//! A raw [`nodeloom_graph::Graph`] only supports list iteration, so
//! repeated structural queries are expensive. This crate provides two
//! complementary indexing layers:
//! - [`GraphIndex`]: a direct analysis index over a single raw graph -
//!   reverse socket-to-node lookup, type grouping, reroute-resolved
//!   connectivity, single-origin link detection
//! - [`VirtualGraph`]: a build-then-freeze view that merges one or
//!   more raw graphs into a uniform arena-owned structure and resolves
//!   reroute indirection into direct, semantically meaningful edges
//!
//! Both layers are read-only over the raw graph and precompute their
//! derived maps exactly once.

pub mod index;
pub mod virtual_graph;
pub mod virtual_node;

pub use index::{GraphIndex, SingleOriginLink, SocketWithNode};
pub use virtual_graph::{VirtualGraph, VirtualGraphError};
pub use virtual_node::{
    VirtualLink, VirtualLinkId, VirtualNode, VirtualNodeId, VirtualSocket, VirtualSocketId,
};
