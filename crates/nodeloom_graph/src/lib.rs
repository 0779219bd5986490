// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph data model for NodeLoom.
//!
//! This crate provides the raw graph structure the rest of NodeLoom
//! builds on:
//! - Nodes with typed, ordered input/output sockets
//! - Validated directional links (output socket to input socket)
//! - A node type registry with a built-in material node set
//! - Serialization support
//!
//! The graph itself only supports list iteration; structural queries
//! (reverse lookups, reroute resolution) live in `nodeloom_index`.

pub mod graph;
pub mod graphs;
pub mod link;
pub mod node;
pub mod socket;

pub use graph::{Graph, LinkError};
pub use link::{Link, LinkId};
pub use node::{Node, NodeCategory, NodeId, NodeRegistry, NodeType, FRAME_TYPE, REROUTE_TYPE};
pub use socket::{Socket, SocketDirection, SocketId, SocketType, SocketValue};
