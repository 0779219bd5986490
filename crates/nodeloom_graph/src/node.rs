// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions and the node type registry.

use crate::socket::{Socket, SocketId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type identifier of reroute nodes, the single-input single-output
/// pass-through used to tidy up link routing.
pub const REROUTE_TYPE: &str = "reroute";

/// Type identifier of frame nodes, the purely organizational grouping
/// box with no data-flow role.
pub const FRAME_TYPE: &str = "frame";

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Node type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Input nodes (constants, parameters)
    Input,
    /// Output nodes (material result)
    Output,
    /// Math operations
    Math,
    /// Texture operations
    Texture,
    /// Utility nodes
    Utility,
    /// Layout-only nodes (reroutes, frames)
    Layout,
    /// Custom/user-defined
    Custom,
}

/// Node type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeType {
    /// Unique type identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Category
    pub category: NodeCategory,
    /// Description
    pub description: String,
    /// Default input sockets
    pub inputs: Vec<Socket>,
    /// Default output sockets
    pub outputs: Vec<Socket>,
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Node type identifier
    pub node_type: String,
    /// Display name (can be customized)
    pub name: String,
    /// Input sockets, in declaration order
    pub inputs: Vec<Socket>,
    /// Output sockets, in declaration order
    pub outputs: Vec<Socket>,
}

impl Node {
    /// Create a new node from a type definition.
    ///
    /// Template sockets are instantiated with fresh IDs so every node
    /// instance owns globally unique socket identities.
    pub fn new(node_type: &NodeType) -> Self {
        Self {
            id: NodeId::new(),
            node_type: node_type.id.clone(),
            name: node_type.name.clone(),
            inputs: node_type.inputs.iter().map(Socket::instantiate).collect(),
            outputs: node_type.outputs.iter().map(Socket::instantiate).collect(),
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Get an input socket by index
    pub fn input(&self, index: usize) -> Option<&Socket> {
        self.inputs.get(index)
    }

    /// Get an output socket by index
    pub fn output(&self, index: usize) -> Option<&Socket> {
        self.outputs.get(index)
    }

    /// Get a socket by ID
    pub fn socket(&self, socket_id: &SocketId) -> Option<&Socket> {
        self.inputs
            .iter()
            .find(|s| s.id == *socket_id)
            .or_else(|| self.outputs.iter().find(|s| s.id == *socket_id))
    }

    /// Get all sockets, inputs first
    pub fn sockets(&self) -> impl Iterator<Item = &Socket> {
        self.inputs.iter().chain(self.outputs.iter())
    }

    /// Whether this node is a pass-through reroute
    pub fn is_reroute(&self) -> bool {
        self.node_type == REROUTE_TYPE
    }

    /// Whether this node is an organizational frame
    pub fn is_frame(&self) -> bool {
        self.node_type == FRAME_TYPE
    }
}

/// Registry of available node types
pub struct NodeRegistry {
    /// Registered node types by ID
    types: indexmap::IndexMap<String, NodeType>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            types: indexmap::IndexMap::new(),
        }
    }

    /// Register a node type
    pub fn register(&mut self, node_type: NodeType) {
        self.types.insert(node_type.id.clone(), node_type);
    }

    /// Get a node type by ID
    pub fn get(&self, id: &str) -> Option<&NodeType> {
        self.types.get(id)
    }

    /// Get all registered types
    pub fn types(&self) -> impl Iterator<Item = &NodeType> {
        self.types.values()
    }

    /// Get types by category
    pub fn types_in_category(&self, category: NodeCategory) -> impl Iterator<Item = &NodeType> {
        self.types.values().filter(move |t| t.category == category)
    }

    /// Create a node from a type ID
    pub fn create_node(&self, type_id: &str) -> Option<Node> {
        self.get(type_id).map(Node::new)
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
