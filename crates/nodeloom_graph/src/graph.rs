// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and links.

use crate::link::{Link, LinkId};
use crate::node::{Node, NodeId};
use crate::socket::{SocketDirection, SocketId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Links between sockets
    links: IndexMap<LinkId, Link>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            links: IndexMap::new(),
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node and its links
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        // Remove links involving this node
        self.links.retain(|_, l| !l.involves_node(node_id));
        // Remove the node
        self.nodes.swap_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get all nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add a link between sockets
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_socket: SocketId,
        to_node: NodeId,
        to_socket: SocketId,
    ) -> Result<LinkId, LinkError> {
        // Validate nodes exist
        let source_node = self
            .nodes
            .get(&from_node)
            .ok_or(LinkError::NodeNotFound(from_node))?;
        let target_node = self
            .nodes
            .get(&to_node)
            .ok_or(LinkError::NodeNotFound(to_node))?;

        // Validate sockets exist
        let source = source_node
            .socket(&from_socket)
            .ok_or(LinkError::SocketNotFound(from_socket))?;
        let target = target_node
            .socket(&to_socket)
            .ok_or(LinkError::SocketNotFound(to_socket))?;

        // A link always runs from an output socket to an input socket
        if source.direction != SocketDirection::Output
            || target.direction != SocketDirection::Input
        {
            return Err(LinkError::WrongDirection);
        }

        // Validate type compatibility
        if !source.can_connect(target) {
            return Err(LinkError::IncompatibleTypes);
        }

        // Check for an existing link to this input (if not multi-connect)
        if !target.multi_connect && self.links.values().any(|l| l.to_socket == to_socket) {
            return Err(LinkError::SocketAlreadyLinked(to_socket));
        }

        // Prevent self-loops
        if from_node == to_node {
            return Err(LinkError::SelfLoop);
        }

        let link = Link::new(from_node, from_socket, to_node, to_socket);
        let id = link.id;
        self.links.insert(id, link);
        Ok(id)
    }

    /// Remove a link
    pub fn disconnect(&mut self, link_id: LinkId) -> Option<Link> {
        self.links.swap_remove(&link_id)
    }

    /// Get a link by ID
    pub fn link(&self, link_id: LinkId) -> Option<&Link> {
        self.links.get(&link_id)
    }

    /// Get all links, in insertion order
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Get links from a specific socket (linear scan)
    pub fn links_from(&self, socket_id: SocketId) -> impl Iterator<Item = &Link> {
        self.links.values().filter(move |l| l.from_socket == socket_id)
    }

    /// Get links to a specific socket (linear scan)
    pub fn links_to(&self, socket_id: SocketId) -> impl Iterator<Item = &Link> {
        self.links.values().filter(move |l| l.to_socket == socket_id)
    }

    /// Get links involving a node (linear scan)
    pub fn links_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Link> {
        self.links.values().filter(move |l| l.involves_node(node_id))
    }

    /// Get the number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when creating a link
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Socket not found
    #[error("Socket not found: {0:?}")]
    SocketNotFound(SocketId),

    /// Source is not an output or target is not an input
    #[error("Link source must be an output socket and target an input socket")]
    WrongDirection,

    /// Incompatible socket types
    #[error("Incompatible socket types")]
    IncompatibleTypes,

    /// Socket is already linked
    #[error("Socket already linked: {0:?}")]
    SocketAlreadyLinked(SocketId),

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,
}
