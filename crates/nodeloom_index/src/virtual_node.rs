// SPDX-License-Identifier: MIT OR Apache-2.0
//! Virtual wrappers around raw nodes, sockets, and links.
//!
//! All cross-references between virtual entities are indices into the
//! arenas of the owning [`VirtualGraph`](crate::VirtualGraph), so the
//! whole structure is released in one step when the graph is dropped.

use nodeloom_graph::{NodeId, SocketDirection, SocketId, REROUTE_TYPE};

/// Handle to a [`VirtualNode`] in its owning graph's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualNodeId(pub usize);

/// Handle to a [`VirtualSocket`] in its owning graph's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualSocketId(pub usize);

/// Handle to a [`VirtualLink`] in its owning graph's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualLinkId(pub usize);

/// A node in a virtual graph, wrapping one raw node.
///
/// Immutable once created. Unlike the filtered view of
/// [`GraphIndex::actual_nodes`](crate::GraphIndex::actual_nodes),
/// virtual graphs keep reroutes and frames as first-class nodes and
/// resolve reroute semantics through link resolution instead.
#[derive(Debug)]
pub struct VirtualNode {
    pub(crate) id: VirtualNodeId,
    pub(crate) node: NodeId,
    pub(crate) node_type: String,
    pub(crate) name: String,
    pub(crate) inputs: Vec<VirtualSocketId>,
    pub(crate) outputs: Vec<VirtualSocketId>,
}

impl VirtualNode {
    /// This node's handle
    pub fn id(&self) -> VirtualNodeId {
        self.id
    }

    /// The raw node this wraps
    pub fn raw_node(&self) -> NodeId {
        self.node
    }

    /// The raw node's type identifier
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// The raw node's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input sockets, in declaration order
    pub fn inputs(&self) -> &[VirtualSocketId] {
        &self.inputs
    }

    /// Output sockets, in declaration order
    pub fn outputs(&self) -> &[VirtualSocketId] {
        &self.outputs
    }

    /// Get an input socket by index
    pub fn input(&self, index: usize) -> Option<VirtualSocketId> {
        self.inputs.get(index).copied()
    }

    /// Get an output socket by index
    pub fn output(&self, index: usize) -> Option<VirtualSocketId> {
        self.outputs.get(index).copied()
    }

    /// Whether this node is a pass-through reroute
    pub fn is_reroute(&self) -> bool {
        self.node_type == REROUTE_TYPE
    }
}

/// A socket in a virtual graph, wrapping one raw socket.
///
/// Owned by exactly one [`VirtualNode`] for its entire lifetime. The
/// link arrays are populated by the owning graph's freeze pass and
/// must not be read before it.
#[derive(Debug)]
pub struct VirtualSocket {
    pub(crate) id: VirtualSocketId,
    pub(crate) node: VirtualNodeId,
    pub(crate) socket: SocketId,
    pub(crate) name: String,
    pub(crate) direction: SocketDirection,
    pub(crate) direct_links: Option<Vec<VirtualSocketId>>,
    pub(crate) links: Option<Vec<VirtualSocketId>>,
}

impl VirtualSocket {
    /// This socket's handle
    pub fn id(&self) -> VirtualSocketId {
        self.id
    }

    /// The node that owns this socket
    pub fn node(&self) -> VirtualNodeId {
        self.node
    }

    /// The raw socket this wraps
    pub fn raw_socket(&self) -> SocketId {
        self.socket
    }

    /// The raw socket's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is an input socket
    pub fn is_input(&self) -> bool {
        self.direction == SocketDirection::Input
    }

    /// Whether this is an output socket
    pub fn is_output(&self) -> bool {
        self.direction == SocketDirection::Output
    }

    /// The sockets directly wired to this one, one hop away.
    ///
    /// # Panics
    ///
    /// Panics if the owning graph has not been frozen yet.
    pub fn direct_links(&self) -> &[VirtualSocketId] {
        self.direct_links
            .as_deref()
            .expect("direct_links read before the virtual graph was frozen")
    }

    /// The fully resolved links of this socket: real origins for an
    /// input, real destinations for an output, with reroute chains
    /// skipped through.
    ///
    /// # Panics
    ///
    /// Panics if the owning graph has not been frozen yet.
    pub fn links(&self) -> &[VirtualSocketId] {
        self.links
            .as_deref()
            .expect("links read before the virtual graph was frozen")
    }
}

/// A directed link between two virtual sockets; identity only
#[derive(Debug)]
pub struct VirtualLink {
    pub(crate) id: VirtualLinkId,
    pub(crate) from: VirtualSocketId,
    pub(crate) to: VirtualSocketId,
}

impl VirtualLink {
    /// This link's handle
    pub fn id(&self) -> VirtualLinkId {
        self.id
    }

    /// The source (output) socket
    pub fn from(&self) -> VirtualSocketId {
        self.from
    }

    /// The destination (input) socket
    pub fn to(&self) -> VirtualSocketId {
        self.to
    }
}
