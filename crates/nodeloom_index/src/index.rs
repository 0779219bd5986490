// SPDX-License-Identifier: MIT OR Apache-2.0
//! Precomputed structural index over a single graph.

use nodeloom_graph::{Graph, LinkId, Node, NodeId, SocketId};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// A socket paired with the node that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocketWithNode {
    /// The socket
    pub socket: SocketId,
    /// The node that declares the socket
    pub node: NodeId,
}

/// A destination socket together with its single resolved origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleOriginLink {
    /// The resolved origin (output) socket
    pub from: SocketId,
    /// The destination (input) socket
    pub to: SocketId,
    /// The raw link arriving at the destination
    pub link: LinkId,
}

/// Precomputed lookup structures over one graph.
///
/// A [`Graph`] only supports list iteration natively, which makes
/// queries like "which node owns this socket" or "which real nodes
/// feed this input once reroutes are resolved" expensive to repeat.
/// This index answers them in one precomputation pass.
///
/// The borrow of the graph keeps it unmodified for the index's whole
/// lifetime, which is exactly how long the derived maps stay valid.
pub struct GraphIndex<'g> {
    graph: &'g Graph,
    original_nodes: Vec<NodeId>,
    original_links: Vec<LinkId>,
    actual_nodes: Vec<NodeId>,
    node_by_socket: HashMap<SocketId, NodeId>,
    nodes_by_type: IndexMap<String, Vec<NodeId>>,
    direct_origins: HashMap<SocketId, Vec<SocketId>>,
    direct_targets: HashMap<SocketId, Vec<SocketId>>,
    links: HashMap<SocketId, Vec<SocketWithNode>>,
    single_origin_links: Vec<SingleOriginLink>,
}

impl<'g> GraphIndex<'g> {
    /// Build the index over a graph snapshot.
    pub fn new(graph: &'g Graph) -> Self {
        let mut original_nodes = Vec::with_capacity(graph.node_count());
        let mut actual_nodes = Vec::new();
        let mut node_by_socket = HashMap::new();
        let mut nodes_by_type: IndexMap<String, Vec<NodeId>> = IndexMap::new();

        for node in graph.nodes() {
            original_nodes.push(node.id);
            if !node.is_reroute() && !node.is_frame() {
                actual_nodes.push(node.id);
            }
            for socket in node.sockets() {
                node_by_socket.insert(socket.id, node.id);
            }
            nodes_by_type
                .entry(node.node_type.clone())
                .or_default()
                .push(node.id);
        }

        let mut original_links = Vec::with_capacity(graph.link_count());
        let mut direct_origins: HashMap<SocketId, Vec<SocketId>> = HashMap::new();
        let mut direct_targets: HashMap<SocketId, Vec<SocketId>> = HashMap::new();
        let mut arriving_link: HashMap<SocketId, LinkId> = HashMap::new();
        for link in graph.links() {
            original_links.push(link.id);
            direct_origins
                .entry(link.to_socket)
                .or_default()
                .push(link.from_socket);
            direct_targets
                .entry(link.from_socket)
                .or_default()
                .push(link.to_socket);
            arriving_link.entry(link.to_socket).or_insert(link.id);
        }

        let mut index = Self {
            graph,
            original_nodes,
            original_links,
            actual_nodes,
            node_by_socket,
            nodes_by_type,
            direct_origins,
            direct_targets,
            links: HashMap::new(),
            single_origin_links: Vec::new(),
        };

        // Resolve every socket once: upstream for inputs, downstream
        // for outputs, skipping through reroute chains.
        for node in graph.nodes() {
            for socket in &node.inputs {
                let mut found = Vec::new();
                let mut visited = HashSet::new();
                index.find_connected_left(socket.id, &mut found, &mut visited);
                if found.len() == 1 {
                    if let Some(&link) = arriving_link.get(&socket.id) {
                        index.single_origin_links.push(SingleOriginLink {
                            from: found[0].socket,
                            to: socket.id,
                            link,
                        });
                    }
                }
                if !found.is_empty() {
                    index.links.insert(socket.id, found);
                }
            }
            for socket in &node.outputs {
                let mut found = Vec::new();
                let mut visited = HashSet::new();
                index.find_connected_right(socket.id, &mut found, &mut visited);
                if !found.is_empty() {
                    index.links.insert(socket.id, found);
                }
            }
        }

        tracing::debug!(
            "Indexed graph '{}': {} nodes ({} actual), {} links, {} single-origin",
            graph.name,
            index.original_nodes.len(),
            index.actual_nodes.len(),
            index.original_links.len(),
            index.single_origin_links.len()
        );

        index
    }

    /// The graph this index was built over
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// All nodes, in graph order, without filtering
    pub fn original_nodes(&self) -> &[NodeId] {
        &self.original_nodes
    }

    /// All links, in graph order, without filtering
    pub fn original_links(&self) -> &[LinkId] {
        &self.original_links
    }

    /// All nodes that are not reroutes or frames
    pub fn actual_nodes(&self) -> &[NodeId] {
        &self.actual_nodes
    }

    /// The node that declares the given socket
    pub fn node_of_socket(&self, socket_id: SocketId) -> Option<&'g Node> {
        let node_id = self.node_by_socket.get(&socket_id)?;
        self.graph.node(*node_id)
    }

    /// All nodes with the given type identifier
    pub fn nodes_with_type(&self, node_type: &str) -> &[NodeId] {
        self.nodes_by_type
            .get(node_type)
            .map_or(&[], Vec::as_slice)
    }

    /// The sockets reachable from the given socket once reroute chains
    /// are resolved: real origins for an input socket, real
    /// destinations for an output socket.
    pub fn linked(&self, socket_id: SocketId) -> &[SocketWithNode] {
        self.links
            .get(&socket_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Destination sockets fed by exactly one resolved origin.
    ///
    /// The fast path for consumers that assume unambiguous wiring;
    /// multi-source destinations are excluded and must be read through
    /// [`linked`](Self::linked).
    pub fn single_origin_links(&self) -> &[SingleOriginLink] {
        &self.single_origin_links
    }

    /// Walk upstream from an input socket, following links backwards
    /// and passing through reroute nodes until a real origin (or a
    /// dead end) is reached. The visited set terminates malformed
    /// reroute cycles.
    fn find_connected_left(
        &self,
        socket_id: SocketId,
        r_found: &mut Vec<SocketWithNode>,
        visited: &mut HashSet<SocketId>,
    ) {
        if !visited.insert(socket_id) {
            return;
        }
        let Some(origins) = self.direct_origins.get(&socket_id) else {
            return;
        };
        for &origin in origins {
            let Some(&node_id) = self.node_by_socket.get(&origin) else {
                continue;
            };
            let Some(node) = self.graph.node(node_id) else {
                continue;
            };
            if node.is_reroute() {
                if let Some(reroute_input) = node.input(0) {
                    self.find_connected_left(reroute_input.id, r_found, visited);
                }
            } else {
                r_found.push(SocketWithNode {
                    socket: origin,
                    node: node_id,
                });
            }
        }
    }

    /// Walk downstream from an output socket, the mirror image of
    /// [`find_connected_left`](Self::find_connected_left).
    fn find_connected_right(
        &self,
        socket_id: SocketId,
        r_found: &mut Vec<SocketWithNode>,
        visited: &mut HashSet<SocketId>,
    ) {
        if !visited.insert(socket_id) {
            return;
        }
        let Some(targets) = self.direct_targets.get(&socket_id) else {
            return;
        };
        for &target in targets {
            let Some(&node_id) = self.node_by_socket.get(&target) else {
                continue;
            };
            let Some(node) = self.graph.node(node_id) else {
                continue;
            };
            if node.is_reroute() {
                if let Some(reroute_output) = node.output(0) {
                    self.find_connected_right(reroute_output.id, r_found, visited);
                }
            } else {
                r_found.push(SocketWithNode {
                    socket: target,
                    node: node_id,
                });
            }
        }
    }
}
