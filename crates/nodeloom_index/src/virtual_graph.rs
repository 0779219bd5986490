// SPDX-License-Identifier: MIT OR Apache-2.0
//! A mutable-then-frozen merged view over one or more raw graphs.

use crate::virtual_node::{
    VirtualLink, VirtualLinkId, VirtualNode, VirtualNodeId, VirtualSocket, VirtualSocketId,
};
use nodeloom_graph::{Graph, Node, Socket, SocketId};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Error from a building-state operation
#[derive(Debug, thiserror::Error)]
pub enum VirtualGraphError {
    /// The graph is already frozen
    #[error("Virtual graph is already frozen")]
    Frozen,

    /// Unknown virtual socket handle
    #[error("Unknown virtual socket: {0:?}")]
    UnknownSocket(VirtualSocketId),

    /// Raw socket was never added to this graph
    #[error("Raw socket {0:?} has not been added to this virtual graph")]
    UnknownRawSocket(SocketId),

    /// Source is not an output or target is not an input
    #[error("Link source must be an output socket and target an input socket")]
    WrongDirection,
}

/// A uniform view over one or more raw graphs.
///
/// Nodes and links are ingested while the graph is building, possibly
/// from several raw graphs (nested graph groups merged into one view).
/// A one-way [`freeze`](Self::freeze) then computes the derived
/// indices: per-socket direct links, reroute-resolved links, the
/// linked-input list, and the type-identifier grouping. After freeze
/// the graph is read-only.
///
/// Every [`VirtualNode`], [`VirtualSocket`], and [`VirtualLink`] lives
/// in an arena owned by this graph and is addressed by index handle;
/// dropping the graph releases all of them in one step.
pub struct VirtualGraph {
    frozen: bool,
    nodes: Vec<VirtualNode>,
    sockets: Vec<VirtualSocket>,
    links: Vec<VirtualLink>,
    socket_by_raw: HashMap<SocketId, VirtualSocketId>,
    inputs_with_links: Vec<VirtualSocketId>,
    nodes_by_type: IndexMap<String, Vec<VirtualNodeId>>,
}

impl VirtualGraph {
    /// Create a new empty virtual graph in the building state
    pub fn new() -> Self {
        Self {
            frozen: false,
            nodes: Vec::new(),
            sockets: Vec::new(),
            links: Vec::new(),
            socket_by_raw: HashMap::new(),
            inputs_with_links: Vec::new(),
            nodes_by_type: IndexMap::new(),
        }
    }

    /// Ingest every node and link of a raw graph.
    ///
    /// Reroutes and frames are added like any other node. May be
    /// called for several raw graphs before freezing to merge them
    /// into one view.
    pub fn add_graph(&mut self, graph: &Graph) -> Result<(), VirtualGraphError> {
        for node in graph.nodes() {
            self.add_node(node)?;
        }
        for link in graph.links() {
            let from = self
                .socket_by_raw
                .get(&link.from_socket)
                .copied()
                .ok_or(VirtualGraphError::UnknownRawSocket(link.from_socket))?;
            let to = self
                .socket_by_raw
                .get(&link.to_socket)
                .copied()
                .ok_or(VirtualGraphError::UnknownRawSocket(link.to_socket))?;
            self.add_link(from, to)?;
        }
        Ok(())
    }

    /// Create and register one virtual node wrapping a raw node, with
    /// one virtual socket per raw input and output socket.
    pub fn add_node(&mut self, node: &Node) -> Result<VirtualNodeId, VirtualGraphError> {
        if self.frozen {
            return Err(VirtualGraphError::Frozen);
        }
        let id = VirtualNodeId(self.nodes.len());
        let inputs = node
            .inputs
            .iter()
            .map(|socket| self.add_socket(id, socket))
            .collect();
        let outputs = node
            .outputs
            .iter()
            .map(|socket| self.add_socket(id, socket))
            .collect();
        self.nodes.push(VirtualNode {
            id,
            node: node.id,
            node_type: node.node_type.clone(),
            name: node.name.clone(),
            inputs,
            outputs,
        });
        Ok(id)
    }

    fn add_socket(&mut self, node: VirtualNodeId, socket: &Socket) -> VirtualSocketId {
        let id = VirtualSocketId(self.sockets.len());
        self.sockets.push(VirtualSocket {
            id,
            node,
            socket: socket.id,
            name: socket.name.clone(),
            direction: socket.direction,
            direct_links: None,
            links: None,
        });
        self.socket_by_raw.insert(socket.id, id);
        id
    }

    /// Register a link between two already-added virtual sockets.
    pub fn add_link(
        &mut self,
        from: VirtualSocketId,
        to: VirtualSocketId,
    ) -> Result<VirtualLinkId, VirtualGraphError> {
        if self.frozen {
            return Err(VirtualGraphError::Frozen);
        }
        let from_socket = self
            .sockets
            .get(from.0)
            .ok_or(VirtualGraphError::UnknownSocket(from))?;
        let to_socket = self
            .sockets
            .get(to.0)
            .ok_or(VirtualGraphError::UnknownSocket(to))?;
        if !from_socket.is_output() || !to_socket.is_input() {
            return Err(VirtualGraphError::WrongDirection);
        }
        let id = VirtualLinkId(self.links.len());
        self.links.push(VirtualLink { id, from, to });
        Ok(id)
    }

    /// Transition from building to frozen and compute the derived
    /// indices. One-way: freezing an already frozen graph is an error,
    /// as is any mutation afterwards.
    pub fn freeze(&mut self) -> Result<(), VirtualGraphError> {
        if self.frozen {
            return Err(VirtualGraphError::Frozen);
        }
        self.initialize_direct_links();
        self.initialize_links();
        self.initialize_nodes_by_type();
        self.frozen = true;
        tracing::debug!(
            "Froze virtual graph: {} nodes, {} links, {} linked inputs",
            self.nodes.len(),
            self.links.len(),
            self.inputs_with_links.len()
        );
        Ok(())
    }

    /// Whether the graph has been frozen
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// All virtual nodes, in ingestion order
    pub fn nodes(&self) -> &[VirtualNode] {
        &self.nodes
    }

    /// All virtual links, in ingestion order
    pub fn links(&self) -> &[VirtualLink] {
        &self.links
    }

    /// Get a virtual node by handle
    pub fn node(&self, id: VirtualNodeId) -> Option<&VirtualNode> {
        self.nodes.get(id.0)
    }

    /// Get a virtual socket by handle
    pub fn socket(&self, id: VirtualSocketId) -> Option<&VirtualSocket> {
        self.sockets.get(id.0)
    }

    /// Get a virtual link by handle
    pub fn link(&self, id: VirtualLinkId) -> Option<&VirtualLink> {
        self.links.get(id.0)
    }

    /// The virtual socket wrapping a raw socket, if it was added
    pub fn socket_of(&self, raw: SocketId) -> Option<VirtualSocketId> {
        self.socket_by_raw.get(&raw).copied()
    }

    /// Every input socket with at least one resolved link.
    ///
    /// # Panics
    ///
    /// Panics if the graph has not been frozen yet.
    pub fn inputs_with_links(&self) -> &[VirtualSocketId] {
        assert!(self.frozen, "inputs_with_links read before freeze");
        &self.inputs_with_links
    }

    /// All virtual nodes with the given raw type identifier.
    ///
    /// # Panics
    ///
    /// Panics if the graph has not been frozen yet.
    pub fn nodes_with_type(&self, node_type: &str) -> &[VirtualNodeId] {
        assert!(self.frozen, "nodes_with_type read before freeze");
        self.nodes_by_type
            .get(node_type)
            .map_or(&[], Vec::as_slice)
    }

    /// Record every link as a one-hop connection on both endpoints.
    fn initialize_direct_links(&mut self) {
        for socket in &mut self.sockets {
            socket.direct_links = Some(Vec::new());
        }
        for i in 0..self.links.len() {
            let (from, to) = (self.links[i].from, self.links[i].to);
            if let Some(direct) = self.sockets[to.0].direct_links.as_mut() {
                direct.push(from);
            }
            if let Some(direct) = self.sockets[from.0].direct_links.as_mut() {
                direct.push(to);
            }
        }
    }

    /// Resolve every input socket's reroute-transitive origin set and
    /// mirror each real destination onto its origin sockets.
    fn initialize_links(&mut self) {
        for socket in &mut self.sockets {
            socket.links = Some(Vec::new());
        }
        for i in 0..self.sockets.len() {
            let input = VirtualSocketId(i);
            if !self.sockets[i].is_input() {
                continue;
            }
            let mut origins = Vec::new();
            let mut visited = HashSet::new();
            self.collect_origins(input, &mut origins, &mut visited);
            // Reroute inputs are pass-through, not real destinations;
            // mirroring them would leave outputs listing unresolved
            // reroute sockets next to the real consumers.
            if !self.nodes[self.sockets[i].node.0].is_reroute() {
                for &origin in &origins {
                    if let Some(links) = self.sockets[origin.0].links.as_mut() {
                        links.push(input);
                    }
                }
            }
            if !origins.is_empty() {
                self.inputs_with_links.push(input);
            }
            self.sockets[i].links = Some(origins);
        }
    }

    /// Walk upstream from an input socket, passing through reroute
    /// nodes until a real origin (or a dead end) is reached. The
    /// visited set terminates malformed reroute cycles.
    fn collect_origins(
        &self,
        socket: VirtualSocketId,
        r_origins: &mut Vec<VirtualSocketId>,
        visited: &mut HashSet<VirtualSocketId>,
    ) {
        if !visited.insert(socket) {
            return;
        }
        let Some(direct) = self.sockets[socket.0].direct_links.as_ref() else {
            return;
        };
        for &origin in direct {
            let node = &self.nodes[self.sockets[origin.0].node.0];
            if node.is_reroute() {
                if let Some(reroute_input) = node.input(0) {
                    self.collect_origins(reroute_input, r_origins, visited);
                }
            } else {
                r_origins.push(origin);
            }
        }
    }

    /// Group all virtual nodes by raw type identifier.
    fn initialize_nodes_by_type(&mut self) {
        for node in &self.nodes {
            self.nodes_by_type
                .entry(node.node_type.clone())
                .or_default()
                .push(node.id);
        }
    }
}

impl Default for VirtualGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeloom_graph::graphs::material::create_material_registry;
    use nodeloom_graph::REROUTE_TYPE;

    /// A.Color -> Reroute -> Output."Base Color", in one raw graph
    fn reroute_chain_graph() -> (Graph, SocketId, SocketId, SocketId, SocketId) {
        let registry = create_material_registry();
        let mut graph = Graph::new("Chain");

        let a = registry.create_node("color_constant").unwrap();
        let reroute = registry.create_node(REROUTE_TYPE).unwrap();
        let output = registry.create_node("material_output").unwrap();

        let a_out = a.outputs[0].id;
        let r_in = reroute.inputs[0].id;
        let r_out = reroute.outputs[0].id;
        let dest = output.inputs[0].id;

        let a_id = graph.add_node(a);
        let r_id = graph.add_node(reroute);
        let out_id = graph.add_node(output);

        graph.connect(a_id, a_out, r_id, r_in).unwrap();
        graph.connect(r_id, r_out, out_id, dest).unwrap();

        (graph, a_out, r_in, r_out, dest)
    }

    #[test]
    fn test_unconnected_nodes_freeze_to_empty_indices() {
        let registry = create_material_registry();
        let a = registry
            .create_node("color_constant")
            .unwrap()
            .with_name("Albedo");
        let b = registry.create_node("float_constant").unwrap();

        let mut vgraph = VirtualGraph::new();
        let a_id = vgraph.add_node(&a).unwrap();
        vgraph.add_node(&b).unwrap();
        vgraph.freeze().unwrap();

        assert_eq!(vgraph.nodes().len(), 2);
        assert!(vgraph.links().is_empty());
        assert!(vgraph.inputs_with_links().is_empty());

        let vnode = vgraph.node(a_id).unwrap();
        assert_eq!(vnode.name(), "Albedo");
        assert_eq!(vnode.node_type(), "color_constant");
        assert_eq!(vnode.raw_node(), a.id);
    }

    #[test]
    fn test_freeze_is_one_way() {
        let registry = create_material_registry();
        let node = registry.create_node("color_constant").unwrap();

        let mut vgraph = VirtualGraph::new();
        vgraph.add_node(&node).unwrap();
        vgraph.freeze().unwrap();

        assert!(vgraph.is_frozen());
        assert!(matches!(vgraph.freeze(), Err(VirtualGraphError::Frozen)));
        assert!(matches!(
            vgraph.add_node(&node),
            Err(VirtualGraphError::Frozen)
        ));
        assert!(matches!(
            vgraph.add_link(VirtualSocketId(0), VirtualSocketId(0)),
            Err(VirtualGraphError::Frozen)
        ));
    }

    #[test]
    #[should_panic(expected = "before freeze")]
    fn test_inputs_with_links_before_freeze_panics() {
        let vgraph = VirtualGraph::new();
        let _ = vgraph.inputs_with_links();
    }

    #[test]
    #[should_panic(expected = "before the virtual graph was frozen")]
    fn test_socket_links_before_freeze_panics() {
        let registry = create_material_registry();
        let node = registry.create_node("material_output").unwrap();

        let mut vgraph = VirtualGraph::new();
        let vnode = vgraph.add_node(&node).unwrap();
        let input = vgraph.node(vnode).unwrap().input(0).unwrap();
        let _ = vgraph.socket(input).unwrap().links();
    }

    #[test]
    fn test_add_link_validates_endpoints() {
        let registry = create_material_registry();
        let a = registry.create_node("color_constant").unwrap();
        let output = registry.create_node("material_output").unwrap();

        let mut vgraph = VirtualGraph::new();
        let a_id = vgraph.add_node(&a).unwrap();
        let out_id = vgraph.add_node(&output).unwrap();
        let a_out = vgraph.node(a_id).unwrap().output(0).unwrap();
        let dest = vgraph.node(out_id).unwrap().input(0).unwrap();

        assert!(matches!(
            vgraph.add_link(a_out, VirtualSocketId(999)),
            Err(VirtualGraphError::UnknownSocket(_))
        ));
        assert!(matches!(
            vgraph.add_link(dest, a_out),
            Err(VirtualGraphError::WrongDirection)
        ));
        vgraph.add_link(a_out, dest).unwrap();
    }

    #[test]
    fn test_ingested_reroute_chain_resolves() {
        let (graph, a_out, r_in, r_out, dest) = reroute_chain_graph();
        let mut vgraph = VirtualGraph::new();
        vgraph.add_graph(&graph).unwrap();
        vgraph.freeze().unwrap();

        // Reroutes stay first-class nodes in the virtual view
        assert_eq!(vgraph.nodes().len(), 3);
        assert_eq!(vgraph.nodes_with_type(REROUTE_TYPE).len(), 1);

        let v_a_out = vgraph.socket_of(a_out).unwrap();
        let v_r_in = vgraph.socket_of(r_in).unwrap();
        let v_r_out = vgraph.socket_of(r_out).unwrap();
        let v_dest = vgraph.socket_of(dest).unwrap();

        let dest_socket = vgraph.socket(v_dest).unwrap();
        assert_eq!(dest_socket.name(), "Base Color");
        assert_eq!(dest_socket.raw_socket(), dest);
        assert_eq!(dest_socket.direct_links(), &[v_r_out]);
        assert_eq!(dest_socket.links(), &[v_a_out]);

        // The reroute's own input still resolves to the real origin
        assert_eq!(vgraph.socket(v_r_in).unwrap().links(), &[v_a_out]);

        // Symmetric: the origin lists only real consumers, with the
        // reroute chain skipped through
        let origin_socket = vgraph.socket(v_a_out).unwrap();
        assert_eq!(origin_socket.links(), &[v_dest]);

        let first = &vgraph.links()[0];
        assert_eq!(first.from(), v_a_out);
        assert_eq!(first.to(), v_r_in);
        assert_eq!(vgraph.link(first.id()).unwrap().to(), v_r_in);
    }

    #[test]
    fn test_inputs_with_links_lists_exactly_linked_inputs() {
        let (graph, _, r_in, _, dest) = reroute_chain_graph();
        let mut vgraph = VirtualGraph::new();
        vgraph.add_graph(&graph).unwrap();
        vgraph.freeze().unwrap();

        let listed: Vec<_> = vgraph.inputs_with_links().to_vec();
        let expected = [
            vgraph.socket_of(r_in).unwrap(),
            vgraph.socket_of(dest).unwrap(),
        ];
        assert_eq!(listed, expected);

        // Cross-check against every socket's resolved links
        for node in vgraph.nodes() {
            for &input in node.inputs() {
                let has_links = !vgraph.socket(input).unwrap().links().is_empty();
                assert_eq!(has_links, listed.contains(&input));
            }
        }
    }

    #[test]
    fn test_merge_two_graphs_and_cross_link() {
        let registry = create_material_registry();

        let mut upstream = Graph::new("Library");
        let a = registry.create_node("color_constant").unwrap();
        let a_out = a.outputs[0].id;
        upstream.add_node(a);

        let mut downstream = Graph::new("Material");
        let output = registry.create_node("material_output").unwrap();
        let dest = output.inputs[0].id;
        downstream.add_node(output);

        let mut vgraph = VirtualGraph::new();
        vgraph.add_graph(&upstream).unwrap();
        vgraph.add_graph(&downstream).unwrap();
        let v_from = vgraph.socket_of(a_out).unwrap();
        let v_to = vgraph.socket_of(dest).unwrap();
        vgraph.add_link(v_from, v_to).unwrap();
        vgraph.freeze().unwrap();

        assert_eq!(vgraph.socket(v_to).unwrap().links(), &[v_from]);
        assert_eq!(vgraph.inputs_with_links(), &[v_to]);
    }

    #[test]
    fn test_nodes_with_type_groups_after_freeze() {
        let registry = create_material_registry();
        let mut vgraph = VirtualGraph::new();
        let c1 = vgraph
            .add_node(&registry.create_node("color_constant").unwrap())
            .unwrap();
        let c2 = vgraph
            .add_node(&registry.create_node("color_constant").unwrap())
            .unwrap();
        vgraph
            .add_node(&registry.create_node("float_constant").unwrap())
            .unwrap();
        vgraph.freeze().unwrap();

        assert_eq!(vgraph.nodes_with_type("color_constant"), &[c1, c2]);
        assert!(vgraph.nodes_with_type("texture_sample").is_empty());
    }

    #[test]
    fn test_reroute_cycle_freezes_without_hanging() {
        let registry = create_material_registry();
        let mut graph = Graph::new("Cycle");
        let r1 = registry.create_node(REROUTE_TYPE).unwrap();
        let r2 = registry.create_node(REROUTE_TYPE).unwrap();
        let r1_in = r1.inputs[0].id;
        let r1_out = r1.outputs[0].id;
        let r2_in = r2.inputs[0].id;
        let r2_out = r2.outputs[0].id;
        let r1_id = graph.add_node(r1);
        let r2_id = graph.add_node(r2);
        graph.connect(r1_id, r1_out, r2_id, r2_in).unwrap();
        graph.connect(r2_id, r2_out, r1_id, r1_in).unwrap();

        let mut vgraph = VirtualGraph::new();
        vgraph.add_graph(&graph).unwrap();
        vgraph.freeze().unwrap();

        let v_r1_in = vgraph.socket_of(r1_in).unwrap();
        assert!(vgraph.socket(v_r1_in).unwrap().links().is_empty());
        assert!(vgraph.inputs_with_links().is_empty());
    }
}
