//! Core network data structures.

use hf_core::{BoundaryId, LinkId, NodeId};

/// A thermal mass with a single temperature state.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// Heat capacity (J/K)
    pub capacitance_j_per_k: f64,
}

/// A fixed-temperature reservoir (e.g. outdoor air). Not a state.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub id: BoundaryId,
    pub name: String,
    /// Temperature (°C)
    pub temperature_c: f64,
}

/// The far end of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Node(NodeId),
    Boundary(BoundaryId),
}

/// An undirected conduction/convection path.
///
/// `from` is always a node; `to` is either another node or a boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: LinkId,
    pub from: NodeId,
    pub to: Endpoint,
    /// Thermal resistance (K/W)
    pub resistance_k_per_w: f64,
}

impl Link {
    /// Conductance 1/R (W/K).
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance_k_per_w
    }

    /// The endpoint opposite to `node`, or `None` if the link does not touch it.
    pub fn opposite(&self, node: NodeId) -> Option<Endpoint> {
        if self.from == node {
            Some(self.to)
        } else if self.to == Endpoint::Node(node) {
            Some(Endpoint::Node(self.from))
        } else {
            None
        }
    }
}

/// A validated, immutable RC network.
///
/// Nodes, boundaries and links are stored in vectors indexed by their IDs,
/// with compact node->link adjacency. Node order is the state vector order.
#[derive(Debug, Clone)]
pub struct ThermalNetwork {
    pub(crate) nodes: Vec<Node>,
    pub(crate) boundaries: Vec<Boundary>,
    pub(crate) links: Vec<Link>,

    /// Node i's links are in node_links[node_link_offsets[i]..node_link_offsets[i+1]].
    pub(crate) node_link_offsets: Vec<usize>,

    /// Flat list of link IDs incident to nodes, sorted by node then link ID.
    pub(crate) node_links: Vec<LinkId>,
}

impl ThermalNetwork {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Number of state nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a built network; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot())
    }

    pub fn boundary(&self, id: BoundaryId) -> Option<&Boundary> {
        self.boundaries.get(id.slot())
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.slot())
    }

    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    pub fn boundary_by_name(&self, name: &str) -> Option<BoundaryId> {
        self.boundaries.iter().find(|b| b.name == name).map(|b| b.id)
    }

    /// Link IDs incident to a node.
    pub fn node_links(&self, node_id: NodeId) -> &[LinkId] {
        let idx = node_id.slot();
        if idx >= self.nodes.len() {
            return &[];
        }
        let start = self.node_link_offsets[idx];
        let end = self.node_link_offsets[idx + 1];
        &self.node_links[start..end]
    }

    /// Capacitance vector `C[0..k]` in node order (J/K).
    pub fn capacitances(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.capacitance_j_per_k).collect()
    }

    /// Node names in state order.
    pub fn node_names(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.name.clone()).collect()
    }

    /// Boundary temperatures in boundary order (°C).
    pub fn boundary_temperatures(&self) -> Vec<f64> {
        self.boundaries.iter().map(|b| b.temperature_c).collect()
    }

    /// Resistance between two nodes, summed over parallel links (K/W).
    ///
    /// Returns `None` if the nodes are not directly linked.
    pub fn resistance_between(&self, a: NodeId, b: NodeId) -> Option<f64> {
        let g: f64 = self
            .node_links(a)
            .iter()
            .filter_map(|&l| self.link(l))
            .filter(|l| l.opposite(a) == Some(Endpoint::Node(b)))
            .map(Link::conductance)
            .sum();
        (g > 0.0).then(|| 1.0 / g)
    }

    /// Stored heat relative to 0 °C, Σ C_i·T_i (J).
    pub fn stored_heat(&self, temperatures_c: &[f64]) -> f64 {
        self.nodes
            .iter()
            .zip(temperatures_c)
            .map(|(n, t)| n.capacitance_j_per_k * t)
            .sum()
    }
}
