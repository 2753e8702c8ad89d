//! Incremental network builder.

use std::collections::HashMap;

use hf_core::{BoundaryId, LinkId, NodeId};
use tracing::debug;

use crate::error::NetworkResult;
use crate::layer::Wall;
use crate::network::{Boundary, Endpoint, Link, Node, ThermalNetwork};
use crate::validate;

/// Builder for constructing a thermal network incrementally.
///
/// Use `add_node`, `add_boundary` and the link methods (or `add_wall` for a
/// whole layered wall), then call `build()` to validate and freeze the network.
#[derive(Debug, Default)]
pub struct ThermalNetworkBuilder {
    nodes: Vec<Node>,
    boundaries: Vec<Boundary>,
    links: Vec<Link>,
}

impl ThermalNetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a capacitance node and return its ID.
    pub fn add_node(&mut self, name: impl Into<String>, capacitance_j_per_k: f64) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            name: name.into(),
            capacitance_j_per_k,
        });
        id
    }

    /// Add a fixed-temperature boundary and return its ID.
    pub fn add_boundary(&mut self, name: impl Into<String>, temperature_c: f64) -> BoundaryId {
        let id = BoundaryId::from_index(self.boundaries.len() as u32);
        self.boundaries.push(Boundary {
            id,
            name: name.into(),
            temperature_c,
        });
        id
    }

    /// Link two nodes through a thermal resistance (K/W).
    pub fn add_link(&mut self, a: NodeId, b: NodeId, resistance_k_per_w: f64) -> LinkId {
        self.push_link(a, Endpoint::Node(b), resistance_k_per_w)
    }

    /// Link a node to a boundary through a thermal resistance (K/W).
    pub fn add_boundary_link(
        &mut self,
        node: NodeId,
        boundary: BoundaryId,
        resistance_k_per_w: f64,
    ) -> LinkId {
        self.push_link(node, Endpoint::Boundary(boundary), resistance_k_per_w)
    }

    fn push_link(&mut self, from: NodeId, to: Endpoint, resistance_k_per_w: f64) -> LinkId {
        let id = LinkId::from_index(self.links.len() as u32);
        self.links.push(Link {
            id,
            from,
            to,
            resistance_k_per_w,
        });
        id
    }

    /// Discretize a layered wall between `interior` and the `exterior` boundary.
    ///
    /// Every layer gets its own node(s), however thin. For a single-node layer
    /// the node sits at the midplane, so the link to each neighbour carries half
    /// of the layer's conduction resistance. A layer with `m >= 2` subdivisions
    /// puts nodes on both faces and at `m - 2` interior planes; face nodes hold
    /// half a slice of capacitance and add no resistance to the adjacent link,
    /// so two subdivided layers may not follow each other.
    ///
    /// Returns the new node IDs ordered from the interior outwards.
    pub fn add_wall(
        &mut self,
        interior: NodeId,
        wall: &Wall,
        exterior: BoundaryId,
    ) -> NetworkResult<Vec<NodeId>> {
        wall.validate()?;

        let area = wall.area_m2;
        let mut created = Vec::new();
        let mut prev = interior;
        // Resistance accumulated on the `prev` side of the next link.
        let mut pending_r = wall.interior_film_resistance();

        for layer in &wall.layers {
            let r_layer = layer.resistance(area);
            let c_layer = layer.capacitance(area);
            let m = layer.subdivisions;

            if m == 1 {
                let id = self.add_node(layer.name.clone(), c_layer);
                self.add_link(prev, id, pending_r + 0.5 * r_layer);
                created.push(id);
                prev = id;
                pending_r = 0.5 * r_layer;
                continue;
            }

            let slices = (m - 1) as f64;
            let slice_r = r_layer / slices;
            let slice_c = c_layer / slices;
            for j in 0..m {
                let face = j == 0 || j == m - 1;
                let c = if face { 0.5 * slice_c } else { slice_c };
                let id = self.add_node(format!("{}[{j}]", layer.name), c);
                let r = if j == 0 { pending_r } else { slice_r };
                self.add_link(prev, id, r);
                created.push(id);
                prev = id;
            }
            pending_r = 0.0;
        }

        self.add_boundary_link(prev, exterior, pending_r + wall.exterior_film_resistance());

        debug!(
            layers = wall.layers.len(),
            nodes = created.len(),
            u_value = wall.u_value(),
            "wall discretized"
        );
        Ok(created)
    }

    /// Build and validate the network, returning an immutable `ThermalNetwork`.
    pub fn build(self) -> NetworkResult<ThermalNetwork> {
        validate::validate_structure(&self.nodes, &self.boundaries, &self.links)?;

        let (node_link_offsets, node_links) = Self::build_adjacency(&self.nodes, &self.links);

        validate::validate_connected(&self.nodes, &self.links, &node_link_offsets, &node_links)?;

        debug!(
            nodes = self.nodes.len(),
            boundaries = self.boundaries.len(),
            links = self.links.len(),
            "thermal network built"
        );

        Ok(ThermalNetwork {
            nodes: self.nodes,
            boundaries: self.boundaries,
            links: self.links,
            node_link_offsets,
            node_links,
        })
    }

    /// Build compact adjacency lists: for each node, collect its incident links.
    fn build_adjacency(nodes: &[Node], links: &[Link]) -> (Vec<usize>, Vec<LinkId>) {
        let mut node_to_links: HashMap<NodeId, Vec<LinkId>> = HashMap::new();
        for link in links {
            node_to_links.entry(link.from).or_default().push(link.id);
            if let Endpoint::Node(other) = link.to {
                node_to_links.entry(other).or_default().push(link.id);
            }
        }

        // Sort each node's link list for determinism
        for list in node_to_links.values_mut() {
            list.sort_by_key(|l| l.index());
        }

        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        let mut flat = Vec::new();
        offsets.push(0);

        for node in nodes {
            if let Some(list) = node_to_links.get(&node.id) {
                flat.extend_from_slice(list);
            }
            offsets.push(flat.len());
        }

        (offsets, flat)
    }
}
