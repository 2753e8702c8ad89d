//! Network validation logic.

use std::collections::VecDeque;

use hf_core::LinkId;

use crate::error::{NetworkError, NetworkResult};
use crate::network::{Boundary, Endpoint, Link, Node};

/// Validate values and references: positive capacitances and resistances,
/// finite boundary temperatures, links pointing at existing objects.
pub(crate) fn validate_structure(
    nodes: &[Node],
    boundaries: &[Boundary],
    links: &[Link],
) -> NetworkResult<()> {
    if nodes.is_empty() {
        return Err(NetworkError::Empty);
    }

    for node in nodes {
        let c = node.capacitance_j_per_k;
        if !(c.is_finite() && c > 0.0) {
            return Err(NetworkError::NonPositiveCapacitance {
                name: node.name.clone(),
                value: c,
            });
        }
    }

    for boundary in boundaries {
        if !boundary.temperature_c.is_finite() {
            return Err(NetworkError::NonFiniteBoundary {
                name: boundary.name.clone(),
                value: boundary.temperature_c,
            });
        }
    }

    for link in links {
        if link.from.slot() >= nodes.len() {
            return Err(NetworkError::InvalidNodeRef {
                link: link.id,
                node: link.from,
            });
        }
        match link.to {
            Endpoint::Node(other) if other.slot() >= nodes.len() => {
                return Err(NetworkError::InvalidNodeRef {
                    link: link.id,
                    node: other,
                });
            }
            Endpoint::Node(other) if other == link.from => {
                return Err(NetworkError::SelfLink {
                    link: link.id,
                    node: other,
                });
            }
            Endpoint::Boundary(b) if b.slot() >= boundaries.len() => {
                return Err(NetworkError::InvalidBoundaryRef {
                    link: link.id,
                    boundary: b,
                });
            }
            _ => {}
        }

        let r = link.resistance_k_per_w;
        if !(r.is_finite() && r > 0.0) {
            return Err(NetworkError::NonPositiveResistance {
                link: link.id,
                value: r,
            });
        }
    }

    Ok(())
}

/// Every node must be reachable from the first one through node-to-node links.
pub(crate) fn validate_connected(
    nodes: &[Node],
    links: &[Link],
    node_link_offsets: &[usize],
    node_links: &[LinkId],
) -> NetworkResult<()> {
    let mut seen = vec![false; nodes.len()];
    let mut queue = VecDeque::from([0_usize]);
    seen[0] = true;

    while let Some(idx) = queue.pop_front() {
        let incident = &node_links[node_link_offsets[idx]..node_link_offsets[idx + 1]];
        for &link_id in incident {
            let Some(Endpoint::Node(next)) = links[link_id.slot()].opposite(nodes[idx].id) else {
                continue;
            };
            if !seen[next.slot()] {
                seen[next.slot()] = true;
                queue.push_back(next.slot());
            }
        }
    }

    match seen.iter().position(|&s| !s) {
        Some(idx) => Err(NetworkError::Disconnected {
            name: nodes[idx].name.clone(),
        }),
        None => Ok(()),
    }
}
