//! Explicit Euler update of an RC thermal network.

use hf_core::{BoundaryId, NodeId};
use hf_network::{Endpoint, ThermalNetwork};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::{SimError, SimResult};

/// Heat injected at a node during one step (W).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatInput {
    pub node: NodeId,
    pub power_w: f64,
}

/// One boundary link seen from its node.
#[derive(Debug, Clone, Copy)]
struct BoundaryTerm {
    row: usize,
    boundary: usize,
    /// `Δt·G / C_row`
    coeff: f64,
}

/// Explicit recurrence `T_next = A·T_prev + B` for a fixed time step.
///
/// ```text
/// A[i][i] = 1 - (Δt/C_i)·Σ G_ik      (all links of i, boundary links included)
/// A[i][j] = (Δt/C_i)·G_ij            (node neighbours)
/// B[i]    = Σ (Δt/C_i)·G_ib·T_b + (Δt/C_i)·Q_i
/// ```
///
/// `A` is stored row-compressed; a chain has at most three entries per row.
/// The boundary part of `B` is precomputed and only changes through
/// [`set_boundary_temperature`](Self::set_boundary_temperature).
///
/// Stability requires every diagonal entry to stay non-negative. That is a
/// precondition on `Δt` the caller must honour; [`min_diagonal`](Self::min_diagonal)
/// and [`ExplicitUpdater::max_stable_dt`] help check it.
#[derive(Debug, Clone)]
pub struct ExplicitUpdater {
    dt_s: f64,
    /// `Δt / C_i`
    dt_over_c: Vec<f64>,
    diagonal: Vec<f64>,
    row_offsets: Vec<usize>,
    columns: Vec<usize>,
    coefficients: Vec<f64>,
    boundary_terms: Vec<BoundaryTerm>,
    boundary_temperatures: Vec<f64>,
    /// Boundary contribution to `B`
    fixed_forcing: Vec<f64>,
}

impl ExplicitUpdater {
    /// Assemble the update for `network` at time step `dt_s`.
    ///
    /// # Errors
    /// Returns error if `dt_s` is not a positive finite number.
    pub fn new(network: &ThermalNetwork, dt_s: f64) -> SimResult<Self> {
        if !(dt_s.is_finite() && dt_s > 0.0) {
            return Err(SimError::InvalidArg {
                what: "time step must be positive",
            });
        }

        let n = network.len();
        let dt_over_c: Vec<f64> = network
            .capacitances()
            .iter()
            .map(|c| dt_s / c)
            .collect();

        let mut diagonal = vec![1.0; n];
        let mut row_offsets = Vec::with_capacity(n + 1);
        let mut columns = Vec::new();
        let mut coefficients = Vec::new();
        let mut boundary_terms = Vec::new();

        row_offsets.push(0);
        for node in network.nodes() {
            let row = node.id.slot();
            for &link_id in network.node_links(node.id) {
                let Some(link) = network.link(link_id) else {
                    continue;
                };
                let coeff = dt_over_c[row] * link.conductance();
                diagonal[row] -= coeff;
                match link.opposite(node.id) {
                    Some(Endpoint::Node(other)) => {
                        columns.push(other.slot());
                        coefficients.push(coeff);
                    }
                    Some(Endpoint::Boundary(b)) => boundary_terms.push(BoundaryTerm {
                        row,
                        boundary: b.slot(),
                        coeff,
                    }),
                    None => {}
                }
            }
            row_offsets.push(columns.len());
        }

        let mut updater = Self {
            dt_s,
            dt_over_c,
            diagonal,
            row_offsets,
            columns,
            coefficients,
            boundary_terms,
            boundary_temperatures: network.boundary_temperatures(),
            fixed_forcing: vec![0.0; n],
        };
        updater.refresh_fixed_forcing();

        debug!(
            nodes = n,
            off_diagonal = updater.coefficients.len(),
            boundary_links = updater.boundary_terms.len(),
            min_diagonal = updater.min_diagonal(),
            dt_s,
            "explicit update assembled"
        );
        Ok(updater)
    }

    /// Largest time step for which every diagonal entry stays non-negative:
    /// `min_i C_i / Σ G_ik`.
    pub fn max_stable_dt(network: &ThermalNetwork) -> f64 {
        let mut total_g = vec![0.0; network.len()];
        for link in network.links() {
            let g = link.conductance();
            total_g[link.from.slot()] += g;
            if let Endpoint::Node(other) = link.to {
                total_g[other.slot()] += g;
            }
        }
        network
            .nodes()
            .iter()
            .zip(total_g)
            .map(|(node, g)| node.capacitance_j_per_k / g)
            .fold(f64::INFINITY, f64::min)
    }

    fn refresh_fixed_forcing(&mut self) {
        self.fixed_forcing.iter_mut().for_each(|b| *b = 0.0);
        for term in &self.boundary_terms {
            self.fixed_forcing[term.row] += term.coeff * self.boundary_temperatures[term.boundary];
        }
    }

    pub fn dt(&self) -> f64 {
        self.dt_s
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.diagonal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagonal.is_empty()
    }

    /// Smallest diagonal entry of `A`; negative means the step is unstable.
    pub fn min_diagonal(&self) -> f64 {
        self.diagonal.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Change a boundary temperature for subsequent steps.
    pub fn set_boundary_temperature(&mut self, boundary: BoundaryId, temperature_c: f64) -> SimResult<()> {
        if boundary.slot() >= self.boundary_temperatures.len() {
            return Err(SimError::InvalidArg {
                what: "unknown boundary",
            });
        }
        if !temperature_c.is_finite() {
            return Err(SimError::NonPhysical {
                what: "boundary temperature must be finite",
            });
        }
        self.boundary_temperatures[boundary.slot()] = temperature_c;
        self.refresh_fixed_forcing();
        Ok(())
    }

    pub fn boundary_temperature(&self, boundary: BoundaryId) -> Option<f64> {
        self.boundary_temperatures.get(boundary.slot()).copied()
    }

    /// Build `B` for one step: boundary terms plus `Δt·Q/C` for every input.
    ///
    /// # Errors
    /// Returns error if an input names a node outside the network.
    pub fn forcing(&self, inputs: &[HeatInput]) -> SimResult<Vec<f64>> {
        let mut b = self.fixed_forcing.clone();
        for input in inputs {
            let slot = input.node.slot();
            let (Some(term), Some(dt_over_c)) = (b.get_mut(slot), self.dt_over_c.get(slot)) else {
                return Err(SimError::InvalidArg {
                    what: "heat input targets a node outside the network",
                });
            };
            *term += dt_over_c * input.power_w;
        }
        Ok(b)
    }

    /// `T_next = A·T_prev + B`.
    pub fn advance(&self, prev: &[f64], b: &[f64]) -> Vec<f64> {
        let mut next = vec![0.0; self.len()];
        self.advance_into(prev, b, &mut next);
        next
    }

    /// In-place variant of [`advance`](Self::advance); `next` must not alias `prev`.
    pub fn advance_into(&self, prev: &[f64], b: &[f64], next: &mut [f64]) {
        debug_assert_eq!(prev.len(), self.len());
        debug_assert_eq!(b.len(), self.len());
        debug_assert_eq!(next.len(), self.len());

        for (i, out) in next.iter_mut().enumerate() {
            let mut acc = self.diagonal[i] * prev[i] + b[i];
            for k in self.row_offsets[i]..self.row_offsets[i + 1] {
                acc += self.coefficients[k] * prev[self.columns[k]];
            }
            *out = acc;
        }
    }

    /// Dense copy of `A`.
    pub fn to_dense(&self) -> DMatrix<f64> {
        let n = self.len();
        let mut a = DMatrix::zeros(n, n);
        for i in 0..n {
            a[(i, i)] = self.diagonal[i];
            for k in self.row_offsets[i]..self.row_offsets[i + 1] {
                a[(i, self.columns[k])] += self.coefficients[k];
            }
        }
        a
    }

    /// Boundary part of `B` as a dense vector.
    pub fn fixed_forcing(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.fixed_forcing)
    }
}
