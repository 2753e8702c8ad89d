//! Material layers and layered walls.

use hf_core::ensure_positive;

use crate::error::{NetworkError, NetworkResult};

/// A homogeneous material layer of a wall.
///
/// Properties are per unit area; the wall supplies the cross-sectional area.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    /// Thickness (m)
    pub thickness_m: f64,
    /// Thermal conductivity (W/m·K)
    pub conductivity_w_per_m_k: f64,
    /// Density (kg/m³)
    pub density_kg_per_m3: f64,
    /// Specific heat capacity (J/kg·K)
    pub specific_heat_j_per_kg_k: f64,
    /// Number of capacitance nodes for this layer.
    ///
    /// `1` places a single node at the layer's midplane. `m >= 2` places `m`
    /// evenly spaced nodes including both faces.
    pub subdivisions: usize,
}

impl Layer {
    pub fn new(
        name: impl Into<String>,
        thickness_m: f64,
        conductivity_w_per_m_k: f64,
        density_kg_per_m3: f64,
        specific_heat_j_per_kg_k: f64,
    ) -> Self {
        Self {
            name: name.into(),
            thickness_m,
            conductivity_w_per_m_k,
            density_kg_per_m3,
            specific_heat_j_per_kg_k,
            subdivisions: 1,
        }
    }

    pub fn with_subdivisions(mut self, subdivisions: usize) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    /// Volume (m³) for the given cross-sectional area.
    pub fn volume(&self, area_m2: f64) -> f64 {
        self.thickness_m * area_m2
    }

    /// Heat capacity (J/K): density × specific heat × volume.
    pub fn capacitance(&self, area_m2: f64) -> f64 {
        self.density_kg_per_m3 * self.specific_heat_j_per_kg_k * self.volume(area_m2)
    }

    /// Conduction resistance across the full thickness (K/W).
    pub fn resistance(&self, area_m2: f64) -> f64 {
        self.thickness_m / (self.conductivity_w_per_m_k * area_m2)
    }

    pub(crate) fn validate(&self) -> NetworkResult<()> {
        let invalid = |what| NetworkError::InvalidLayer {
            layer: self.name.clone(),
            what,
        };
        ensure_positive(self.thickness_m, "thickness").map_err(|_| invalid("thickness must be positive"))?;
        ensure_positive(self.conductivity_w_per_m_k, "conductivity")
            .map_err(|_| invalid("conductivity must be positive"))?;
        ensure_positive(self.density_kg_per_m3, "density").map_err(|_| invalid("density must be positive"))?;
        ensure_positive(self.specific_heat_j_per_kg_k, "specific heat")
            .map_err(|_| invalid("specific heat must be positive"))?;
        if self.subdivisions == 0 {
            return Err(invalid("subdivisions must be at least 1"));
        }
        Ok(())
    }
}

/// A layered wall between an interior air node and an exterior boundary.
///
/// Layers are ordered from the interior side outwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    /// Cross-sectional area shared by all layers (m²)
    pub area_m2: f64,
    /// Interior convective coefficient (W/m²·K)
    pub h_in_w_per_m2_k: f64,
    /// Exterior convective coefficient (W/m²·K)
    pub h_out_w_per_m2_k: f64,
    pub layers: Vec<Layer>,
}

impl Wall {
    pub fn new(area_m2: f64, h_in_w_per_m2_k: f64, h_out_w_per_m2_k: f64) -> Self {
        Self {
            area_m2,
            h_in_w_per_m2_k,
            h_out_w_per_m2_k,
            layers: Vec::new(),
        }
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Interior film resistance 1/(h_in·A) (K/W).
    pub fn interior_film_resistance(&self) -> f64 {
        1.0 / (self.h_in_w_per_m2_k * self.area_m2)
    }

    /// Exterior film resistance 1/(h_out·A) (K/W).
    pub fn exterior_film_resistance(&self) -> f64 {
        1.0 / (self.h_out_w_per_m2_k * self.area_m2)
    }

    /// Air-to-air resistance of the whole assembly (K/W).
    pub fn total_resistance(&self) -> f64 {
        let conduction: f64 = self.layers.iter().map(|l| l.resistance(self.area_m2)).sum();
        self.interior_film_resistance() + conduction + self.exterior_film_resistance()
    }

    /// Thermal transmittance (W/m²·K).
    pub fn u_value(&self) -> f64 {
        1.0 / (self.total_resistance() * self.area_m2)
    }

    pub(crate) fn validate(&self) -> NetworkResult<()> {
        ensure_positive(self.area_m2, "wall area")
            .map_err(|_| NetworkError::InvalidWall { what: "area must be positive" })?;
        ensure_positive(self.h_in_w_per_m2_k, "h_in").map_err(|_| NetworkError::InvalidWall {
            what: "interior convective coefficient must be positive",
        })?;
        ensure_positive(self.h_out_w_per_m2_k, "h_out").map_err(|_| NetworkError::InvalidWall {
            what: "exterior convective coefficient must be positive",
        })?;
        if self.layers.is_empty() {
            return Err(NetworkError::InvalidWall {
                what: "at least one layer is required",
            });
        }
        self.layers.iter().try_for_each(Layer::validate)?;
        // Both would put a face node on the shared plane, joined by a zero resistance.
        if let Some(pair) = self
            .layers
            .windows(2)
            .find(|p| p[0].subdivisions > 1 && p[1].subdivisions > 1)
        {
            return Err(NetworkError::AdjacentSubdividedLayers {
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
            });
        }
        Ok(())
    }
}
