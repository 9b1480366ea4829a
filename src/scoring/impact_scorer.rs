//! Weighted impact scorer
//!
//! Resolves circuits one at a time through a [`CircuitLookup`] and folds
//! everything into an [`ImpactResult`].

use crate::inventory::{CircuitLookup, InventoryError};
use crate::models::{
    CircuitImpact, CircuitImpactDetail, DeviceImpact, ImpactBreakdown, ImpactRequest,
    ImpactResult, InterfaceImpact, WorkType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info};

const DEFAULT_DEVICE_WEIGHT: f64 = 5.0;
const DEFAULT_CIRCUIT_WEIGHT: f64 = 3.0;
const DEFAULT_INTERFACE_WEIGHT: f64 = 1.0;
const DEFAULT_REDUNDANCY_DISCOUNT: f64 = 0.8;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("failed to fetch circuit {circuit_id}: {source}")]
    CircuitLookup {
        circuit_id: i64,
        #[source]
        source: InventoryError,
    },
}

/// Per-element weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImpactWeights {
    pub device_weight: f64,
    pub circuit_weight: f64,
    pub interface_weight: f64,
    /// Factor applied to a redundant circuit's weight
    pub redundancy_discount: f64,
}

impl Default for ImpactWeights {
    fn default() -> Self {
        Self {
            device_weight: DEFAULT_DEVICE_WEIGHT,
            circuit_weight: DEFAULT_CIRCUIT_WEIGHT,
            interface_weight: DEFAULT_INTERFACE_WEIGHT,
            redundancy_discount: DEFAULT_REDUNDANCY_DISCOUNT,
        }
    }
}

impl ImpactWeights {
    /// Check that weights are finite and non-negative and the discount is in [0, 1]
    pub fn validate(&self) -> Result<(), String> {
        let weights = [
            ("device_weight", self.device_weight),
            ("circuit_weight", self.circuit_weight),
            ("interface_weight", self.interface_weight),
            ("redundancy_discount", self.redundancy_discount),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number, got {}", name, value));
            }
        }
        if self.redundancy_discount > 1.0 {
            return Err(format!(
                "redundancy_discount must be between 0 and 1, got {}",
                self.redundancy_discount
            ));
        }
        Ok(())
    }

    fn redundancy_factor(&self, redundant: bool) -> f64 {
        if redundant {
            self.redundancy_discount
        } else {
            1.0
        }
    }
}

/// Impact scorer bound to an inventory lookup
pub struct ImpactScorer<L> {
    lookup: L,
    weights: ImpactWeights,
}

impl<L: CircuitLookup> ImpactScorer<L> {
    pub fn new(lookup: L) -> Self {
        Self::with_weights(lookup, ImpactWeights::default())
    }

    pub fn with_weights(lookup: L, weights: ImpactWeights) -> Self {
        Self { lookup, weights }
    }

    /// Calculate the impact of a request.
    ///
    /// Circuits are looked up sequentially in request order. The first failed
    /// lookup aborts the calculation; no partial result is returned.
    pub fn calculate(&self, request: &ImpactRequest) -> Result<ImpactResult, ScoringError> {
        let w = &self.weights;

        let device_count = request.device_ids.len();
        let device_impact = device_count as f64 * w.device_weight;

        let interface_count = request.interface_ids.len();
        let interface_impact = interface_count as f64 * w.interface_weight;

        let mut items = Vec::with_capacity(request.circuit_ids.len());
        let mut circuit_total = 0.0;
        let mut implicit_nodes = BTreeSet::new();

        for &circuit_id in &request.circuit_ids {
            let circuit = self
                .lookup
                .fetch_circuit(circuit_id)
                .map_err(|source| ScoringError::CircuitLookup { circuit_id, source })?;

            let redundant = circuit.is_redundant();
            let factor = w.redundancy_factor(redundant);
            let impact = w.circuit_weight * factor;

            debug!(
                "Circuit {} ({}): redundant={}, factor={}, impact={}",
                circuit.id, circuit.cid, redundant, factor, impact
            );

            if redundant {
                implicit_nodes.insert(circuit.termination_a.id);
            }
            circuit_total += impact;
            items.push(CircuitImpactDetail {
                id: circuit.id,
                cid: circuit.cid,
                redundancy_factor: factor,
                weight: w.circuit_weight,
                impact,
            });
        }

        let implicit_count = implicit_nodes.len();
        let implicit_impact = implicit_count as f64 * w.device_weight;

        let before_multiplier = device_impact + implicit_impact + circuit_total + interface_impact;
        let multiplier = WorkType::multiplier_for_label(&request.impact_type);
        let total = multiplier * before_multiplier;

        info!(
            "Impact score: {:.2} (x{} of {:.2}) - devices: {}, implicit: {}, circuits: {}, interfaces: {}",
            total, multiplier, before_multiplier, device_count, implicit_count, items.len(), interface_count
        );

        Ok(ImpactResult {
            total_impact: total,
            total_impact_before_multiplier: before_multiplier,
            multiplier,
            breakdown: ImpactBreakdown {
                devices: DeviceImpact {
                    count: device_count,
                    weight_per_device: w.device_weight,
                    impact: device_impact,
                },
                implicit_devices: DeviceImpact {
                    count: implicit_count,
                    weight_per_device: w.device_weight,
                    impact: implicit_impact,
                },
                circuits: CircuitImpact {
                    items,
                    total_impact: circuit_total,
                },
                interfaces: InterfaceImpact {
                    count: interface_count,
                    weight_per_interface: w.interface_weight,
                    impact: interface_impact,
                },
            },
        })
    }
}
