//! Core data models for netimpact
//!
//! These models are shared by the scorer, the inventory client and the
//! front ends. The serde field names are the wire contract for both the
//! `/calculateImpact` endpoint and the NetBox payloads we read.

use serde::{Deserialize, Deserializer, Serialize};

/// Work categories that scale the whole impact score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkType {
    PlannedWork,
    FiberWorks,
    ElectricalWork,
    IncidentWork,
}

/// Multiplier per work type. Labels outside this table score with 1.0.
const WORK_TYPE_MULTIPLIERS: [(WorkType, f64); 4] = [
    (WorkType::PlannedWork, 1.0),
    (WorkType::FiberWorks, 1.5),
    (WorkType::ElectricalWork, 2.0),
    (WorkType::IncidentWork, 10.0),
];

/// Multiplier applied when the label is unknown or empty
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

impl WorkType {
    pub fn all() -> &'static [WorkType] {
        &[
            WorkType::PlannedWork,
            WorkType::FiberWorks,
            WorkType::ElectricalWork,
            WorkType::IncidentWork,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkType::PlannedWork => "planned-work",
            WorkType::FiberWorks => "fiber-works",
            WorkType::ElectricalWork => "electrical-work",
            WorkType::IncidentWork => "incident-work",
        }
    }

    /// Parse a label exactly as sent by callers. Padded or differently
    /// cased labels are unknown.
    pub fn from_label(label: &str) -> Option<WorkType> {
        Self::all().iter().copied().find(|w| w.label() == label)
    }

    pub fn multiplier(&self) -> f64 {
        WORK_TYPE_MULTIPLIERS
            .iter()
            .find(|(w, _)| w == self)
            .map(|(_, m)| *m)
            .unwrap_or(DEFAULT_MULTIPLIER)
    }

    /// Multiplier for a raw label; unknown labels are not an error.
    pub fn multiplier_for_label(label: &str) -> f64 {
        Self::from_label(label)
            .map(|w| w.multiplier())
            .unwrap_or(DEFAULT_MULTIPLIER)
    }
}

impl std::fmt::Display for WorkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Set of elements affected by a piece of work
///
/// The work-type label is kept as a raw string so unknown labels survive
/// decoding and score with the default multiplier.
/// Missing and `null` fields both decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub device_ids: Vec<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub circuit_ids: Vec<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interface_ids: Vec<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub impact_type: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ImpactRequest {
    pub fn work_type(&self) -> Option<WorkType> {
        WorkType::from_label(&self.impact_type)
    }
}

/// One end of a circuit as NetBox reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Termination {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    pub id: i64,
    #[serde(default)]
    pub cid: String,
    pub termination_a: Termination,
    pub termination_b: Termination,
}

impl Circuit {
    /// Both ends land on the same node
    pub fn is_redundant(&self) -> bool {
        self.termination_a.id == self.termination_b.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// Display name of the owning device
    #[serde(default)]
    pub device: String,
}

/// Count-based contribution (explicit or implicit devices)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceImpact {
    pub count: usize,
    pub weight_per_device: f64,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitImpactDetail {
    pub id: i64,
    pub cid: String,
    pub redundancy_factor: f64,
    pub weight: f64,
    pub impact: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitImpact {
    pub items: Vec<CircuitImpactDetail>,
    pub total_impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceImpact {
    pub count: usize,
    pub weight_per_interface: f64,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactBreakdown {
    pub devices: DeviceImpact,
    pub implicit_devices: DeviceImpact,
    pub circuits: CircuitImpact,
    pub interfaces: InterfaceImpact,
}

/// Final score with every intermediate quantity kept for auditing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub total_impact: f64,
    pub total_impact_before_multiplier: f64,
    pub multiplier: f64,
    pub breakdown: ImpactBreakdown,
}
