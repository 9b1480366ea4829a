//! Impact Scoring
//!
//! Computes how disruptive it is to take a set of network elements out of
//! service. The result keeps every intermediate quantity so a caller can
//! audit how the total was reached.
//!
//! # Scoring Formula
//!
//! ```text
//! Total = Multiplier × (Devices + ImplicitDevices + Circuits + Interfaces)
//!
//! Where:
//!   Devices         = count(device_ids)    × 5.0
//!   Interfaces      = count(interface_ids) × 1.0
//!   Circuits        = Σ 3.0 × redundancy_factor   (one term per circuit id)
//!   ImplicitDevices = |{ termination_a of each redundant circuit }| × 5.0
//! ```
//!
//! # Redundancy
//!
//! A circuit is redundant when both terminations land on the same node.
//! Redundant circuits get a 0.8 discount, and the node they terminate on is
//! counted as an implicitly affected device (once, however many redundant
//! circuits share it).
//!
//! # Work-type Multipliers
//!
//! - planned-work: 1.0
//! - fiber-works: 1.5
//! - electrical-work: 2.0
//! - incident-work: 10.0
//! - anything else: 1.0
//!
//! # Example
//!
//! One redundant circuit on node 7, incident work:
//! - Circuits = 3.0 × 0.8 = 2.4
//! - ImplicitDevices = 1 × 5.0 = 5.0
//! - Total = 10.0 × 7.4 = 74.0

mod impact_scorer;

pub use impact_scorer::{ImpactScorer, ImpactWeights, ScoringError};
