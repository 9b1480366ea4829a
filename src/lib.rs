//! netimpact - weighted impact scoring for NetBox inventory
//!
//! Scores a maintenance or incident against the devices, circuits and
//! interfaces it touches. Circuits are resolved live from NetBox so that
//! redundant circuits (both ends on the same node) get their discount and
//! their node counted as an affected device.

pub mod cli;
pub mod config;
pub mod inventory;
pub mod models;
pub mod reporters;
pub mod scoring;
pub mod server;
