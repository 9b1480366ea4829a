//! NetBox inventory access
//!
//! The scorer only needs to resolve circuits by id. The interactive runner
//! additionally lists devices, circuits and interfaces to build its prompts.
//! Both capabilities are traits so tests can swap in an in-memory inventory.
//!
//! # Example
//!
//! ```rust,ignore
//! use netimpact::inventory::{CircuitLookup, NetboxClient, InventorySettings};
//!
//! let client = NetboxClient::new(InventorySettings::new("https://netbox.example.net", "token"));
//! let circuit = client.fetch_circuit(42)?;
//! ```

mod client;

pub use client::{AuthScheme, InventorySettings, NetboxClient, DEFAULT_TIMEOUT_SECS};

use crate::models::{Circuit, Device, Interface};
use thiserror::Error;

/// Errors that can occur while talking to the inventory
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InventoryError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("unexpected payload from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Resolve a circuit (and its two terminations) by id
pub trait CircuitLookup {
    fn fetch_circuit(&self, id: i64) -> InventoryResult<Circuit>;
}

/// Bulk listings used to populate interactive prompts
pub trait InventoryCatalog {
    fn list_devices(&self) -> InventoryResult<Vec<Device>>;
    fn list_circuits(&self) -> InventoryResult<Vec<Circuit>>;
    fn list_interfaces(&self) -> InventoryResult<Vec<Interface>>;
}

impl<T: CircuitLookup + ?Sized> CircuitLookup for &T {
    fn fetch_circuit(&self, id: i64) -> InventoryResult<Circuit> {
        (**self).fetch_circuit(id)
    }
}

impl<T: CircuitLookup + ?Sized> CircuitLookup for std::sync::Arc<T> {
    fn fetch_circuit(&self, id: i64) -> InventoryResult<Circuit> {
        (**self).fetch_circuit(id)
    }
}
