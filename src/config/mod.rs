//! Configuration module for netimpact
//!
//! This module handles:
//! - NetBox connection settings (URL, token, auth scheme, timeout)
//! - Service listen address
//! - Scoring weight overrides

mod user_config;

pub use user_config::{
    InventoryConfig, ServerConfig, UserConfig, DEFAULT_BIND, DEFAULT_NETBOX_URL, DEFAULT_PORT,
};
