//! Shared types for the Garage Mitre backend
//!
//! Domain models used across the server and the printer crate,
//! plus small utility functions (IDs, timestamps).

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
