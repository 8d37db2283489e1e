//! Application layer - Use cases and port interfaces
//!
//! Contains the alert lifecycle and trait definitions
//! for external system interactions.

pub mod alert;
pub mod ports;

// Re-export use cases
pub use alert::{Alert, AlertError, Delivery};
