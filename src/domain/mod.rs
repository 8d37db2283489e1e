//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod alert;
pub mod config;
pub mod error;

// Re-export common types
pub use alert::{
    build_arguments, ActivationKind, ActivationRecord, AlertSession, AlertState,
    NotificationRequest, Sound,
};
pub use config::AppConfig;
pub use error::*;
