//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the alerter executable and the filesystem.

pub mod config;
pub mod process;
pub mod provision;

// Re-export adapters
pub use config::XdgConfigStore;
pub use process::{ensure_supported_platform, new_alert, AlerterLauncher};
pub use provision::{alerter_path, resolve_alerter_path, ProvisionError};
