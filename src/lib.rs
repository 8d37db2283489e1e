//! sx-alerter - macOS notifications through alerter
//!
//! Shows a notification by running the external `alerter` executable and
//! reports how the user (or the OS) dismissed it.
//!
//! ```no_run
//! # async fn demo() -> Result<(), sx_alerter::AlertError> {
//! let mut alert = sx_alerter::new_alert("Name this release please")?;
//! alert.request.reply = true;
//!
//! let record = alert.deliver_and_wait().await?;
//! println!("{:?}: {}", record.kind, record.value);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Notification request, argument builder, activation record, lifecycle state
//! - **Application**: The alert use case and port interfaces (traits)
//! - **Infrastructure**: alerter process adapter, executable lookup, config store
//! - **CLI**: Command-line interface, argument parsing, and output

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

pub use application::{Alert, AlertError, Delivery};
pub use domain::alert::{ActivationKind, ActivationRecord, NotificationRequest, Sound};
pub use infrastructure::{new_alert, AlerterLauncher};
