//! Presenter process infrastructure module

mod alerter;

pub use alerter::{ensure_supported_platform, AlerterLauncher};

use crate::application::alert::{Alert, AlertError};
use crate::application::ports::LaunchError;
use crate::domain::alert::NotificationRequest;

use super::provision::alerter_path;

/// Create an alert for the installed alerter.
///
/// Fails on platforms other than macOS and when no alerter can be found.
pub fn new_alert(message: impl Into<String>) -> Result<Alert<AlerterLauncher>, AlertError> {
    ensure_supported_platform()?;
    let path = alerter_path().map_err(LaunchError::from)?;
    let launcher = AlerterLauncher::new(path)?;
    Ok(Alert::new(NotificationRequest::new(message), launcher))
}
