//! Locating the alerter executable
//!
//! Resolution order: explicit path, `$ALERTER_PATH`, `alerter` on `$PATH`,
//! then `<temp dir>/alerter`. A file found without execute permission is
//! made executable.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::{debug, info};

use crate::application::ports::LaunchError;

/// Executable name
pub const ALERTER_EXECUTABLE: &str = "alerter";

/// Environment variable overriding the executable location
pub const ALERTER_PATH_ENV: &str = "ALERTER_PATH";

static ALERTER_PATH: OnceCell<PathBuf> = OnceCell::new();

/// Provisioning errors
#[derive(Debug, Clone, Error)]
pub enum ProvisionError {
    #[error("alerter not found at {0}")]
    Missing(String),

    #[error("alerter not found. Install it on PATH, set ALERTER_PATH, or run 'sx-alerter config set alerter_path <path>'")]
    NotInstalled,

    #[error("Could not make alerter executable: {0}")]
    Permission(String),
}

impl From<ProvisionError> for LaunchError {
    fn from(e: ProvisionError) -> Self {
        match e {
            ProvisionError::Missing(path) => LaunchError::NotFound(path),
            ProvisionError::NotInstalled => LaunchError::NotFound(e.to_string()),
            ProvisionError::Permission(msg) => LaunchError::StartFailed(msg),
        }
    }
}

/// Resolve the alerter executable, preferring `explicit` when given.
pub fn resolve_alerter_path(explicit: Option<&Path>) -> Result<PathBuf, ProvisionError> {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return prepare(path.to_path_buf());
    }

    if let Some(path) = env::var_os(ALERTER_PATH_ENV).filter(|v| !v.is_empty()) {
        return prepare(PathBuf::from(path));
    }

    if let Ok(path) = which::which(ALERTER_EXECUTABLE) {
        debug!(path = %path.display(), "found alerter on PATH");
        return Ok(path);
    }

    let installed = env::temp_dir().join(ALERTER_EXECUTABLE);
    if installed.is_file() {
        return prepare(installed);
    }

    Err(ProvisionError::NotInstalled)
}

/// Default alerter location, resolved once per process
pub fn alerter_path() -> Result<&'static Path, ProvisionError> {
    ALERTER_PATH
        .get_or_try_init(|| resolve_alerter_path(None))
        .map(PathBuf::as_path)
}

fn prepare(path: PathBuf) -> Result<PathBuf, ProvisionError> {
    if !path.is_file() {
        return Err(ProvisionError::Missing(path.display().to_string()));
    }
    ensure_executable(&path)?;
    Ok(path)
}

#[cfg(unix)]
fn ensure_executable(path: &Path) -> Result<(), ProvisionError> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)
        .map_err(|e| ProvisionError::Permission(e.to_string()))?
        .permissions();

    if permissions.mode() & 0o111 == 0 {
        permissions.set_mode(0o755);
        fs::set_permissions(path, permissions)
            .map_err(|e| ProvisionError::Permission(e.to_string()))?;
        info!(path = %path.display(), "made alerter executable");
    }

    Ok(())
}

#[cfg(not(unix))]
fn ensure_executable(path: &Path) -> Result<(), ProvisionError> {
    fs::metadata(path).map_err(|e| ProvisionError::Permission(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_path_fails() {
        let err = resolve_alerter_path(Some(Path::new("/nonexistent/alerter"))).unwrap_err();
        assert!(matches!(err, ProvisionError::Missing(_)));
        assert!(err.to_string().contains("/nonexistent/alerter"));
    }

    #[test]
    fn explicit_directory_is_not_an_executable() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_alerter_path(Some(dir.path())).unwrap_err();
        assert!(matches!(err, ProvisionError::Missing(_)));
    }

    #[test]
    #[cfg(unix)]
    fn explicit_file_is_made_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerter");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let resolved = resolve_alerter_path(Some(&path)).unwrap();
        assert_eq!(resolved, path);

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn provision_errors_map_to_not_found() {
        assert!(matches!(
            LaunchError::from(ProvisionError::NotInstalled),
            LaunchError::NotFound(_)
        ));
        assert!(matches!(
            LaunchError::from(ProvisionError::Permission("denied".to_string())),
            LaunchError::StartFailed(_)
        ));
    }
}
