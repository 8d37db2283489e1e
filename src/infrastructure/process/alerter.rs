//! alerter process adapter

use std::env::consts::OS;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::debug;

use crate::application::ports::{
    InterruptRequests, LaunchError, PresenterLauncher, PresenterProcess,
};

/// Fail unless running on the only platform alerter exists for
pub fn ensure_supported_platform() -> Result<(), LaunchError> {
    if cfg!(target_os = "macos") {
        Ok(())
    } else {
        Err(LaunchError::UnsupportedPlatform(OS))
    }
}

/// Launches the alerter executable at a resolved path
#[derive(Debug, Clone)]
pub struct AlerterLauncher {
    path: PathBuf,
}

impl AlerterLauncher {
    /// Create a launcher for macOS
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, LaunchError> {
        ensure_supported_platform()?;
        Self::without_platform_check(path)
    }

    /// Create a launcher for any platform.
    ///
    /// Meant for presenters that mimic alerter's command line, such as
    /// scripts standing in for it.
    pub fn without_platform_check(path: impl Into<PathBuf>) -> Result<Self, LaunchError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(LaunchError::EmptyPath);
        }
        Ok(Self { path })
    }

    /// Get the executable path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PresenterLauncher for AlerterLauncher {
    async fn launch(&self, args: &[String]) -> Result<Box<dyn PresenterProcess>, LaunchError> {
        let child = Command::new(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    LaunchError::NotFound(self.path.display().to_string())
                } else {
                    LaunchError::StartFailed(e.to_string())
                }
            })?;

        Ok(Box::new(AlerterProcess { child }))
    }
}

/// Running alerter child
struct AlerterProcess {
    child: Child,
}

impl AlerterProcess {
    /// SIGINT the child, which is still unreaped while it has an id
    fn interrupt(&self) -> Result<(), LaunchError> {
        let pid = self
            .child
            .id()
            .ok_or_else(|| LaunchError::SignalFailed("alerter already exited".to_string()))?;

        #[cfg(unix)]
        {
            use nix::sys::signal::{self, Signal};
            use nix::unistd::Pid;

            debug!(pid, "interrupting alerter");
            signal::kill(Pid::from_raw(pid as i32), Signal::SIGINT)
                .map_err(|e| LaunchError::SignalFailed(e.to_string()))
        }

        #[cfg(not(unix))]
        {
            let _ = pid;
            Err(LaunchError::UnsupportedPlatform(OS))
        }
    }
}

#[async_trait]
impl PresenterProcess for AlerterProcess {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    async fn wait_for_output(
        self: Box<Self>,
        mut interrupts: InterruptRequests,
    ) -> Result<Vec<u8>, LaunchError> {
        let mut process = *self;
        let mut stdout = process
            .child
            .stdout
            .take()
            .ok_or_else(|| LaunchError::WaitFailed("stdout not captured".to_string()))?;

        // Drain stdout while waiting so a full pipe cannot stall the child
        let reader = tokio::spawn(async move {
            let mut output = Vec::new();
            stdout.read_to_end(&mut output).await.map(|_| output)
        });

        let status = loop {
            tokio::select! {
                status = process.child.wait() => {
                    break status.map_err(|e| LaunchError::WaitFailed(e.to_string()))?;
                }
                Some(reply) = interrupts.recv() => {
                    let _ = reply.send(process.interrupt());
                }
            }
        };
        // Requests arriving from now on see a closed channel
        drop(interrupts);

        let output = reader
            .await
            .map_err(|e| LaunchError::WaitFailed(e.to_string()))?
            .map_err(|e| LaunchError::WaitFailed(e.to_string()))?;

        debug!(%status, bytes = output.len(), "alerter exited");
        Ok(output)
    }
}
