//! Presenter launcher port interface

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// Errors raised while starting, signalling or reaping the presenter
#[derive(Debug, Clone, Error)]
pub enum LaunchError {
    #[error("alerter path is empty")]
    EmptyPath,

    #[error("alerter only works on macOS (current platform: {0})")]
    UnsupportedPlatform(&'static str),

    #[error("alerter not found at {0}")]
    NotFound(String),

    #[error("Failed to start alerter: {0}")]
    StartFailed(String),

    #[error("Failed to signal alerter: {0}")]
    SignalFailed(String),

    #[error("Failed waiting for alerter: {0}")]
    WaitFailed(String),
}

/// Answer to one close request
pub type InterruptReply = oneshot::Sender<Result<(), LaunchError>>;

/// Close requests for a running presenter.
///
/// Each request carries a reply slot. Requests still queued when the
/// presenter exits are dropped unanswered.
pub type InterruptRequests = mpsc::Receiver<InterruptReply>;

/// A presenter process that has been started
#[async_trait]
pub trait PresenterProcess: Send {
    /// OS process id, `None` once the process has been reaped
    fn id(&self) -> Option<u32>;

    /// Read everything the presenter prints on stdout, then reap it.
    ///
    /// While waiting, every request on `interrupts` asks the presenter to
    /// close its notification (SIGINT). Once the process is reaped no more
    /// requests are answered.
    async fn wait_for_output(
        self: Box<Self>,
        interrupts: InterruptRequests,
    ) -> Result<Vec<u8>, LaunchError>;
}

/// Port for starting the external notification presenter
#[async_trait]
pub trait PresenterLauncher: Send + Sync {
    /// Start the presenter with the given arguments.
    ///
    /// # Arguments
    /// * `args` - Flags built from a notification request
    ///
    /// # Returns
    /// The running process, whose stdout is connected for reading
    async fn launch(&self, args: &[String]) -> Result<Box<dyn PresenterProcess>, LaunchError>;
}

/// Blanket implementation for boxed launcher types
#[async_trait]
impl PresenterLauncher for Box<dyn PresenterLauncher> {
    async fn launch(&self, args: &[String]) -> Result<Box<dyn PresenterProcess>, LaunchError> {
        self.as_ref().launch(args).await
    }
}
