//! Alert delivery use case
//!
//! An [`Alert`] owns a notification request and at most one running
//! presenter. [`Alert::deliver`] returns a [`Delivery`] slot right after the
//! presenter has started; a background task waits for it to exit, decodes
//! its output and fills the slot exactly once.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::domain::alert::{
    build_arguments, ActivationRecord, AlertSession, AlertState, NotificationRequest,
};
use crate::domain::error::ValidationError;

use super::ports::{InterruptReply, LaunchError, PresenterLauncher};

/// Errors from the alert use case
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Invalid notification: {0}")]
    Validation(#[from] ValidationError),

    #[error("alerter only works on macOS (current platform: {0})")]
    UnsupportedPlatform(&'static str),

    #[error("Cannot launch alerter: {0}")]
    Launch(String),

    #[error("Failed to start alerter: {0}")]
    Start(String),

    #[error("This alert is already delivered")]
    AlreadyDelivered,

    #[error("No alert currently running")]
    NoActiveProcess,

    #[error("Failed to close alert: {0}")]
    Signal(String),

    #[error("Can not deliver - {0}")]
    Deliver(#[source] Box<AlertError>),
}

impl AlertError {
    /// The underlying error, with delivery context removed
    pub fn root(&self) -> &AlertError {
        match self {
            Self::Deliver(inner) => inner.root(),
            other => other,
        }
    }
}

impl From<LaunchError> for AlertError {
    fn from(e: LaunchError) -> Self {
        match e {
            LaunchError::UnsupportedPlatform(os) => Self::UnsupportedPlatform(os),
            LaunchError::EmptyPath | LaunchError::WaitFailed(_) => Self::Launch(e.to_string()),
            LaunchError::NotFound(_) | LaunchError::StartFailed(_) => Self::Start(e.to_string()),
            LaunchError::SignalFailed(msg) => Self::Signal(msg),
        }
    }
}

/// Single-shot slot receiving the activation of a delivered alert.
///
/// Await it (or call [`Delivery::recv`]) to get the record. It can be raced
/// against a timer with `tokio::select!` on `&mut delivery`. If the
/// background task goes away without reporting, the empty record is
/// returned.
#[derive(Debug)]
pub struct Delivery {
    receiver: oneshot::Receiver<ActivationRecord>,
}

impl Delivery {
    /// Wait for the activation
    pub async fn recv(self) -> ActivationRecord {
        self.await
    }
}

impl Future for Delivery {
    type Output = ActivationRecord;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.unwrap_or_default())
    }
}

/// A notification that can be shown through the presenter.
///
/// Alerts are reusable: once a delivery has completed, `deliver` may be
/// called again, possibly after editing [`Alert::request`].
pub struct Alert<L>
where
    L: PresenterLauncher + 'static,
{
    /// What to show, editable between deliveries
    pub request: NotificationRequest,
    launcher: Arc<L>,
    session: Arc<Mutex<AlertSession>>,
    interrupts: Mutex<Option<mpsc::Sender<InterruptReply>>>,
}

impl<L> Alert<L>
where
    L: PresenterLauncher + 'static,
{
    /// Create an alert shown through the given launcher
    pub fn new(request: NotificationRequest, launcher: L) -> Self {
        Self::with_shared_launcher(request, Arc::new(launcher))
    }

    /// Create an alert sharing a launcher with other alerts
    pub fn with_shared_launcher(request: NotificationRequest, launcher: Arc<L>) -> Self {
        Self {
            request,
            launcher,
            session: Arc::new(Mutex::new(AlertSession::new())),
            interrupts: Mutex::new(None),
        }
    }

    /// Get current lifecycle state
    pub async fn state(&self) -> AlertState {
        lock(&self.session).state()
    }

    /// Show the alert and return a slot that receives the activation.
    ///
    /// Returns as soon as the presenter has started. Validation and launch
    /// failures are reported here; anything going wrong afterwards yields
    /// the empty record on the slot. Dropping the returned future before
    /// it completes leaves the alert idle.
    pub async fn deliver(&self) -> Result<Delivery, AlertError> {
        lock(&self.session)
            .begin_launch()
            .map_err(|_| AlertError::AlreadyDelivered)?;
        let launching = LaunchGuard::new(Arc::clone(&self.session));

        let args = build_arguments(&self.request)?;
        debug!(?args, "built alerter arguments");

        let process = self.launcher.launch(&args).await?;

        let pid = process.id();
        let (interrupt_tx, interrupt_rx) = mpsc::channel(INTERRUPT_QUEUE);
        *lock(&self.interrupts) = Some(interrupt_tx);
        if let Err(e) = lock(&self.session).mark_running(pid) {
            warn!(error = %e, "alert session out of step with presenter");
        }
        launching.disarm();
        info!(pid, "alerter started");

        let (sender, receiver) = oneshot::channel();
        let session = Arc::clone(&self.session);

        tokio::spawn(async move {
            let record = match process.wait_for_output(interrupt_rx).await {
                Ok(output) => ActivationRecord::decode(&output),
                Err(e) => {
                    warn!(error = %e, "alerter did not finish cleanly");
                    ActivationRecord::default()
                }
            };

            // Release the process before signalling, so close() after
            // delivery sees nothing running.
            if let Err(e) = lock(&session).complete() {
                warn!(error = %e, "alert session out of step with presenter");
            }
            info!(pid, kind = ?record.kind, "alert completed");

            let _ = sender.send(record);
        });

        Ok(Delivery { receiver })
    }

    /// Show the alert and wait until the user or the OS dismisses it.
    pub async fn deliver_and_wait(&self) -> Result<ActivationRecord, AlertError> {
        let delivery = self
            .deliver()
            .await
            .map_err(|e| AlertError::Deliver(Box::new(e)))?;
        Ok(delivery.await)
    }

    /// Close the displayed alert.
    ///
    /// Asks the presenter to close (SIGINT) and returns once the signal is
    /// sent, without waiting for the process to exit; the pending
    /// [`Delivery`] then receives whatever the presenter printed.
    pub async fn close(&self) -> Result<(), AlertError> {
        let interrupts = {
            let session = lock(&self.session);
            if !session.is_running() {
                return Err(AlertError::NoActiveProcess);
            }
            lock(&self.interrupts).clone()
        }
        .ok_or(AlertError::NoActiveProcess)?;

        let (reply, answer) = oneshot::channel();
        interrupts
            .send(reply)
            .await
            .map_err(|_| AlertError::NoActiveProcess)?;

        // An unanswered request means the presenter exited first
        match answer.await {
            Ok(result) => Ok(result?),
            Err(_) => Err(AlertError::NoActiveProcess),
        }
    }
}

/// Pending close requests per running presenter
const INTERRUPT_QUEUE: usize = 4;

/// Session lock that survives a panicked holder
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the session to idle unless the launch got as far as running
struct LaunchGuard {
    session: Option<Arc<Mutex<AlertSession>>>,
}

impl LaunchGuard {
    fn new(session: Arc<Mutex<AlertSession>>) -> Self {
        Self {
            session: Some(session),
        }
    }

    fn disarm(mut self) {
        self.session = None;
    }
}

impl Drop for LaunchGuard {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            debug!("launch abandoned, alert back to idle");
            if let Err(e) = lock(&session).abort_launch() {
                warn!(error = %e, "alert session out of step with presenter");
            }
        }
    }
}
