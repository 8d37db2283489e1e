//! Alert lifecycle state machine

use std::fmt;
use thiserror::Error;

/// Alert states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlertState {
    #[default]
    Idle,
    Launching,
    Running,
    Completed,
}

impl AlertState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Launching => "launching",
            Self::Running => "running",
            Self::Completed => "completed",
        }
    }

    /// Whether a presentation is in flight
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::Launching | Self::Running)
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: AlertState,
    pub action: String,
}

/// Alert session entity.
/// Tracks the single presenter process an alert may own.
///
/// State machine:
///   IDLE -> LAUNCHING (begin_launch)
///   COMPLETED -> LAUNCHING (begin_launch, alerts are reusable)
///   LAUNCHING -> RUNNING (mark_running)
///   LAUNCHING -> IDLE (abort_launch)
///   RUNNING -> COMPLETED (complete)
#[derive(Debug, Default)]
pub struct AlertSession {
    state: AlertState,
    pid: Option<u32>,
}

impl AlertSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> AlertState {
        self.state
    }

    /// Process id of the running presenter
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Check if a presenter is running
    pub fn is_running(&self) -> bool {
        self.state == AlertState::Running
    }

    /// Transition from IDLE or COMPLETED to LAUNCHING
    pub fn begin_launch(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state.is_in_flight() {
            return Err(self.invalid("deliver"));
        }
        self.state = AlertState::Launching;
        self.pid = None;
        Ok(())
    }

    /// Transition from LAUNCHING to RUNNING
    pub fn mark_running(&mut self, pid: Option<u32>) -> Result<(), InvalidStateTransition> {
        if self.state != AlertState::Launching {
            return Err(self.invalid("mark running"));
        }
        self.state = AlertState::Running;
        self.pid = pid;
        Ok(())
    }

    /// Transition from LAUNCHING back to IDLE after a failed launch
    pub fn abort_launch(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != AlertState::Launching {
            return Err(self.invalid("abort launch"));
        }
        self.state = AlertState::Idle;
        self.pid = None;
        Ok(())
    }

    /// Transition from RUNNING to COMPLETED, releasing the process
    pub fn complete(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != AlertState::Running {
            return Err(self.invalid("complete"));
        }
        self.state = AlertState::Completed;
        self.pid = None;
        Ok(())
    }

    fn invalid(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.state,
            action: action.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = AlertSession::new();
        assert_eq!(session.state(), AlertState::Idle);
        assert!(!session.is_running());
        assert!(session.pid().is_none());
    }

    #[test]
    fn launch_from_idle() {
        let mut session = AlertSession::new();
        assert!(session.begin_launch().is_ok());
        assert_eq!(session.state(), AlertState::Launching);
    }

    #[test]
    fn launch_while_launching_fails() {
        let mut session = AlertSession::new();
        session.begin_launch().unwrap();

        let err = session.begin_launch().unwrap_err();
        assert_eq!(err.current_state, AlertState::Launching);
        assert!(err.action.contains("deliver"));
    }

    #[test]
    fn launch_while_running_fails() {
        let mut session = AlertSession::new();
        session.begin_launch().unwrap();
        session.mark_running(Some(42)).unwrap();

        let err = session.begin_launch().unwrap_err();
        assert_eq!(err.current_state, AlertState::Running);
        assert_eq!(session.pid(), Some(42));
    }

    #[test]
    fn abort_launch_returns_to_idle() {
        let mut session = AlertSession::new();
        session.begin_launch().unwrap();
        session.abort_launch().unwrap();
        assert_eq!(session.state(), AlertState::Idle);
        assert!(session.pid().is_none());
    }

    #[test]
    fn complete_clears_pid() {
        let mut session = AlertSession::new();
        session.begin_launch().unwrap();
        session.mark_running(Some(7)).unwrap();
        assert!(session.is_running());

        session.complete().unwrap();
        assert_eq!(session.state(), AlertState::Completed);
        assert!(session.pid().is_none());
    }

    #[test]
    fn complete_from_idle_fails() {
        let mut session = AlertSession::new();
        let err = session.complete().unwrap_err();
        assert_eq!(err.current_state, AlertState::Idle);
    }

    #[test]
    fn mark_running_requires_launching() {
        let mut session = AlertSession::new();
        assert!(session.mark_running(Some(1)).is_err());
    }

    #[test]
    fn completed_session_is_reusable() {
        let mut session = AlertSession::new();
        session.begin_launch().unwrap();
        session.mark_running(Some(1)).unwrap();
        session.complete().unwrap();

        session.begin_launch().unwrap();
        assert_eq!(session.state(), AlertState::Launching);
    }

    #[test]
    fn state_display() {
        assert_eq!(AlertState::Idle.to_string(), "idle");
        assert_eq!(AlertState::Launching.to_string(), "launching");
        assert_eq!(AlertState::Running.to_string(), "running");
        assert_eq!(AlertState::Completed.to_string(), "completed");
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            current_state: AlertState::Running,
            action: "deliver".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("deliver"));
        assert!(msg.contains("running"));
    }
}
