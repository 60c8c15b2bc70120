use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of a managed worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerState {
    /// Initial state; also the state while the execution thread is parked
    /// in the suspension gate.
    Stopped,
    /// The execution thread is driving work cycles.
    Running,
    /// Terminal state; the worker is inert and cannot be restarted.
    Terminated,
}

impl WorkerState {
    /// Check if this is the terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// Check if this is an active state (work cycles are being driven)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Running => write!(f, "running"),
            Self::Terminated => write!(f, "terminated"),
        }
    }
}

impl std::str::FromStr for WorkerState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stopped" => Ok(Self::Stopped),
            "running" => Ok(Self::Running),
            "terminated" => Ok(Self::Terminated),
            _ => Err(format!("Invalid worker state: {s}")),
        }
    }
}

/// Default state for new workers
impl Default for WorkerState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// Policy deciding what `stop()` does, chosen at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopMode {
    /// `stop()` terminates the worker; the execution thread exits.
    Terminate,
    /// `stop()` parks the execution thread; `start()` resumes it without
    /// creating a new thread.
    Suspend,
}

impl fmt::Display for StopMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminate => write!(f, "terminate"),
            Self::Suspend => write!(f, "suspend"),
        }
    }
}

impl std::str::FromStr for StopMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "terminate" => Ok(Self::Terminate),
            "suspend" => Ok(Self::Suspend),
            _ => Err(format!("Invalid stop mode: {s}")),
        }
    }
}

/// Default stop mode matches the conservative policy: stopping tears the
/// worker down unless suspension was asked for explicitly.
impl Default for StopMode {
    fn default() -> Self {
        Self::Terminate
    }
}
