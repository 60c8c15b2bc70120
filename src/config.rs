use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, WorkerError};
use crate::state_machine::StopMode;

/// Advisory thread priority band, parsed from the conventional 1..=10 scale.
///
/// Standard library threads expose no portable scheduling priority, so this
/// is identity and logging metadata: it is recorded on the worker and
/// attached to the spawn-time trace, not applied to the OS scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Min,
    Normal,
    Max,
}

impl Priority {
    /// Map a numeric priority (1..=10) into its band: 1-3 minimum, 4-6
    /// normal, 7-10 maximum. Anything else is rejected.
    pub fn parse(value: u8) -> Result<Self> {
        match value {
            1..=3 => Ok(Self::Min),
            4..=6 => Ok(Self::Normal),
            7..=10 => Ok(Self::Max),
            other => Err(WorkerError::InvalidPriority(other)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min => write!(f, "min"),
            Self::Normal => write!(f, "normal"),
            Self::Max => write!(f, "max"),
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

/// Construction-time policy for a [`crate::Worker`].
///
/// The stop mode is the only policy that changes lifecycle behavior; name and
/// priority are identity metadata carried into thread naming, events, and
/// tracing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    pub name: String,
    pub stop_mode: StopMode,
    pub priority: Priority,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            name: "managed-worker".to_string(),
            stop_mode: StopMode::default(),
            priority: Priority::default(),
        }
    }
}

impl WorkerConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_stop_mode(mut self, stop_mode: StopMode) -> Self {
        self.stop_mode = stop_mode;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}
