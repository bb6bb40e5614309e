/// Worker lifecycle states
///
/// Every worker moves through `Idle → Assigned → Fetching → Reported`, after
/// which the coordinator either hands it another URL (`Assigned`) or retires
/// it (`Retiring`).
use std::fmt;

/// Represents where a worker is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerState {
    /// Worker task has been spawned but holds no URL yet
    Idle,

    /// A URL has been handed to the worker
    Assigned,

    /// The worker is fetching and extracting its assigned URL
    Fetching,

    /// The worker reported a result (or failure) and awaits instructions
    Reported,

    /// The worker was told to stop; terminal
    Retiring,
}

impl WorkerState {
    /// Returns true if the lifecycle allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: WorkerState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Assigned)
                | (Self::Idle, Self::Retiring)
                | (Self::Assigned, Self::Fetching)
                | (Self::Fetching, Self::Reported)
                | (Self::Reported, Self::Assigned)
                | (Self::Reported, Self::Retiring)
        )
    }

    /// Returns true while the worker holds a URL it has not reported on
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Assigned | Self::Fetching)
    }

    /// Short lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Assigned => "assigned",
            Self::Fetching => "fetching",
            Self::Reported => "reported",
            Self::Retiring => "retiring",
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
