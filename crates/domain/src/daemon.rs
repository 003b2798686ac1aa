//! Station daemon status and the start/stop control.

use serde::Serialize;

/// Observed state of the station daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DaemonState {
    /// The daemon process is alive.
    pub running: bool,
    /// The daemon has marked itself as up.
    pub indicated: bool,
}

impl DaemonState {
    #[must_use]
    pub fn status(self) -> DaemonStatus {
        DaemonStatus::from_state(self.running, self.indicated)
    }

    #[must_use]
    pub fn control_action(self) -> Option<ControlAction> {
        ControlAction::decide(self.running, self.indicated)
    }
}

/// What the status page reports about the daemon suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DaemonStatus {
    Running,
    /// Process alive but not yet marked as up.
    Starting,
    Stopped,
}

impl DaemonStatus {
    /// Combine the process check (`running`) with the status marker (`indicated`).
    #[must_use]
    pub fn from_state(running: bool, indicated: bool) -> Self {
        match (running, indicated) {
            (true, true) => Self::Running,
            (true, false) => Self::Starting,
            (false, _) => Self::Stopped,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Starting => "Starting",
            Self::Stopped => "Stopped",
        }
    }

    /// Caption of the control button.
    #[must_use]
    pub fn control_label(self) -> &'static str {
        match self {
            Self::Running | Self::Starting => "Stop wview",
            Self::Stopped => "Start wview",
        }
    }
}

/// Action taken by the control button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Start,
    Stop,
}

impl ControlAction {
    /// Pick the action for the current state. A daemon that is still starting
    /// is left alone.
    #[must_use]
    pub fn decide(running: bool, indicated: bool) -> Option<Self> {
        match (running, indicated) {
            (true, true) => Some(Self::Stop),
            (false, _) => Some(Self::Start),
            (true, false) => None,
        }
    }
}
