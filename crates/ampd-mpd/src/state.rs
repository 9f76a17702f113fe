use std::fmt;

/// Where libmpd is in its lifecycle, as tracked on this side of the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonState {
    Uninitialized,
    Initialized,
    Running,
    /// Quit was requested; the run loop has not returned yet.
    Stopping,
    Stopped,
}

impl fmt::Display for DaemonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DaemonState::Uninitialized => "uninitialized",
            DaemonState::Initialized => "initialized",
            DaemonState::Running => "running",
            DaemonState::Stopping => "stopping",
            DaemonState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Init,
    Run,
    Quit,
    Deinit,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Init => "init",
            Operation::Run => "run",
            Operation::Quit => "quit",
            Operation::Deinit => "deinit",
        };
        f.write_str(name)
    }
}
