use std::time::Duration;

use ampd_bridge::MarshalError;
use thiserror::Error;

use crate::state::{DaemonState, Operation};

pub const EXIT_SUCCESS: i32 = 0;
/// Returned to Java when the configuration path could not be marshaled.
pub const EXIT_MARSHAL_FAILURE: i32 = -1;
/// Returned to Java when the run loop could not be started or waited on.
pub const EXIT_RUN_FAILURE: i32 = -2;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("cannot {op} while mpd is {state}")]
    InvalidTransition { op: Operation, state: DaemonState },
    #[error("mpd cannot be initialized twice in one process")]
    RestartUnsupported,
    #[error("invalid configuration path: {0}")]
    Marshal(#[from] MarshalError),
    #[error("failed to spawn the mpd thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("mpd did not stop within {0:?} of quit")]
    QuitTimedOut(Duration),
    #[error("mpd run loop ended without an exit code")]
    RunAborted,
    #[error("mpd is still running")]
    Busy,
}

impl DaemonError {
    /// Exit code relayed to Java in place of the daemon's own.
    pub fn exit_code(&self) -> i32 {
        match self {
            DaemonError::Marshal(_) => EXIT_MARSHAL_FAILURE,
            _ => EXIT_RUN_FAILURE,
        }
    }

    /// Java exception thrown for this error, if any. Runtime failures only
    /// surface through the returned exit code.
    pub fn java_exception(&self) -> Option<&'static str> {
        match self {
            DaemonError::Marshal(_) => Some("java/lang/IllegalArgumentException"),
            _ if self.is_misuse() => Some("java/lang/IllegalStateException"),
            _ => None,
        }
    }

    /// Caller broke the lifecycle contract (as opposed to a runtime failure).
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            DaemonError::InvalidTransition { .. }
                | DaemonError::RestartUnsupported
                | DaemonError::Marshal(_)
                | DaemonError::Busy
        )
    }
}
