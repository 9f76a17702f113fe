// ampd-mpd: libmpd lifecycle control for the aMPD Java side
//
// Builds libmpd_jni.so. libmpd keeps its state in process globals; `Daemon`
// puts an explicit state machine in front of it so misuse from Java fails fast
// instead of reaching undefined behaviour inside the library, and turns
// `quit` into a token the run wrapper observes with a bounded wait.

pub mod args;
pub mod daemon;
pub mod error;
pub mod library;
pub mod state;
pub mod thread;

#[cfg(target_os = "android")]
pub mod ffi;

// Links libmpd, which only exists in the Android build
#[cfg(target_os = "android")]
pub mod jni_exports;

/// Logcat tag of libmpd_jni.so.
pub const LOG_TAG: &str = "mpd_jni";

pub use args::LaunchArgs;
pub use daemon::{Daemon, DaemonConfig};
pub use error::{DaemonError, EXIT_MARSHAL_FAILURE, EXIT_RUN_FAILURE, EXIT_SUCCESS};
pub use library::MpdLibrary;
pub use state::{DaemonState, Operation};
pub use thread::DaemonThread;

#[cfg(test)]
mod tests {
    #[test]
    fn log_tag_matches_library_name() {
        assert_eq!(super::LOG_TAG, "mpd_jni");
    }
}
