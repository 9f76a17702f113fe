use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::daemon::Daemon;
use crate::error::DaemonError;
use crate::library::MpdLibrary;

/// A daemon running on its own thread, stopped with quit-then-join.
///
/// `on_error` is called from the daemon thread when `run` ends with a
/// non-zero code or fails outright.
pub struct DaemonThread<L: MpdLibrary> {
    daemon: Arc<Daemon<L>>,
    handle: JoinHandle<Result<i32, DaemonError>>,
}

impl<L: MpdLibrary> DaemonThread<L> {
    pub fn spawn<F>(
        daemon: Arc<Daemon<L>>,
        config_path: impl Into<String>,
        on_error: F,
    ) -> io::Result<Self>
    where
        F: FnOnce(i32) + Send + 'static,
    {
        let config_path = config_path.into();
        let runner = Arc::clone(&daemon);
        let handle = thread::Builder::new()
            .name("mpd-run".to_string())
            .spawn(move || {
                let result = runner.run(&config_path);
                match &result {
                    Ok(0) => {}
                    Ok(code) => on_error(*code),
                    Err(e) => on_error(e.exit_code()),
                }
                result
            })?;
        Ok(Self { daemon, handle })
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn daemon(&self) -> &Arc<Daemon<L>> {
        &self.daemon
    }

    /// Request a quit and wait for the thread to return.
    pub fn finish(self) -> Result<i32, DaemonError> {
        if let Err(e) = self.daemon.quit() {
            log::debug!("quit not delivered: {}", e);
        }
        self.handle.join().unwrap_or(Err(DaemonError::RunAborted))
    }
}
