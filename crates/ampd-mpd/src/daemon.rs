// Local state machine in front of libmpd's process-global state.
//
//   Uninitialized --init--> Initialized --run--> Running --quit--> Stopping
//        ^                                          |                 |
//        |                                          | (loop exits)    |
//        +------------------deinit---------------- Stopped <----------+
//
// `run` hands the blocking library call to a worker thread and waits on two
// channels: the worker's exit code and the quit token. Once the token fires
// the quit is forwarded to libmpd and the exit code is awaited for at most
// `DaemonConfig::quit_timeout`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, bounded, select};

use crate::args::LaunchArgs;
use crate::error::{DaemonError, EXIT_SUCCESS};
use crate::library::MpdLibrary;
use crate::state::{DaemonState, Operation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    /// argv[0] handed to libmpd.
    pub program_name: String,
    /// Upper bound between a quit reaching the run wrapper and `run` returning.
    pub quit_timeout: Duration,
    /// libmpd leaves globals behind after deinit; a second init in the same
    /// process is refused unless this is set.
    pub allow_restart: bool,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            program_name: "libmpd".to_string(),
            quit_timeout: Duration::from_secs(5),
            allow_restart: false,
        }
    }
}

impl DaemonConfig {
    pub fn with_program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = name.into();
        self
    }

    pub fn with_quit_timeout(mut self, timeout: Duration) -> Self {
        self.quit_timeout = timeout;
        self
    }

    pub fn with_allow_restart(mut self, allow: bool) -> Self {
        self.allow_restart = allow;
        self
    }
}

struct Inner {
    state: DaemonState,
    completed_runs: u32,
    /// Exit channel of a worker that outlived `quit_timeout`.
    pending_exit: Option<Receiver<i32>>,
}

pub struct Daemon<L: MpdLibrary> {
    library: Arc<L>,
    config: DaemonConfig,
    inner: Mutex<Inner>,
    quit_tx: Sender<()>,
    quit_rx: Receiver<()>,
}

impl<L: MpdLibrary> Daemon<L> {
    pub fn new(library: L, config: DaemonConfig) -> Self {
        let (quit_tx, quit_rx) = bounded(1);
        Self {
            library: Arc::new(library),
            config,
            inner: Mutex::new(Inner {
                state: DaemonState::Uninitialized,
                completed_runs: 0,
                pending_exit: None,
            }),
            quit_tx,
            quit_rx,
        }
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    pub fn config(&self) -> &DaemonConfig {
        &self.config
    }

    pub fn state(&self) -> DaemonState {
        self.lock().state
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn drain_quit(&self) {
        while self.quit_rx.try_recv().is_ok() {}
    }

    /// Uninitialized -> Initialized.
    pub fn init(&self) -> Result<(), DaemonError> {
        let mut inner = self.lock();
        if inner.state != DaemonState::Uninitialized {
            return Err(DaemonError::InvalidTransition {
                op: Operation::Init,
                state: inner.state,
            });
        }
        if inner.completed_runs > 0 && !self.config.allow_restart {
            return Err(DaemonError::RestartUnsupported);
        }

        self.drain_quit();
        self.library.init();
        inner.state = DaemonState::Initialized;
        log::info!("mpd initialized");
        Ok(())
    }

    /// Run libmpd with `config_path` and block until it stops.
    ///
    /// The path is marshaled before any state changes; a path that cannot be
    /// marshaled never reaches the library. The returned code is libmpd's own,
    /// untouched.
    pub fn run(&self, config_path: &str) -> Result<i32, DaemonError> {
        let args = LaunchArgs::new(&self.config.program_name, config_path)?;

        {
            let mut inner = self.lock();
            if inner.state != DaemonState::Initialized {
                return Err(DaemonError::InvalidTransition {
                    op: Operation::Run,
                    state: inner.state,
                });
            }
            if self.quit_rx.try_recv().is_ok() {
                log::info!("quit requested before run, not starting mpd");
                inner.state = DaemonState::Stopped;
                return Ok(EXIT_SUCCESS);
            }
            inner.state = DaemonState::Running;
        }

        let (exit_tx, exit_rx) = bounded(1);
        let library = Arc::clone(&self.library);
        let spawned = thread::Builder::new()
            .name("mpd-main".to_string())
            .spawn(move || {
                let code = library.run(&args);
                let _ = exit_tx.send(code);
            });
        if let Err(e) = spawned {
            self.lock().state = DaemonState::Initialized;
            return Err(DaemonError::Spawn(e));
        }
        log::info!("mpd running with {}", config_path);

        let outcome = select! {
            recv(exit_rx) -> code => code.map_err(|_| DaemonError::RunAborted),
            recv(self.quit_rx) -> _ => self.stop_running(&exit_rx),
        };

        let mut inner = self.lock();
        match &outcome {
            Err(DaemonError::QuitTimedOut(_)) => {
                inner.pending_exit = Some(exit_rx);
            }
            _ => {
                inner.state = DaemonState::Stopped;
                inner.completed_runs += 1;
            }
        }
        match &outcome {
            Ok(code) => log::info!("mpd terminated: {}", code),
            Err(e) => log::error!("mpd run failed: {}", e),
        }
        outcome
    }

    fn stop_running(&self, exit_rx: &Receiver<i32>) -> Result<i32, DaemonError> {
        if let Ok(code) = exit_rx.try_recv() {
            return Ok(code);
        }

        log::info!("forwarding quit to mpd");
        self.library.quit();
        match exit_rx.recv_timeout(self.config.quit_timeout) {
            Ok(code) => Ok(code),
            Err(RecvTimeoutError::Timeout) => {
                Err(DaemonError::QuitTimedOut(self.config.quit_timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(DaemonError::RunAborted),
        }
    }

    /// Ask a running daemon to stop. Returns without waiting for `run`.
    ///
    /// A quit that arrives before `run` is remembered and makes the next `run`
    /// return immediately.
    pub fn quit(&self) -> Result<(), DaemonError> {
        let mut inner = self.lock();
        match inner.state {
            DaemonState::Running => {
                inner.state = DaemonState::Stopping;
                let _ = self.quit_tx.try_send(());
                log::info!("quit requested");
                Ok(())
            }
            DaemonState::Initialized => {
                let _ = self.quit_tx.try_send(());
                log::info!("quit requested before run");
                Ok(())
            }
            DaemonState::Stopping => Ok(()),
            state => Err(DaemonError::InvalidTransition {
                op: Operation::Quit,
                state,
            }),
        }
    }

    /// Release libmpd's global state. Refused while the run loop is alive.
    pub fn deinit(&self) -> Result<(), DaemonError> {
        let mut inner = self.lock();
        match inner.state {
            DaemonState::Initialized | DaemonState::Stopped => {}
            DaemonState::Stopping => {
                let late = match inner.pending_exit.as_ref().map(Receiver::try_recv) {
                    Some(Ok(code)) => Some(code),
                    Some(Err(TryRecvError::Disconnected)) => None,
                    Some(Err(TryRecvError::Empty)) | None => return Err(DaemonError::Busy),
                };
                log::info!("mpd stopped late: {:?}", late);
                inner.completed_runs += 1;
            }
            DaemonState::Running => return Err(DaemonError::Busy),
            DaemonState::Uninitialized => {
                return Err(DaemonError::InvalidTransition {
                    op: Operation::Deinit,
                    state: inner.state,
                });
            }
        }

        inner.pending_exit = None;
        self.library.deinit();
        self.drain_quit();
        inner.state = DaemonState::Uninitialized;
        log::info!("mpd deinitialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        inits: AtomicUsize,
        deinits: AtomicUsize,
        runs: AtomicUsize,
        quits: AtomicUsize,
    }

    impl MpdLibrary for Counting {
        fn init(&self) {
            self.inits.fetch_add(1, Ordering::SeqCst);
        }

        fn deinit(&self) {
            self.deinits.fetch_add(1, Ordering::SeqCst);
        }

        fn run(&self, _args: &LaunchArgs) -> i32 {
            self.runs.fetch_add(1, Ordering::SeqCst);
            0
        }

        fn quit(&self) {
            self.quits.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn daemon() -> Daemon<Counting> {
        Daemon::new(Counting::default(), DaemonConfig::default())
    }

    #[test]
    fn starts_uninitialized() {
        assert_eq!(daemon().state(), DaemonState::Uninitialized);
    }

    #[test]
    fn init_then_deinit_never_runs() {
        let d = daemon();
        d.init().unwrap();
        assert_eq!(d.state(), DaemonState::Initialized);
        d.deinit().unwrap();
        assert_eq!(d.state(), DaemonState::Uninitialized);

        let lib = d.library();
        assert_eq!(lib.inits.load(Ordering::SeqCst), 1);
        assert_eq!(lib.deinits.load(Ordering::SeqCst), 1);
        assert_eq!(lib.runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn double_init_is_refused() {
        let d = daemon();
        d.init().unwrap();
        assert!(matches!(
            d.init(),
            Err(DaemonError::InvalidTransition {
                op: Operation::Init,
                state: DaemonState::Initialized,
            })
        ));
        assert_eq!(d.library().inits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn run_before_init_is_refused() {
        let d = daemon();
        assert!(matches!(
            d.run("/data/mpd.conf"),
            Err(DaemonError::InvalidTransition {
                op: Operation::Run,
                state: DaemonState::Uninitialized,
            })
        ));
        assert_eq!(d.library().runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn deinit_before_init_is_refused() {
        let d = daemon();
        assert!(d.deinit().is_err());
        assert_eq!(d.library().deinits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn quit_when_idle_is_refused() {
        let d = daemon();
        assert!(matches!(
            d.quit(),
            Err(DaemonError::InvalidTransition {
                op: Operation::Quit,
                ..
            })
        ));
    }

    #[test]
    fn marshal_failure_keeps_state() {
        let d = daemon();
        d.init().unwrap();
        assert!(matches!(d.run("bad\0path"), Err(DaemonError::Marshal(_))));
        assert_eq!(d.state(), DaemonState::Initialized);
        assert_eq!(d.library().runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn run_to_completion() {
        let d = daemon();
        d.init().unwrap();
        assert_eq!(d.run("/data/mpd.conf").unwrap(), 0);
        assert_eq!(d.state(), DaemonState::Stopped);
        assert!(matches!(d.run("/data/mpd.conf"), Err(DaemonError::InvalidTransition { .. })));
        d.deinit().unwrap();
        assert_eq!(d.library().runs.load(Ordering::SeqCst), 1);
        assert_eq!(d.library().quits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn restart_policy() {
        let d = daemon();
        d.init().unwrap();
        d.run("/data/mpd.conf").unwrap();
        d.deinit().unwrap();
        assert!(matches!(d.init(), Err(DaemonError::RestartUnsupported)));

        let d = Daemon::new(
            Counting::default(),
            DaemonConfig::default().with_allow_restart(true),
        );
        d.init().unwrap();
        d.run("/data/mpd.conf").unwrap();
        d.deinit().unwrap();
        d.init().unwrap();
        assert_eq!(d.library().inits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn init_deinit_without_run_may_repeat() {
        let d = daemon();
        for _ in 0..3 {
            d.init().unwrap();
            d.deinit().unwrap();
        }
        assert_eq!(d.library().inits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn quit_before_run_skips_the_run_loop() {
        let d = daemon();
        d.init().unwrap();
        d.quit().unwrap();
        assert_eq!(d.run("/data/mpd.conf").unwrap(), EXIT_SUCCESS);
        assert_eq!(d.state(), DaemonState::Stopped);
        assert_eq!(d.library().runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn config_builders() {
        let config = DaemonConfig::default()
            .with_program_name("ampd")
            .with_quit_timeout(Duration::from_millis(250));
        assert_eq!(config.program_name, "ampd");
        assert_eq!(DaemonConfig::default().program_name, "libmpd");
        assert_eq!(config.quit_timeout, Duration::from_millis(250));
        assert!(!config.allow_restart);
    }
}
