use crate::args::LaunchArgs;

/// The four process-global entry points of libmpd.
///
/// `run` blocks until the daemon stops. `quit` may be called from any thread
/// while another thread is inside `run`.
pub trait MpdLibrary: Send + Sync + 'static {
    fn init(&self);
    fn deinit(&self);
    fn run(&self, args: &LaunchArgs) -> i32;
    fn quit(&self);
}
