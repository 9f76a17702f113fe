use std::panic::{self, AssertUnwindSafe};

/// Run the body of an exported entry point, returning `fallback` if it panics.
///
/// Unwinding into the JVM aborts the whole process, so every `extern "system"`
/// function in this workspace funnels through here. The panic hook installed by
/// [`crate::logging::init`] has already logged the payload by the time we get
/// control back.
pub fn guard<T>(name: &str, fallback: T, body: impl FnOnce() -> T) -> T {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(value) => value,
        Err(_) => {
            log::error!("{name}: panicked, returning fallback value");
            fallback
        }
    }
}
