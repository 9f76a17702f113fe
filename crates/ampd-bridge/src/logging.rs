use std::sync::Once;

static INIT: Once = Once::new();

pub fn max_level() -> log::LevelFilter {
    if cfg!(feature = "debug-logs") {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Install the logcat backend and panic hook for this library (first call wins).
///
/// Off Android no backend is installed and the `log` macros stay silent.
pub fn init(tag: &'static str) {
    INIT.call_once(|| {
        #[cfg(target_os = "android")]
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(max_level())
                .with_tag(tag),
        );
        #[cfg(not(target_os = "android"))]
        let _ = tag;

        std::panic::set_hook(Box::new(|info| {
            let payload = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "Unknown panic".to_string());

            let location = info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_else(|| "unknown".to_string());

            log::error!("PANIC at {}: {}", location, payload);
        }));
    });
}
