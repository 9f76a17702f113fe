// Static natives of be.deadba.ampd.LibMPD
//
// Lifecycle misuse and unmarshalable paths throw into Java; the daemon's own
// exit code is returned untouched. Android-only because it links libmpd; the
// feature probe has a host fallback and so exports everywhere.

use jni::{
    JNIEnv,
    objects::{JClass, JString},
    sys::jint,
};
use once_cell::sync::Lazy;

use crate::daemon::{Daemon, DaemonConfig};
use crate::error::{DaemonError, EXIT_RUN_FAILURE};
use crate::ffi::LibMpd;

static DAEMON: Lazy<Daemon<LibMpd>> = Lazy::new(|| Daemon::new(LibMpd, DaemonConfig::default()));

ampd_bridge::export_jni_lifecycle!(crate::LOG_TAG);

fn report(env: &mut JNIEnv, op: &str, err: &DaemonError) {
    log::error!("{} failed: {}", op, err);
    if let Some(class) = err.java_exception() {
        if let Err(e) = env.throw_new(class, err.to_string()) {
            log::error!("Failed to throw {}: {:?}", class, e);
        }
    }
}

/// `LibMPD.init()`
#[unsafe(no_mangle)]
pub extern "system" fn Java_be_deadba_ampd_LibMPD_init(mut env: JNIEnv, _class: JClass) {
    ampd_bridge::guard("init", (), || {
        if let Err(e) = DAEMON.init() {
            report(&mut env, "init", &e);
        }
    })
}

/// `LibMPD.run(String mpdConf)`
///
/// Blocks until mpd stops; Java calls this from its dedicated MPD thread.
#[unsafe(no_mangle)]
pub extern "system" fn Java_be_deadba_ampd_LibMPD_run(
    mut env: JNIEnv,
    _class: JClass,
    config_path: JString,
) -> jint {
    ampd_bridge::guard("run", EXIT_RUN_FAILURE, || {
        let path = match ampd_bridge::read_jstring(&mut env, &config_path) {
            Ok(path) => path,
            Err(e) => {
                let err = DaemonError::from(e);
                report(&mut env, "run", &err);
                return err.exit_code();
            }
        };

        match DAEMON.run(&path) {
            Ok(code) => code,
            Err(e) => {
                report(&mut env, "run", &e);
                e.exit_code()
            }
        }
    })
}

/// `LibMPD.quit()`
///
/// Only requests the stop; `run` returns on its own thread.
#[unsafe(no_mangle)]
pub extern "system" fn Java_be_deadba_ampd_LibMPD_quit(_env: JNIEnv, _class: JClass) {
    ampd_bridge::guard("quit", (), || {
        if let Err(e) = DAEMON.quit() {
            log::warn!("quit ignored: {}", e);
        }
    })
}

/// `LibMPD.deinit()`
#[unsafe(no_mangle)]
pub extern "system" fn Java_be_deadba_ampd_LibMPD_deinit(mut env: JNIEnv, _class: JClass) {
    ampd_bridge::guard("deinit", (), || {
        if let Err(e) = DAEMON.deinit() {
            report(&mut env, "deinit", &e);
        }
    })
}
