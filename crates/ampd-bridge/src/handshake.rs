// Load/unload handshake shared by every native library in the workspace.
//
// On load we only need to know that the loading thread has a JNI environment
// and that the host speaks at least REQUIRED_JNI_VERSION. Nothing is allocated,
// so unload has nothing to release and repeated load/unload cycles are
// indistinguishable from the first one.

use jni::{
    JNIVersion, JavaVM,
    sys::{JNI_ERR, jint},
};
use thiserror::Error;

/// Oldest JNI contract the exported functions rely on.
pub const REQUIRED_JNI_VERSION: JNIVersion = JNIVersion::V4;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandshakeError {
    #[error("no JNI environment on the loading thread: {0}")]
    EnvUnavailable(String),
    #[error("host offers JNI version {offered:#x}, {required:#x} or newer is required")]
    UnsupportedVersion { offered: jint, required: jint },
}

/// Source of the JNI environment offered by the host at load time.
pub trait EnvProvider {
    fn env_version(&self) -> Result<JNIVersion, HandshakeError>;
}

impl EnvProvider for JavaVM {
    fn env_version(&self) -> Result<JNIVersion, HandshakeError> {
        let env = self
            .get_env()
            .map_err(|e| HandshakeError::EnvUnavailable(e.to_string()))?;
        env.get_version()
            .map_err(|e| HandshakeError::EnvUnavailable(e.to_string()))
    }
}

/// Check the offered environment and return the version to report back.
pub fn negotiate(provider: &impl EnvProvider) -> Result<jint, HandshakeError> {
    let offered = jint::from(provider.env_version()?);
    let required = jint::from(REQUIRED_JNI_VERSION);
    if offered < required {
        return Err(HandshakeError::UnsupportedVersion { offered, required });
    }
    Ok(required)
}

/// Body of `JNI_OnLoad`: the negotiated version, or `JNI_ERR`.
pub fn on_load(provider: &impl EnvProvider) -> jint {
    crate::guard("JNI_OnLoad", JNI_ERR, || match negotiate(provider) {
        Ok(version) => {
            log::info!("JNI_OnLoad: reporting version {:#x}", version);
            version
        }
        Err(e) => {
            log::error!("JNI_OnLoad failed: {}", e);
            JNI_ERR
        }
    })
}

/// Body of `JNI_OnUnload`.
pub fn on_unload(tag: &str) {
    log::info!("JNI_OnUnload: {} unloaded", tag);
}
