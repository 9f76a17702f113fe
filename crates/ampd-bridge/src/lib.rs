// ampd-bridge: shared plumbing for the aMPD native libraries
//
// The Java side loads libcpufeatures_jni.so and libmpd_jni.so independently.
// Both go through the same load/unload handshake, logging bootstrap and panic
// guard, which live here. Each library stamps out its own JNI_OnLoad and
// JNI_OnUnload with `export_jni_lifecycle!`.

pub mod guard;
pub mod handshake;
pub mod logging;
pub mod text;

pub use guard::guard;
pub use handshake::{
    EnvProvider, HandshakeError, REQUIRED_JNI_VERSION, negotiate, on_load, on_unload,
};
pub use text::{MarshalError, read_jstring, to_c_string};

#[doc(hidden)]
pub use jni as __jni;

/// Export `JNI_OnLoad` / `JNI_OnUnload` for the calling cdylib.
///
/// `$tag` is the logcat tag used by that library.
#[macro_export]
macro_rules! export_jni_lifecycle {
    ($tag:expr) => {
        #[unsafe(no_mangle)]
        pub extern "system" fn JNI_OnLoad(
            vm: $crate::__jni::JavaVM,
            _reserved: *mut ::std::ffi::c_void,
        ) -> $crate::__jni::sys::jint {
            $crate::logging::init($tag);
            $crate::on_load(&vm)
        }

        #[unsafe(no_mangle)]
        pub extern "system" fn JNI_OnUnload(
            _vm: $crate::__jni::JavaVM,
            _reserved: *mut ::std::ffi::c_void,
        ) {
            $crate::on_unload($tag);
        }
    };
}
