// ampd-cpufeatures: CPU feature probe for the aMPD Java side
//
// Builds libcpufeatures_jni.so. The Java loader asks three questions (ARM
// family? ARMv7 profile? NEON?) to decide which set of prebuilt libraries it
// can link against; the answers come from the NDK cpufeatures facility on
// Android and from the compile target elsewhere.

pub mod probe;
pub mod variant;

#[cfg(target_os = "android")]
pub mod ndk;

pub mod jni_exports;

pub use probe::{ArmFeatures, CpuFamily, CpuFeatureSource, HostProbe, has_neon, is_arm, is_armv7a};
pub use variant::{LibraryVariant, MPD_LIBRARIES};

/// Logcat tag of libcpufeatures_jni.so.
pub const LOG_TAG: &str = "cpufeatures_jni";

/// The feature source the exported functions query on this target.
#[cfg(target_os = "android")]
pub type PlatformProbe = ndk::NdkProbe;
#[cfg(not(target_os = "android"))]
pub type PlatformProbe = probe::HostProbe;
