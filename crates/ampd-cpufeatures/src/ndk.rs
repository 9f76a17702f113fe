// Bindings to the NDK cpufeatures facility compiled in by build.rs.

use std::ffi::c_int;

use crate::probe::{ArmFeatures, CpuFamily, CpuFeatureSource};

unsafe extern "C" {
    fn android_getCpuFamily() -> c_int;
    fn android_getCpuFeatures() -> u64;
}

/// Probe backed by `android_getCpuFamily` / `android_getCpuFeatures`.
///
/// The facility parses /proc/cpuinfo once behind a pthread_once and is
/// read-only afterwards, so concurrent queries are fine.
#[derive(Debug, Clone, Copy, Default)]
pub struct NdkProbe;

impl CpuFeatureSource for NdkProbe {
    fn family(&self) -> CpuFamily {
        CpuFamily::from_raw(unsafe { android_getCpuFamily() })
    }

    fn features(&self) -> ArmFeatures {
        ArmFeatures::from_bits(unsafe { android_getCpuFeatures() })
    }
}
