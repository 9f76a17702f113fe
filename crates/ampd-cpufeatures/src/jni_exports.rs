// Static natives of be.deadba.ampd.CpuFeatures

use jni::{
    JNIEnv,
    objects::JClass,
    sys::{JNI_FALSE, JNI_TRUE, jboolean},
};

use crate::PlatformProbe;
use crate::probe::{has_neon, is_arm, is_armv7a};

ampd_bridge::export_jni_lifecycle!(crate::LOG_TAG);

fn to_jboolean(value: bool) -> jboolean {
    if value { JNI_TRUE } else { JNI_FALSE }
}

/// `CpuFeatures.isArm()`
#[unsafe(no_mangle)]
pub extern "system" fn Java_be_deadba_ampd_CpuFeatures_isArm(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    ampd_bridge::guard("isArm", JNI_FALSE, || {
        let arm = is_arm(&PlatformProbe::default());
        log::debug!("isArm: {}", arm);
        to_jboolean(arm)
    })
}

/// `CpuFeatures.isArmv7a()`
#[unsafe(no_mangle)]
pub extern "system" fn Java_be_deadba_ampd_CpuFeatures_isArmv7a(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    ampd_bridge::guard("isArmv7a", JNI_FALSE, || {
        let armv7 = is_armv7a(&PlatformProbe::default());
        log::debug!("isArmv7a: {}", armv7);
        to_jboolean(armv7)
    })
}

/// `CpuFeatures.hasNeon()`
#[unsafe(no_mangle)]
pub extern "system" fn Java_be_deadba_ampd_CpuFeatures_hasNeon(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    ampd_bridge::guard("hasNeon", JNI_FALSE, || {
        let neon = has_neon(&PlatformProbe::default());
        log::debug!("hasNeon: {}", neon);
        to_jboolean(neon)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_tag_matches_library_name() {
        assert_eq!(crate::LOG_TAG, "cpufeatures_jni");
    }

    #[test]
    fn jboolean_mapping() {
        assert_eq!(to_jboolean(true), JNI_TRUE);
        assert_eq!(to_jboolean(false), JNI_FALSE);
    }
}
