use std::path::{Path, PathBuf};

use crate::probe::{CpuFeatureSource, has_neon, is_arm, is_armv7a};

/// Native libraries the Java loader links, in load order.
pub const MPD_LIBRARIES: &[&str] = &[
    "avutil", "avcodec", "avformat", "curl", "yajl", "iconv", "glib", "gthread", "mpd", "mpd_jni",
];

/// Which build of the prebuilt libraries this CPU can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryVariant {
    /// Libraries the package manager extracted for this ABI.
    Native,
    /// ARMv7 without NEON (Tegra 2 and friends): the armeabi-v7a builds use
    /// NEON, so the armeabi builds are copied out of the APK and loaded by path.
    ArmeabiFallback,
}

impl LibraryVariant {
    pub fn select(source: &impl CpuFeatureSource) -> Self {
        if is_arm(source) && is_armv7a(source) && !has_neon(source) {
            LibraryVariant::ArmeabiFallback
        } else {
            LibraryVariant::Native
        }
    }

    /// Location inside the APK of the armeabi build of `name`.
    pub fn apk_entry(name: &str) -> String {
        format!("lib/armeabi/lib{name}.so")
    }

    /// Absolute path to load `name` from, or `None` when the system loader
    /// should resolve it by name.
    pub fn library_path(self, dir: &Path, name: &str) -> Option<PathBuf> {
        match self {
            LibraryVariant::Native => None,
            LibraryVariant::ArmeabiFallback => Some(dir.join(format!("lib{name}.so"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::tests::FakeCpu;
    use crate::probe::{ArmFeatures, CpuFamily};

    fn select(family: CpuFamily, features: ArmFeatures) -> LibraryVariant {
        LibraryVariant::select(&FakeCpu { family, features })
    }

    #[test]
    fn armv7_without_neon_falls_back() {
        assert_eq!(
            select(CpuFamily::Arm, ArmFeatures::ARMV7.with(ArmFeatures::VFPV3)),
            LibraryVariant::ArmeabiFallback
        );
    }

    #[test]
    fn armv7_with_neon_is_native() {
        assert_eq!(
            select(CpuFamily::Arm, ArmFeatures::ARMV7.with(ArmFeatures::NEON)),
            LibraryVariant::Native
        );
    }

    #[test]
    fn armv5_is_native() {
        assert_eq!(select(CpuFamily::Arm, ArmFeatures::default()), LibraryVariant::Native);
    }

    #[test]
    fn other_families_are_native() {
        for family in [CpuFamily::Arm64, CpuFamily::X86, CpuFamily::X86_64, CpuFamily::Unknown] {
            assert_eq!(select(family, ArmFeatures::ARMV7), LibraryVariant::Native);
        }
    }

    #[test]
    fn fallback_paths() {
        let dir = Path::new("/data/data/be.deadba.ampd/files/armeabi");
        assert_eq!(
            LibraryVariant::ArmeabiFallback.library_path(dir, "mpd"),
            Some(dir.join("libmpd.so"))
        );
        assert_eq!(LibraryVariant::Native.library_path(dir, "mpd"), None);
        assert_eq!(LibraryVariant::apk_entry("avcodec"), "lib/armeabi/libavcodec.so");
    }

    #[test]
    fn binding_library_loads_last() {
        assert_eq!(MPD_LIBRARIES.last(), Some(&"mpd_jni"));
        let mpd = MPD_LIBRARIES.iter().position(|l| *l == "mpd").unwrap();
        let glib = MPD_LIBRARIES.iter().position(|l| *l == "glib").unwrap();
        assert!(glib < mpd);
    }
}
