use std::ffi::c_int;

/// CPU family classification, numbered like the NDK's `AndroidCpuFamily`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpuFamily {
    Unknown,
    Arm,
    X86,
    Mips,
    Arm64,
    X86_64,
    Mips64,
}

impl CpuFamily {
    /// Anything outside the known range maps to `Unknown`.
    pub fn from_raw(raw: c_int) -> Self {
        match raw {
            1 => CpuFamily::Arm,
            2 => CpuFamily::X86,
            3 => CpuFamily::Mips,
            4 => CpuFamily::Arm64,
            5 => CpuFamily::X86_64,
            6 => CpuFamily::Mips64,
            _ => CpuFamily::Unknown,
        }
    }

    /// Family of the architecture this crate was compiled for.
    pub fn of_target() -> Self {
        if cfg!(target_arch = "arm") {
            CpuFamily::Arm
        } else if cfg!(target_arch = "aarch64") {
            CpuFamily::Arm64
        } else if cfg!(target_arch = "x86") {
            CpuFamily::X86
        } else if cfg!(target_arch = "x86_64") {
            CpuFamily::X86_64
        } else if cfg!(target_arch = "mips") {
            CpuFamily::Mips
        } else if cfg!(target_arch = "mips64") {
            CpuFamily::Mips64
        } else {
            CpuFamily::Unknown
        }
    }
}

/// 32-bit ARM feature mask (`ANDROID_CPU_ARM_FEATURE_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArmFeatures(u64);

impl ArmFeatures {
    pub const ARMV7: ArmFeatures = ArmFeatures(1 << 0);
    pub const VFPV3: ArmFeatures = ArmFeatures(1 << 1);
    pub const NEON: ArmFeatures = ArmFeatures(1 << 2);

    pub const fn from_bits(bits: u64) -> Self {
        ArmFeatures(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn contains(self, other: ArmFeatures) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn with(self, other: ArmFeatures) -> Self {
        ArmFeatures(self.0 | other.0)
    }

    pub const fn without(self, other: ArmFeatures) -> Self {
        ArmFeatures(self.0 & !other.0)
    }
}

/// Read-only view of the CPU. Implementations must be safe to query from any
/// thread at any time.
pub trait CpuFeatureSource {
    fn family(&self) -> CpuFamily;
    fn features(&self) -> ArmFeatures;
}

pub fn is_arm(source: &impl CpuFeatureSource) -> bool {
    source.family() == CpuFamily::Arm
}

pub fn is_armv7a(source: &impl CpuFeatureSource) -> bool {
    source.features().contains(ArmFeatures::ARMV7)
}

pub fn has_neon(source: &impl CpuFeatureSource) -> bool {
    source.features().contains(ArmFeatures::NEON)
}

/// Answers from the compile target, for hosts without the NDK facility.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostProbe;

impl CpuFeatureSource for HostProbe {
    fn family(&self) -> CpuFamily {
        CpuFamily::of_target()
    }

    fn features(&self) -> ArmFeatures {
        let mut features = ArmFeatures::default();
        if cfg!(all(target_arch = "arm", target_feature = "v7")) {
            features = features.with(ArmFeatures::ARMV7);
        }
        if cfg!(all(target_arch = "arm", target_feature = "vfp3")) {
            features = features.with(ArmFeatures::VFPV3);
        }
        if cfg!(all(target_arch = "arm", target_feature = "neon")) {
            features = features.with(ArmFeatures::NEON);
        }
        features
    }
}
