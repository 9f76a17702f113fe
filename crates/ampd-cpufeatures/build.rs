use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=ANDROID_NDK_HOME");
    println!("cargo:rerun-if-env-changed=NDK_HOME");

    let target = env::var("TARGET").unwrap();
    if !target.contains("android") {
        return;
    }

    println!("cargo:rustc-link-lib=log");
    println!("cargo:rustc-link-lib=dl");

    // android_getCpuFamily / android_getCpuFeatures ship as source in the NDK
    let ndk_home = env::var("ANDROID_NDK_HOME")
        .or_else(|_| env::var("NDK_HOME"))
        .expect("ANDROID_NDK_HOME or NDK_HOME must be set");

    let source_dir = PathBuf::from(ndk_home).join("sources/android/cpufeatures");
    let source = source_dir.join("cpu-features.c");
    println!("cargo:rerun-if-changed={}", source.display());

    cc::Build::new()
        .file(&source)
        .include(&source_dir)
        .warnings(false)
        .compile("cpufeatures");
}
