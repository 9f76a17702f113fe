use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=AMPD_LIBMPD_DIR");

    let target = env::var("TARGET").unwrap();
    if !target.contains("android") {
        return;
    }

    println!("cargo:rustc-link-lib=log");

    // libmpd.so comes out of the ndk-build tree, one directory per ABI
    let lib_dir = match env::var("AMPD_LIBMPD_DIR") {
        Ok(dir) => dir,
        Err(_) => {
            let target_abi = if target.contains("aarch64") {
                "arm64-v8a"
            } else if target.contains("armv7") {
                "armeabi-v7a"
            } else if target.starts_with("arm") {
                "armeabi"
            } else if target.contains("i686") {
                "x86"
            } else {
                "x86_64"
            };
            let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
            format!("{}/../../libs/{}", manifest_dir, target_abi)
        }
    };

    println!("cargo:rustc-link-search=native={}", lib_dir);
}
