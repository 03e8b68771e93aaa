use std::env;

macro_rules! println_info {
    ($($tokens: tt)*) => {
        println!("cargo:warning=\r\x1b[32;1m   {}", format!($($tokens)*))
    }
}

fn main() {
    println!("cargo:rerun-if-env-changed=DEP_SVBCAMERASDK_LIB_DIR");

    // svbony-sys exports the directory it linked from; without `native` there is none.
    let Ok(lib_dir) = env::var("DEP_SVBCAMERASDK_LIB_DIR") else {
        return;
    };

    // Tests and demos load the shared vendor library straight from the SDK tree.
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "linux" || target_os == "macos" {
        println_info!("Adding rpath for SVBCameraSDK: {}", lib_dir);
        println!("cargo:rustc-link-arg=-Wl,-rpath,{lib_dir}");
    }
}
