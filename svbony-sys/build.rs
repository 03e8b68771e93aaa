#![cfg_attr(not(feature = "native"), allow(dead_code, unused_macros, unused_imports))]

use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::sync::RwLock;

#[cfg(feature = "native")]
#[path = "build/sdk_lookup.rs"]
mod sdk_lookup;

static PROJECT_ROOT: Lazy<PathBuf> = Lazy::new(|| {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| {
        env::current_dir().unwrap().to_str().unwrap().to_string()
    }))
});

static SVB_SDK_ROOT: Lazy<RwLock<Option<PathBuf>>> =
    Lazy::new(|| RwLock::new(env::var_os("SVB_SDK_ROOT").map(PathBuf::from)));

macro_rules! println_build {
    ($($tokens:tt)*) => {
        println!("cargo:warning=\r\x1b[32;1m   {}", format!($($tokens)*))
    }
}

fn main() {
    println!("cargo:rerun-if-env-changed=SVB_SDK_ROOT");

    if env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        // Types only; nothing to link.
        return;
    }

    #[cfg(feature = "native")]
    native::link_sdk();
}

#[cfg(feature = "native")]
mod native {
    use super::sdk_lookup::{self, SdkSource};
    use super::*;
    use pkg_config::Config as PkgConfig;
    use std::path::Path;
    use walkdir::WalkDir;

    pub(super) fn link_sdk() {
        println_build!("Checking for the SVBONY camera SDK...");

        for source in sdk_lookup::sdk_sources(get_sdk_root(), &PROJECT_ROOT) {
            match source {
                SdkSource::Explicit(root) => {
                    println_build!("Using SVB_SDK_ROOT: {}", root.display());
                    match find_sdk_lib(&root) {
                        Some(lib) => link_library(&lib),
                        None => panic!(
                            "SVBCameraSDK library not found under SVB_SDK_ROOT={}. Point it at the unpacked \
                             vendor SDK (the directory containing include/ and lib/), or unset it to use \
                             pkg-config.",
                            root.display()
                        ),
                    }
                    return;
                }
                SdkSource::PkgConfig => {
                    if try_pkg_config() {
                        return;
                    }
                }
                SdkSource::Bundled(root) => {
                    if let Some(lib) = find_sdk_lib(&root) {
                        link_library(&lib);
                        return;
                    }
                    println_build!("No SVBCameraSDK library under {}", root.display());
                }
            }
        }

        panic!(
            "SVBCameraSDK library not found via pkg-config or under {}. Set SVB_SDK_ROOT to the unpacked \
             vendor SDK (the directory containing include/ and lib/).",
            PROJECT_ROOT.join("sdk").display()
        );
    }

    fn link_library(lib: &Path) {
        println_build!("Found SVBCameraSDK library at: {}", lib.display());
        println!("cargo:rerun-if-changed={}", lib.display());

        let lib_dir = lib.parent().unwrap();
        println!("cargo:rustc-link-search=native={}", lib_dir.display());
        println!("cargo:lib_dir={}", lib_dir.display());

        if sdk_lookup::is_static_lib(lib) {
            println!("cargo:rustc-link-lib=static=SVBCameraSDK");
            // The vendor archive is C++ and expects the runtime from the system.
            let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
            match target_os.as_str() {
                "macos" => println!("cargo:rustc-link-lib=dylib=c++"),
                _ => println!("cargo:rustc-link-lib=dylib=stdc++"),
            }
        } else {
            println!("cargo:rustc-link-lib=dylib=SVBCameraSDK");
        }
    }

    fn try_pkg_config() -> bool {
        let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
        if !sdk_lookup::pkg_config_supported(&target_os) {
            return false;
        }

        match PkgConfig::new().cargo_metadata(true).probe("SVBCameraSDK") {
            Ok(lib) => {
                println_build!("Found SVBCameraSDK via pkg-config.");
                if let Some(dir) = lib.link_paths.first() {
                    println!("cargo:lib_dir={}", dir.display());
                }
                true
            }
            Err(_) => {
                println_build!("SVBCameraSDK not found via pkg-config.");
                false
            }
        }
    }

    /// Vendor archive layout: `lib/<os>/<arch>/`. Falls back to a recursive search.
    fn find_sdk_lib(root: &Path) -> Option<PathBuf> {
        if !root.exists() {
            return None;
        }

        let os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
        let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
        let target = env::var("TARGET").unwrap_or_default();
        let subdir = sdk_lookup::vendor_lib_subdir(&os, &arch, &target).unwrap_or_else(|msg| panic!("{msg}"));

        println_build!("Looking for SVBCameraSDK library in: {}", root.join(&subdir).display());
        if let Some(lib) = sdk_lookup::lib_in_subdir(root, &subdir) {
            return Some(lib);
        }

        println_build!("Searching {} recursively...", root.display());
        WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != "include" && entry.file_name() != ".git")
            .filter_map(|e| e.ok())
            .find(|e| {
                e.path().is_file()
                    && e.path()
                        .file_name()
                        .and_then(|n| n.to_str())
                        .map(sdk_lookup::is_lib_file_name)
                        .unwrap_or(false)
            })
            .map(|entry| entry.path().to_path_buf())
    }

    /// `SVB_SDK_ROOT` from the environment. When set it wins over pkg-config
    /// and the bundled `sdk/` directory.
    fn get_sdk_root() -> Option<PathBuf> {
        SVB_SDK_ROOT.read().unwrap().clone()
    }
}
