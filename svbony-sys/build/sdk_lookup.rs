//! Where the build script looks for the vendor library.
//!
//! Kept free of build-time crates so that the lookup rules can be tested
//! from `tests/sdk_lookup_tests.rs`.

use std::path::{Path, PathBuf};

pub const LIB_FILE_NAMES: [&str; 5] = [
    "libSVBCameraSDK.a",
    "libSVBCameraSDK.so",
    "libSVBCameraSDK.dylib",
    "SVBCameraSDK.lib",
    "SVBCameraSDK.dll",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkSource {
    /// `SVB_SDK_ROOT`. When set, nothing else is tried.
    Explicit(PathBuf),
    PkgConfig,
    /// `<crate>/sdk`
    Bundled(PathBuf),
}

/// Sources to try, in order.
pub fn sdk_sources(env_root: Option<PathBuf>, project_root: &Path) -> Vec<SdkSource> {
    match env_root {
        Some(root) if !root.as_os_str().is_empty() => vec![SdkSource::Explicit(root)],
        _ => vec![SdkSource::PkgConfig, SdkSource::Bundled(project_root.join("sdk"))],
    }
}

/// pkg-config only knows about the SDK on unix hosts.
pub fn pkg_config_supported(target_os: &str) -> bool {
    matches!(target_os, "linux" | "macos")
}

/// `lib/<os>/<arch>` directory of the vendor archive for a Rust target.
pub fn vendor_lib_subdir(os: &str, arch: &str, target: &str) -> Result<PathBuf, String> {
    let os_dir = match os {
        "linux" => "linux",
        "macos" => "mac",
        "windows" => "win",
        other => return Err(format!("Unsupported OS for the SVBONY SDK: {other}")),
    };

    let arch_dir = match (os_dir, arch) {
        (_, "x86_64") => "x64",
        (_, "x86") => "x86",
        // armv6 and armv7 share the Rust arch name; the target triple tells them apart.
        ("linux", "arm") if target.starts_with("armv7") => "armv7",
        ("linux", "arm") => "armv6",
        ("linux", "aarch64") => "armv8",
        (os_dir, arch) => return Err(format!("Unsupported platform for the SVBONY SDK: {os_dir}/{arch}")),
    };

    Ok(Path::new("lib").join(os_dir).join(arch_dir))
}

/// First known library file directly inside `root/<subdir>`.
pub fn lib_in_subdir(root: &Path, subdir: &Path) -> Option<PathBuf> {
    let dir = root.join(subdir);
    LIB_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

pub fn is_lib_file_name(name: &str) -> bool {
    LIB_FILE_NAMES.contains(&name)
}

pub fn is_static_lib(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("a"))
        .unwrap_or(false)
}
