/// Library lookup rules used by the build script.
#[path = "../build/sdk_lookup.rs"]
mod sdk_lookup;

#[cfg(test)]
mod sdk_lookup_tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::sdk_lookup::*;

    #[test]
    fn test_explicit_root_is_the_only_source() {
        let sources = sdk_sources(Some(PathBuf::from("/opt/svb")), Path::new("/src/svbony-sys"));
        assert_eq!(sources, vec![SdkSource::Explicit(PathBuf::from("/opt/svb"))]);
    }

    #[test]
    fn test_pkg_config_before_bundled_sdk() {
        let sources = sdk_sources(None, Path::new("/src/svbony-sys"));
        assert_eq!(
            sources,
            vec![SdkSource::PkgConfig, SdkSource::Bundled(PathBuf::from("/src/svbony-sys/sdk"))]
        );
        assert_eq!(sdk_sources(Some(PathBuf::new()), Path::new("/src/svbony-sys")), sources);
    }

    #[test]
    fn test_vendor_subdirs() {
        let cases = [
            ("linux", "x86_64", "x86_64-unknown-linux-gnu", "lib/linux/x64"),
            ("linux", "aarch64", "aarch64-unknown-linux-gnu", "lib/linux/armv8"),
            ("linux", "arm", "armv7-unknown-linux-gnueabihf", "lib/linux/armv7"),
            ("linux", "arm", "arm-unknown-linux-gnueabihf", "lib/linux/armv6"),
            ("macos", "x86_64", "x86_64-apple-darwin", "lib/mac/x64"),
            ("windows", "x86", "i686-pc-windows-msvc", "lib/win/x86"),
        ];
        for (os, arch, target, expected) in cases {
            assert_eq!(vendor_lib_subdir(os, arch, target).unwrap(), PathBuf::from(expected));
        }
        assert!(vendor_lib_subdir("macos", "aarch64", "aarch64-apple-darwin").is_err());
        assert!(vendor_lib_subdir("freebsd", "x86_64", "x86_64-unknown-freebsd").is_err());
        assert!(!pkg_config_supported("windows"));
    }

    #[test]
    fn test_lib_found_in_explicit_root() {
        let root = tempfile::tempdir().unwrap();
        let subdir = vendor_lib_subdir("linux", "x86_64", "x86_64-unknown-linux-gnu").unwrap();
        assert_eq!(lib_in_subdir(root.path(), &subdir), None);

        fs::create_dir_all(root.path().join(&subdir)).unwrap();
        fs::write(root.path().join(&subdir).join("libSVBCameraSDK.so"), b"").unwrap();
        let lib = lib_in_subdir(root.path(), &subdir).unwrap();
        assert!(lib.starts_with(root.path()));
        assert!(!is_static_lib(&lib));

        fs::write(root.path().join(&subdir).join("libSVBCameraSDK.a"), b"").unwrap();
        let lib = lib_in_subdir(root.path(), &subdir).unwrap();
        assert!(is_static_lib(&lib));
    }
}
