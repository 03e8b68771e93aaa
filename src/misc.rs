use std::os::raw::c_char;

use svbony_sys::string_utils;

/// Decode a fixed-size `char` array from an SDK struct, stopping at the first
/// NUL inside the array bound.
pub fn fixed_cstr_to_string(chars: &[c_char]) -> String {
    string_utils::fixed_to_string(chars)
}

/// Same as [`fixed_cstr_to_string`] for `unsigned char` arrays such as `SVB_SN`.
pub fn fixed_bytes_to_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Copy a sentinel-terminated SDK array, leaving out the sentinel and
/// everything after it. An array without the sentinel is copied whole.
pub fn take_until_sentinel<T: Copy + PartialEq>(values: &[T], sentinel: T) -> Vec<T> {
    values.iter().copied().take_while(|v| *v != sentinel).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_at_sentinel() {
        assert_eq!(take_until_sentinel(&[1, 2, 4, 0, 3, 0], 0), vec![1, 2, 4]);
        assert_eq!(take_until_sentinel(&[0, 5, 6], 0), Vec::<i32>::new());
        assert_eq!(take_until_sentinel(&[0, 4, 10], -1), vec![0, 4, 10]);
    }

    #[test]
    fn decodes_unsigned_strings() {
        assert_eq!(fixed_bytes_to_string(b"SN1234\0\0"), "SN1234");
        assert_eq!(fixed_bytes_to_string(b"12345678"), "12345678");
        assert_eq!(fixed_bytes_to_string(&[0xff, b'A', 0]), "\u{fffd}A");
    }
}
