// Helpers for the two kinds of strings the SDK hands out: NUL-terminated
// pointers (SDK version) and fixed-size char arrays inside structs.

use std::ffi::CStr;
use std::os::raw::c_char;

/// Convert a NUL-terminated C string to a Rust `String`. Null yields an empty string.
///
/// # Safety
/// `c_str` must be null or point to a valid NUL-terminated string.
pub unsafe fn c_str_to_string(c_str: *const c_char) -> String {
    if c_str.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(c_str).to_string_lossy().into_owned() }
}

/// Bytes of a fixed-size char array up to, not including, the first NUL.
///
/// An array without a terminator is taken whole; nothing past the array bound
/// is ever read.
pub fn fixed_bytes(chars: &[c_char]) -> Vec<u8> {
    chars
        .iter()
        .map(|&c| c as u8)
        .take_while(|&b| b != 0)
        .collect()
}

/// Lossy UTF-8 decoding of a fixed-size char array, see [`fixed_bytes`].
pub fn fixed_to_string(chars: &[c_char]) -> String {
    String::from_utf8_lossy(&fixed_bytes(chars)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &[u8]) -> Vec<c_char> {
        s.iter().map(|&b| b as c_char).collect()
    }

    #[test]
    fn stops_at_first_nul() {
        assert_eq!(fixed_to_string(&chars(b"SVBONY SV305\0junk")), "SVBONY SV305");
    }

    #[test]
    fn unterminated_array_is_taken_whole() {
        assert_eq!(fixed_to_string(&chars(b"ABCDEFGH")), "ABCDEFGH");
    }

    #[test]
    fn null_pointer_is_empty() {
        assert_eq!(unsafe { c_str_to_string(std::ptr::null()) }, "");
    }
}
