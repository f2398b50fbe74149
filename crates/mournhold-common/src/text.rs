//! Legacy text decoding.
//!
//! Strings in TES3 files are single-byte Windows-1252, usually NUL-terminated
//! and sometimes padded with further NULs or garbage after the terminator.

use encoding_rs::WINDOWS_1252;

/// Decode Windows-1252 bytes into an owned string.
pub fn decode(bytes: &[u8]) -> String {
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Decode a NUL-terminated buffer: text ends at the first NUL, or at the end of
/// the buffer when none is present.
pub fn decode_nul_terminated(bytes: &[u8]) -> String {
    let end = memchr::memchr(0, bytes).unwrap_or(bytes.len());
    decode(&bytes[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_stops_at_first_nul() {
        assert_eq!(decode_nul_terminated(b"Balmora\0\0junk"), "Balmora");
        assert_eq!(decode_nul_terminated(b"no terminator"), "no terminator");
        assert_eq!(decode_nul_terminated(b"\0"), "");
    }

    #[test]
    fn test_windows_1252_high_bytes() {
        // 0xE9 is 'e' with acute accent, 0x92 a right single quote
        assert_eq!(decode(&[b'C', 0xE9, 0x92, b's']), "C\u{e9}\u{2019}s");
    }

    #[quickcheck]
    fn decoded_len_never_exceeds_input_chars(data: Vec<u8>) -> bool {
        decode_nul_terminated(&data).chars().count() <= data.len()
    }
}
