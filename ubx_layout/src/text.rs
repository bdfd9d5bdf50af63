//! Zero-padded character arrays, as used by the version strings

use core::str::Utf8Error;

/// Copy `value` into `dst` and zero the rest. A value longer than `dst` is
/// cut at the last character boundary that fits. Returns the bytes copied.
pub fn encode_text(dst: &mut [u8], value: &str) -> usize {
    let mut n = value.len().min(dst.len());
    while !value.is_char_boundary(n) {
        n -= 1;
    }
    dst[..n].copy_from_slice(&value.as_bytes()[..n]);
    dst[n..].fill(0);
    n
}

/// Text up to the first NUL byte, or the whole slice if there is none
pub fn decode_text(bytes: &[u8]) -> Result<&str, Utf8Error> {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    core::str::from_utf8(&bytes[..end])
}

/// Build a `[u8; N]` field from a string
pub fn text_array<const N: usize>(value: &str) -> [u8; N] {
    let mut ret = [0; N];
    encode_text(&mut ret, value);
    ret
}
