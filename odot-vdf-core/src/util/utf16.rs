/// encodes an ASCII string as NUL-terminated UTF-16 at compile time. `N`
/// must be the string length plus one for the terminator.
///
/// # Panics
///
/// during const evaluation, when `N` does not match or the string is not ASCII.
pub const fn encode_ascii_utf16<const N: usize>(s: &str) -> [u16; N] {
    let bytes = s.as_bytes();
    assert!(bytes.len() + 1 == N, "buffer must hold the string and a NUL");
    let mut out = [0u16; N];
    let mut i = 0;
    while i < bytes.len() {
        assert!(bytes[i].is_ascii(), "only ASCII strings are supported");
        out[i] = bytes[i] as u16;
        i += 1;
    }
    out
}

/// reads a UTF-16 buffer up to its first NUL
pub fn decode_utf16_nul(buf: &[u16]) -> String {
    let end = buf.iter().position(|c| *c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..end])
}
