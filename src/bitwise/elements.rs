// Big-endian integer extraction for config section parsing

/// Read a u16 in big-endian format at `offset`.
///
/// Callers must ensure `offset + 2 <= buf.len()`; the read itself is not
/// validated here, and slice indexing panics rather than reading past the
/// end of the buffer.
pub fn read_u16_be(buf: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([buf[offset], buf[offset + 1]])
}

/// Read a u32 in big-endian format at `offset`.
///
/// Same contract as [`read_u16_be`]: `offset + 4 <= buf.len()` is the
/// caller's responsibility.
pub fn read_u32_be(buf: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}
