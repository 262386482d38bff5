// Stride scan for config section magics in a flash dump

use super::SectionMagic;
use crate::bitwise::read_u32_be;

/// Scan stride: config sections start on 4 KiB flash block boundaries
pub const SCAN_STRIDE: usize = 0x1000;

/// Scan `buf` from `start` in 4 KiB strides for the signature of `kind`.
///
/// Returns the absolute offset of the first match. `None` means the scan ran
/// off the end of the buffer; a stride position with fewer than four bytes
/// left is never read. Whether a missing section is an error is the caller's
/// call.
pub fn find_magic(buf: &[u8], start: usize, kind: SectionMagic) -> Option<usize> {
    let magic_ref = kind.value();
    let mut cur = start;

    while cur + 4 <= buf.len() {
        if read_u32_be(buf, cur) == magic_ref {
            return Some(cur);
        }
        cur += SCAN_STRIDE;
    }

    None
}
