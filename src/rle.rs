// Run-length decoder for wireless calibration payloads

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RleError {
    #[error("Empty source or destination buffer")]
    InvalidInput,
}

pub type Result<T> = std::result::Result<T, RleError>;

/// Outcome of a decode pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RleStatus {
    /// Source bytes consumed, including the terminator when reached
    pub src_consumed: usize,
    /// Destination bytes written
    pub dst_written: usize,
    /// Whether the zero terminator was reached
    pub terminated: bool,
}

/// Decode an RLE stream from `src` into `dst`.
///
/// Each control byte is a signed count: positive repeats the following
/// literal byte that many times, negative copies that many bytes verbatim,
/// zero terminates the stream. Running out of source or destination ends
/// the pass without error; `terminated` records whether the zero byte was
/// actually reached. The only hard failure is an empty buffer on either
/// side.
pub fn rle_decode(src: &[u8], dst: &mut [u8]) -> Result<RleStatus> {
    if src.is_empty() || dst.is_empty() {
        return Err(RleError::InvalidInput);
    }

    let mut srcpos = 0;
    let mut dstpos = 0;
    let mut terminated = false;

    while srcpos < src.len() {
        let count = src[srcpos] as i8;
        srcpos += 1;

        if count == 0 {
            terminated = true;
            break;
        }

        if count > 0 {
            if srcpos >= src.len() {
                break;
            }
            let literal = src[srcpos];
            srcpos += 1;

            // Writes beyond the destination stop; the stream keeps going
            for _ in 0..count {
                if dstpos >= dst.len() {
                    break;
                }
                dst[dstpos] = literal;
                dstpos += 1;
            }
        } else {
            // -128 copies 128 bytes; plain negation would overflow i8
            let n = count.unsigned_abs() as usize;
            for _ in 0..n {
                if srcpos >= src.len() || dstpos >= dst.len() {
                    break;
                }
                dst[dstpos] = src[srcpos];
                srcpos += 1;
                dstpos += 1;
            }
        }
    }

    Ok(RleStatus {
        src_consumed: srcpos,
        dst_written: dstpos,
        terminated,
    })
}
