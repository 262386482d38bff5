// Tag directory walk over RouterBOOT config sections

use super::{SectionMagic, ID_TERMINATOR};
use crate::bitwise::{read_u16_be, read_u32_be};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TagError {
    #[error("Tag {0} not found in config section")]
    NotFound(u16),
}

pub type Result<T> = std::result::Result<T, TagError>;

/// One record of a config section's tag directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRecord<'a> {
    /// Numeric tag id
    pub id: u16,
    /// Offset of the value bytes within the section buffer
    pub offset: usize,
    /// Value bytes, always the full declared length
    pub data: &'a [u8],
}

/// Iterator over the tag directory of a config section.
///
/// Yields (length, id, value) records following the section header. The
/// directory format is lenient: the id-0 terminator, truncated trailing
/// framing and a declared length overrunning the buffer all simply end
/// iteration, none of them is an error.
pub struct TagReader<'a> {
    buf: &'a [u8],
    pos: usize,
    aligned: bool,
}

impl<'a> TagReader<'a> {
    /// Parse the section header at the start of `buf`.
    ///
    /// `None` unless the buffer opens with a recognized section magic. Soft
    /// config sections must hold at least eight bytes so the checksum word
    /// can be skipped along with the magic; the checksum is never verified.
    pub fn new(buf: &'a [u8]) -> Option<TagReader<'a>> {
        if buf.len() < 4 {
            return None;
        }

        let magic = SectionMagic::from_value(read_u32_be(buf, 0))?;
        if buf.len() < magic.header_len() {
            return None;
        }

        Some(TagReader {
            buf,
            pos: magic.header_len(),
            aligned: magic.aligned(),
        })
    }
}

impl<'a> Iterator for TagReader<'a> {
    type Item = TagRecord<'a>;

    fn next(&mut self) -> Option<TagRecord<'a>> {
        let buf = self.buf;
        let mut pos = self.pos;

        // Permissive framing bound: a readable length whose id turns out
        // truncated ends the walk cleanly below
        if buf.len() - pos <= 2 {
            return None;
        }
        let len = read_u16_be(buf, pos) as usize;
        pos += 2;

        if buf.len() - pos < 2 {
            self.pos = buf.len();
            return None;
        }
        let id = read_u16_be(buf, pos);
        pos += 2;

        // Terminator ends the directory before the length is even checked
        if id == ID_TERMINATOR {
            self.pos = buf.len();
            return None;
        }

        if buf.len() - pos < len {
            self.pos = buf.len();
            return None;
        }

        let record = TagRecord {
            id,
            offset: pos,
            data: &buf[pos..pos + len],
        };

        let skip = if self.aligned { (len + 3) / 4 } else { len };
        self.pos = pos + skip;

        Some(record)
    }
}

/// Locate tag `tag_id` in the config section at the start of `buf` and
/// return its value bytes.
///
/// First match wins. An unrecognized section header, a terminator before
/// the tag, truncated framing and an overlong declared length all report
/// the same way: the tag was not found.
pub fn find_tag(buf: &[u8], tag_id: u16) -> Result<&[u8]> {
    let reader = TagReader::new(buf).ok_or(TagError::NotFound(tag_id))?;

    for record in reader {
        if record.id == tag_id {
            return Ok(record.data);
        }
    }

    Err(TagError::NotFound(tag_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routerboot::{MAGIC_DAWN, MAGIC_ERD, MAGIC_HARD, MAGIC_SOFT};

    fn section(magic: u32, body: &[u8]) -> Vec<u8> {
        let mut buf = magic.to_be_bytes().to_vec();
        buf.extend_from_slice(body);
        buf
    }

    fn record(len: u16, id: u16, data: &[u8]) -> Vec<u8> {
        let mut rec = len.to_be_bytes().to_vec();
        rec.extend_from_slice(&id.to_be_bytes());
        rec.extend_from_slice(data);
        rec
    }

    fn terminator() -> Vec<u8> {
        record(0, ID_TERMINATOR, &[])
    }

    #[test]
    fn test_short_buffer_not_found() {
        assert_eq!(find_tag(&[], 22), Err(TagError::NotFound(22)));
        assert_eq!(find_tag(&[0x64, 0x72, 0x61], 22), Err(TagError::NotFound(22)));
    }

    #[test]
    fn test_unknown_magic_not_found() {
        let buf = section(0x11223344, &record(2, 22, &[1, 2]));
        assert!(find_tag(&buf, 22).is_err());

        // "Dawn" is a known value but not a parseable format
        let buf = section(MAGIC_DAWN, &record(2, 22, &[1, 2]));
        assert!(find_tag(&buf, 22).is_err());
        assert!(TagReader::new(&buf).is_none());
    }

    #[test]
    fn test_find_in_hard_section() {
        let mut body = record(4, 5, &[1, 2, 3, 4]);
        body.extend(record(2, 22, &[0xAB, 0xCD]));
        body.extend(terminator());

        let buf = section(MAGIC_HARD, &body);
        assert_eq!(find_tag(&buf, 22), Ok(&[0xAB, 0xCD][..]));
    }

    #[test]
    fn test_first_match_wins() {
        let mut body = record(1, 7, &[0x11]);
        body.extend(record(1, 7, &[0x22]));
        body.extend(terminator());

        let buf = section(MAGIC_HARD, &body);
        assert_eq!(find_tag(&buf, 7), Ok(&[0x11][..]));
    }

    #[test]
    fn test_terminator_hides_later_tags() {
        // The id-0 check comes before the overrun check, so even a
        // terminator declaring an absurd length ends the directory
        let mut body = record(0xFFFF, ID_TERMINATOR, &[]);
        body.extend(record(2, 22, &[0xAB, 0xCD]));
        body.extend(terminator());

        let buf = section(MAGIC_HARD, &body);
        assert_eq!(find_tag(&buf, 22), Err(TagError::NotFound(22)));
    }

    #[test]
    fn test_overlong_record_stops_walk() {
        let buf = section(MAGIC_HARD, &record(100, 9, &[1, 2, 3, 4]));
        assert_eq!(find_tag(&buf, 9), Err(TagError::NotFound(9)));
    }

    #[test]
    fn test_soft_section_skips_checksum() {
        let mut body = vec![0xDE, 0xAD, 0xBE, 0xEF]; // checksum, never verified
        body.extend(record(3, 22, &[7, 8, 9]));
        body.extend(terminator());

        let buf = section(MAGIC_SOFT, &body);
        assert_eq!(find_tag(&buf, 22), Ok(&[7, 8, 9][..]));
    }

    #[test]
    fn test_soft_section_needs_checksum_bytes() {
        let buf = section(MAGIC_SOFT, &[0xDE, 0xAD]);
        assert!(TagReader::new(&buf).is_none());
        assert_eq!(find_tag(&buf, 22), Err(TagError::NotFound(22)));
    }

    #[test]
    fn test_erd_aligned_skip() {
        // A length of 5 occupies ceil(5/4) = 2 bytes in an ERD directory;
        // the id-22 record is only reachable with the packed advance
        let mut body = record(5, 1, &[0xAA, 0xBB]);
        body.extend(record(2, 22, &[0xCC, 0xDD]));
        body.extend(terminator());

        let buf = section(MAGIC_ERD, &body);
        assert_eq!(find_tag(&buf, 22), Ok(&[0xCC, 0xDD][..]));
    }

    #[test]
    fn test_erd_match_returns_declared_length() {
        // The matched value spans the full declared length even though the
        // walk would only have advanced two bytes past it
        let mut body = record(5, 1, &[0xAA, 0xBB]);
        body.extend(record(2, 22, &[0xCC, 0xDD]));
        body.extend(terminator());

        let buf = section(MAGIC_ERD, &body);
        assert_eq!(find_tag(&buf, 1), Ok(&[0xAA, 0xBB, 0x00, 0x02, 0x00][..]));
    }

    #[test]
    fn test_trailing_partial_record() {
        let mut body = record(1, 4, &[0x42]);
        body.extend([0x00, 0x01, 0x02]); // length readable, id truncated

        let buf = section(MAGIC_HARD, &body);
        assert_eq!(find_tag(&buf, 22), Err(TagError::NotFound(22)));
        assert_eq!(find_tag(&buf, 4), Ok(&[0x42][..]));
    }

    #[test]
    fn test_empty_value_record() {
        let mut body = record(0, 9, &[]);
        body.extend(record(1, 22, &[0x5A]));
        body.extend(terminator());

        let buf = section(MAGIC_HARD, &body);
        assert_eq!(find_tag(&buf, 9), Ok(&[][..]));
        assert_eq!(find_tag(&buf, 22), Ok(&[0x5A][..]));
    }

    #[test]
    fn test_reader_iterates_all() {
        let mut body = record(1, 5, &[0x11]);
        body.extend(record(2, 7, &[0x22, 0x33]));
        body.extend(record(1, 22, &[0x44]));
        body.extend(terminator());

        let buf = section(MAGIC_HARD, &body);
        let records: Vec<_> = TagReader::new(&buf).unwrap().collect();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, 5);
        assert_eq!(records[0].offset, 8);
        assert_eq!(records[0].data, &[0x11]);
        assert_eq!(records[1].id, 7);
        assert_eq!(records[1].offset, 13);
        assert_eq!(records[1].data, &[0x22, 0x33]);
        assert_eq!(records[2].id, 22);
        assert_eq!(records[2].offset, 19);
        assert_eq!(records[2].data, &[0x44]);
    }

    #[test]
    fn test_reader_stops_after_terminator() {
        let mut body = terminator();
        body.extend(record(1, 22, &[0x44]));

        let buf = section(MAGIC_HARD, &body);
        let mut reader = TagReader::new(&buf).unwrap();
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }
}
