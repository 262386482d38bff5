// RouterBOOT boot-config format: section magics, flash layout, tag directory
pub mod magic;
pub mod tags;

pub use magic::{find_magic, SCAN_STRIDE};
pub use tags::{find_tag, TagError, TagReader, TagRecord};

use std::fmt;

/// Legacy ERD config section magic
pub const MAGIC_ERD: u32 = 0x00455244;
/// Hard config section magic ("Hard" stored little-endian)
pub const MAGIC_HARD: u32 = 0x64726148;
/// Soft config section magic ("Soft" stored little-endian)
pub const MAGIC_SOFT: u32 = 0x74666F53;
/// Newer "Dawn" soft config magic; not a parseable section format
pub const MAGIC_DAWN: u32 = 0x6E776144;

/// Tag id terminating a directory, never a real tag
pub const ID_TERMINATOR: u16 = 0;
/// Tag id of the wireless calibration data record
pub const ID_WLAN_DATA: u16 = 22;

/// Boot loader region offset within a flash dump
pub const ROUTERBOOT_OFFSET: usize = 0x0000;
/// Boot loader region size
pub const ROUTERBOOT_SIZE: usize = 0xe000;
/// Usual hard config section offset (the block after the boot loader)
pub const HARD_CFG_OFFSET: usize = 0xe000;
/// Hard config section size: one 4 KiB flash block
pub const HARD_CFG_SIZE: usize = 0x1000;
/// Most bytes of a flash dump ever consumed
pub const IMAGE_SIZE: usize = 0x20000;

/// Recognized config section formats, keyed by their leading magic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionMagic {
    /// Legacy ERD section: packed directory, 4-byte header
    Erd,
    /// Hard config: board identity and calibration data, 4-byte header
    Hard,
    /// Soft config: user settings, 8-byte header (magic plus checksum)
    Soft,
}

impl SectionMagic {
    /// The magic value announcing this section format
    pub fn value(self) -> u32 {
        match self {
            SectionMagic::Erd => MAGIC_ERD,
            SectionMagic::Hard => MAGIC_HARD,
            SectionMagic::Soft => MAGIC_SOFT,
        }
    }

    /// Recognize a section magic value; "Dawn" and everything else
    /// unrecognized stays `None`
    pub fn from_value(value: u32) -> Option<SectionMagic> {
        match value {
            MAGIC_ERD => Some(SectionMagic::Erd),
            MAGIC_HARD => Some(SectionMagic::Hard),
            MAGIC_SOFT => Some(SectionMagic::Soft),
            _ => None,
        }
    }

    /// Header bytes preceding the tag directory
    pub fn header_len(self) -> usize {
        match self {
            SectionMagic::Erd | SectionMagic::Hard => 4,
            SectionMagic::Soft => 8,
        }
    }

    /// Whether directory records advance by `(len + 3) / 4` instead of the
    /// declared length (legacy ERD packing)
    pub fn aligned(self) -> bool {
        matches!(self, SectionMagic::Erd)
    }
}

impl fmt::Display for SectionMagic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionMagic::Erd => "ERD",
            SectionMagic::Hard => "hard",
            SectionMagic::Soft => "soft",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_values_round_trip() {
        for kind in [SectionMagic::Erd, SectionMagic::Hard, SectionMagic::Soft] {
            assert_eq!(SectionMagic::from_value(kind.value()), Some(kind));
        }
    }

    #[test]
    fn test_unrecognized_magics() {
        assert_eq!(SectionMagic::from_value(MAGIC_DAWN), None);
        assert_eq!(SectionMagic::from_value(0), None);
        assert_eq!(SectionMagic::from_value(0xFFFFFFFF), None);
    }

    #[test]
    fn test_header_lengths() {
        assert_eq!(SectionMagic::Erd.header_len(), 4);
        assert_eq!(SectionMagic::Hard.header_len(), 4);
        assert_eq!(SectionMagic::Soft.header_len(), 8);
    }

    #[test]
    fn test_only_erd_is_aligned() {
        assert!(SectionMagic::Erd.aligned());
        assert!(!SectionMagic::Hard.aligned());
        assert!(!SectionMagic::Soft.aligned());
    }
}
