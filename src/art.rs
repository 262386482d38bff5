// RouterBOOT flash dump to ART calibration blob conversion

use crate::rle::rle_decode;
use crate::routerboot::{
    find_magic, find_tag, SectionMagic, HARD_CFG_SIZE, ID_WLAN_DATA, IMAGE_SIZE, ROUTERBOOT_OFFSET,
};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

/// Size of an ART calibration blob
pub const ART_SIZE: usize = 0x10000;

#[derive(Error, Debug)]
pub enum ArtError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unable to find magic tag in input file")]
    MagicNotFound,
    #[error("No calibration data found")]
    TagNotFound,
    #[error("Unable to decode calibration data")]
    DecodeIncomplete,
}

pub type Result<T> = std::result::Result<T, ArtError>;

/// Read a RouterBOOT flash dump, truncated to the region holding the boot
/// loader and config sections.
pub fn load_image(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut data = Vec::with_capacity(IMAGE_SIZE);
    file.take(IMAGE_SIZE as u64).read_to_end(&mut data)?;
    Ok(data)
}

/// Write a calibration blob out in full.
pub fn save_art(path: &Path, art: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(art)?;
    Ok(())
}

/// Extract the wireless calibration blob from a flash dump into `art`.
///
/// Locates the hard config section, pulls its calibration tag and decodes
/// the RLE payload in place. `art` should be [`ART_SIZE`] bytes of zeroes;
/// bytes past the decoded length are left untouched.
pub fn extract_art(image: &[u8], art: &mut [u8]) -> Result<()> {
    let offset = find_magic(image, ROUTERBOOT_OFFSET, SectionMagic::Hard)
        .ok_or(ArtError::MagicNotFound)?;
    tracing::debug!("hard config section at 0x{:05x}", offset);

    // One flash block, clamped when the dump ends early
    let window_end = (offset + HARD_CFG_SIZE).min(image.len());
    let tag = find_tag(&image[offset..window_end], ID_WLAN_DATA)
        .map_err(|_| ArtError::TagNotFound)?;
    tracing::debug!("calibration tag holds {} bytes", tag.len());

    let status = rle_decode(tag, art).map_err(|_| ArtError::DecodeIncomplete)?;
    if !status.terminated {
        return Err(ArtError::DecodeIncomplete);
    }
    tracing::debug!(
        "decoded {} source bytes into {} art bytes",
        status.src_consumed,
        status.dst_written
    );

    Ok(())
}
