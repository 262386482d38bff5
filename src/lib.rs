// ROUTERBOOT2ART: wireless calibration extraction from RouterBOOT flash dumps
// Copyright 2026 - Licensed under GPLv3

pub mod art;
pub mod bitwise;
pub mod rle;
pub mod routerboot;

// Re-export commonly used types
pub use art::{extract_art, load_image, save_art, ArtError, ART_SIZE};
pub use bitwise::{read_u16_be, read_u32_be};
pub use rle::{rle_decode, RleError, RleStatus};
pub use routerboot::{find_magic, find_tag, SectionMagic, TagError, TagReader, TagRecord};

/// routerboot2art version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
