// Binary parsing helpers shared by the config section parsers
pub mod elements;

pub use elements::{read_u16_be, read_u32_be};
