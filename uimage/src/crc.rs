//! CRC32 checksum helpers
//!
//! The legacy header uses the IEEE 802.3 polynomial with the same
//! initial value and final xor as zlib's `crc32`.

use crc32fast::Hasher;

/// Calculate the CRC32 of `data`
pub fn calculate_crc32(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Calculate the CRC32 over several slices as if they were concatenated
pub fn calculate_crc32_chunks<'a, I>(chunks: I) -> u32
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut hasher = Hasher::new();
    for chunk in chunks {
        hasher.update(chunk);
    }
    hasher.finalize()
}
