//! Payload layout for `MULTI` images
//!
//! A multi-file payload starts with the size of every sub-image as a
//! big-endian `u32`, terminated by a zero word. The sub-images follow one
//! after another, each padded with zeros to a 4 byte boundary except the
//! last one.

use byteorder::{BigEndian, ByteOrder};

use crate::builder::round_up;
use crate::error::{Result, UImageError};

/// Alignment of sub-images inside a multi-file payload
pub const MULTI_ALIGN: usize = 4;

/// Concatenate `images` into a multi-file payload
pub fn pack_multi<T: AsRef<[u8]>>(images: &[T]) -> Result<Vec<u8>> {
    let table_len = (images.len() + 1) * 4;
    let data_len: usize = images
        .iter()
        .map(|img| round_up(img.as_ref().len(), MULTI_ALIGN))
        .sum();

    let mut out = Vec::with_capacity(table_len + data_len);
    let mut word = [0u8; 4];
    for img in images {
        let len = u32::try_from(img.as_ref().len()).map_err(|_| {
            UImageError::invalid_image_data(format!(
                "sub-image of {} bytes does not fit a 32-bit size",
                img.as_ref().len()
            ))
        })?;
        if len == 0 {
            return Err(UImageError::invalid_image_data(
                "empty sub-image would terminate the size list",
            ));
        }
        BigEndian::write_u32(&mut word, len);
        out.extend_from_slice(&word);
    }
    out.extend_from_slice(&[0u8; 4]);

    let last = images.len().saturating_sub(1);
    for (i, img) in images.iter().enumerate() {
        let img = img.as_ref();
        out.extend_from_slice(img);
        if i != last {
            out.resize(out.len() + round_up(img.len(), MULTI_ALIGN) - img.len(), 0);
        }
    }

    Ok(out)
}

/// Split a multi-file payload back into its sub-images
pub fn unpack_multi(data: &[u8]) -> Result<Vec<&[u8]>> {
    let mut sizes = Vec::new();
    let mut offset = 0;
    loop {
        let word = data
            .get(offset..offset + 4)
            .ok_or_else(|| UImageError::invalid_image_data("unterminated multi-file size list"))?;
        offset += 4;
        match BigEndian::read_u32(word) {
            0 => break,
            size => sizes.push(size as usize),
        }
    }

    let mut images = Vec::with_capacity(sizes.len());
    for (i, size) in sizes.iter().copied().enumerate() {
        let img = data.get(offset..offset + size).ok_or_else(|| {
            UImageError::invalid_image_data(format!("multi-file sub-image {i} truncated"))
        })?;
        images.push(img);
        offset += round_up(size, MULTI_ALIGN);
    }

    Ok(images)
}
