//! Compression transforms applied to the payload before it is wrapped
//!
//! Only the identity transform exists. Selecting any other scheme is an
//! error rather than a silent fallback to uncompressed data, since the
//! header would otherwise advertise a compression the data does not have.

use std::borrow::Cow;

use crate::error::{Result, UImageError};
use crate::image_types::{COMPRESSION_TABLE, IH_COMP_NONE};

/// A payload transform identified by a compression code
pub trait CompressionInterface: Send + Sync {
    /// Compress `data`
    fn compress<'a>(&self, data: &'a [u8]) -> Result<Cow<'a, [u8]>>;

    /// Undo [`compress`](Self::compress)
    fn decompress<'a>(&self, compressed_data: &'a [u8]) -> Result<Cow<'a, [u8]>>;

    /// Code written to the header compression field
    fn compression_code(&self) -> u8;

    fn name(&self) -> &'static str;
}

/// Identity transform for `IH_COMP_NONE`
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompression;

impl CompressionInterface for NoCompression {
    fn compress<'a>(&self, data: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        Ok(Cow::Borrowed(data))
    }

    fn decompress<'a>(&self, compressed_data: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        Ok(Cow::Borrowed(compressed_data))
    }

    fn compression_code(&self) -> u8 {
        IH_COMP_NONE
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Look up the transform for a compression code
pub fn create_compressor(code: u8) -> Result<Box<dyn CompressionInterface>> {
    match code {
        IH_COMP_NONE => Ok(Box::new(NoCompression)),
        other => Err(UImageError::NotImplemented(
            COMPRESSION_TABLE
                .short_name(other)
                .map(str::to_string)
                .unwrap_or_else(|| format!("code {other}")),
        )),
    }
}

/// Apply the transform selected by `code` to `data`
pub fn handle_compression(data: &[u8], code: u8) -> Result<Cow<'_, [u8]>> {
    create_compressor(code)?.compress(data)
}
