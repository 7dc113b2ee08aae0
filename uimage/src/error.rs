//! Error types for uImage construction and inspection

use thiserror::Error;

/// Errors produced while building, parsing or verifying an image
#[derive(Debug, Error)]
pub enum UImageError {
    /// A symbolic name is not present in the code table
    #[error("unknown {table} option: {name}")]
    UnknownOption { table: &'static str, name: String },

    /// The selected compression scheme has no transform
    #[error("compression type {0} is not yet implemented")]
    NotImplemented(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid magic number: expected 0x{expected:08x}, found 0x{found:08x}")]
    BadMagic { expected: u32, found: u32 },

    #[error("header CRC mismatch: stored 0x{stored:08x}, calculated 0x{calculated:08x}")]
    HeaderCrcMismatch { stored: u32, calculated: u32 },

    #[error("data CRC mismatch: stored 0x{stored:08x}, calculated 0x{calculated:08x}")]
    DataCrcMismatch { stored: u32, calculated: u32 },

    #[error("invalid image data: {0}")]
    InvalidImageData(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid number '{input}': {reason}")]
    InvalidNumber { input: String, reason: String },
}

impl UImageError {
    pub fn unknown_option(table: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownOption {
            table,
            name: name.into(),
        }
    }

    pub fn invalid_image_data(msg: impl Into<String>) -> Self {
        Self::InvalidImageData(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, UImageError>;
