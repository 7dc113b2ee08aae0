//! # uimage
//!
//! Wrap an arbitrary binary payload in a legacy U-Boot image ("uImage")
//! header: a 64 byte big-endian record carrying the load address, entry
//! point, OS/architecture/type/compression codes, a name, and CRC32
//! checksums of both the data and the header itself.
//!
//! ## Example
//!
//! ```rust
//! use uimage::{ImageOptions, build_image, verify_image};
//!
//! let options = ImageOptions {
//!     arch: "ARM64".into(),
//!     load_address: 0x80000,
//!     entrypoint: 0x80000,
//!     image_name: b"Test Kernel".to_vec(),
//!     ..ImageOptions::default()
//! };
//! let image = build_image(b"kernel bytes", &options)?;
//!
//! let (header, data) = verify_image(&image)?;
//! assert_eq!(header.load, 0x80000);
//! assert_eq!(data, b"kernel bytes");
//! # Ok::<(), uimage::UImageError>(())
//! ```

pub mod builder;
pub mod cli;
pub mod compression;
pub mod crc;
pub mod error;
pub mod image_header;
pub mod image_types;
pub mod multi;
pub mod registry;

pub use builder::{ImageBuilder, ImageOptions, build_image, round_up, verify_image};
pub use compression::CompressionInterface;
pub use crc::calculate_crc32;
pub use error::{Result, UImageError};
pub use image_header::{IH_HEADER_SIZE, IH_NMLEN, ImageHeader};
pub use image_types::CodeTable;
pub use multi::{pack_multi, unpack_multi};
pub use registry::{OptionRegistry, Registries, registries};

/// Current version of the uimage implementation
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Magic number for U-Boot legacy images
pub const IH_MAGIC: u32 = 0x27051956;
