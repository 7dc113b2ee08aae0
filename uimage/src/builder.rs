//! Builder for legacy uImage files

use log::debug;

use crate::IH_MAGIC;
use crate::compression::handle_compression;
use crate::crc::calculate_crc32;
use crate::error::{Result, UImageError};
use crate::image_header::{IH_HEADER_SIZE, ImageHeader};
use crate::registry::registries;

/// Round `value` up to the next multiple of `alignment`
///
/// `alignment` must be a power of two.
pub const fn round_up(value: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    (value + alignment - 1) & !(alignment - 1)
}

/// Header fields selected by the caller
///
/// The symbolic fields take names from the code tables, either the
/// canonical upper-case spelling or its lower-case alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOptions {
    pub entrypoint: u32,
    pub load_address: u32,
    pub compression: String,
    pub operating_system: String,
    pub arch: String,
    pub image_type: String,
    pub timestamp: u32,
    /// Encoded name; anything past 32 bytes is dropped
    pub image_name: Vec<u8>,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            entrypoint: 0,
            load_address: 0,
            compression: "NONE".to_string(),
            operating_system: "LINUX".to_string(),
            arch: "X86_64".to_string(),
            image_type: "KERNEL".to_string(),
            timestamp: 0,
            image_name: Vec::new(),
        }
    }
}

/// Wrap `payload` in a legacy image header
///
/// Option names are resolved before anything else, so an unknown name
/// fails without touching the payload. The data CRC covers the compressed
/// bytes and the header CRC is taken last, over the finished header with
/// its own CRC field still zero.
pub fn build_image(payload: &[u8], options: &ImageOptions) -> Result<Vec<u8>> {
    let regs = registries();
    let comp = regs.compression.resolve(&options.compression)?;
    let os = regs.os.resolve(&options.operating_system)?;
    let arch = regs.arch.resolve(&options.arch)?;
    let type_ = regs.image_type.resolve(&options.image_type)?;

    let data = handle_compression(payload, comp)?;
    let dcrc = calculate_crc32(&data);
    let size = u32::try_from(data.len()).map_err(|_| {
        UImageError::invalid_image_data(format!(
            "data size {} does not fit the 32-bit size field",
            data.len()
        ))
    })?;

    let mut header = ImageHeader {
        magic: IH_MAGIC,
        hcrc: 0,
        time: options.timestamp,
        size,
        load: options.load_address,
        ep: options.entrypoint,
        dcrc,
        os,
        arch,
        type_,
        comp,
        ..ImageHeader::default()
    };
    header.set_name(&options.image_name);
    header.update_header_crc();

    log_header(&header);

    let mut image = Vec::with_capacity(IH_HEADER_SIZE + data.len());
    header.write_to(&mut image)?;
    image.extend_from_slice(&data);
    Ok(image)
}

fn log_header(header: &ImageHeader) {
    debug!("ih_magic {:#x}", header.magic);
    debug!("ih_hcrc {:#x}", header.hcrc);
    debug!("ih_time {:#x}", header.time);
    debug!("ih_size {:#x}", header.size);
    debug!("ih_load {:#x}", header.load);
    debug!("ih_ep {:#x}", header.ep);
    debug!("ih_dcrc {:#x}", header.dcrc);
    debug!("ih_os {:#x}", header.os);
    debug!("ih_arch {:#x}", header.arch);
    debug!("ih_type {:#x}", header.type_);
    debug!("ih_comp {:#x}", header.comp);
    debug!("ih_name {:?}", header.name);
}

/// Check an image produced by [`build_image`] or any other mkimage
///
/// Returns the parsed header and the data section.
pub fn verify_image(image: &[u8]) -> Result<(ImageHeader, &[u8])> {
    let header = ImageHeader::from_bytes(image)?;

    let calculated = header.compute_header_crc();
    if calculated != header.hcrc {
        return Err(UImageError::HeaderCrcMismatch {
            stored: header.hcrc,
            calculated,
        });
    }

    let data = image
        .get(IH_HEADER_SIZE..header.total_size())
        .ok_or_else(|| {
            UImageError::invalid_image_data(format!(
                "image data incomplete: expected {} bytes, got {}",
                header.total_size(),
                image.len()
            ))
        })?;

    let calculated = calculate_crc32(data);
    if calculated != header.dcrc {
        return Err(UImageError::DataCrcMismatch {
            stored: header.dcrc,
            calculated,
        });
    }

    Ok((header, data))
}

/// Fluent front end over [`build_image`]
///
/// ```
/// use uimage::ImageBuilder;
///
/// let image = ImageBuilder::new()
///     .arch("arm64")
///     .load_address(0x80000)
///     .entry_point(0x80000)
///     .name("Test Kernel")
///     .build(b"kernel")?;
/// assert_eq!(image.len(), 64 + 6);
/// # Ok::<(), uimage::UImageError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImageBuilder {
    options: ImageOptions,
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: ImageOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ImageOptions {
        &self.options
    }

    pub fn entry_point(mut self, addr: u32) -> Self {
        self.options.entrypoint = addr;
        self
    }

    pub fn load_address(mut self, addr: u32) -> Self {
        self.options.load_address = addr;
        self
    }

    pub fn compression(mut self, name: impl Into<String>) -> Self {
        self.options.compression = name.into();
        self
    }

    pub fn os(mut self, name: impl Into<String>) -> Self {
        self.options.operating_system = name.into();
        self
    }

    pub fn arch(mut self, name: impl Into<String>) -> Self {
        self.options.arch = name.into();
        self
    }

    pub fn image_type(mut self, name: impl Into<String>) -> Self {
        self.options.image_type = name.into();
        self
    }

    pub fn timestamp(mut self, time: u32) -> Self {
        self.options.timestamp = time;
        self
    }

    /// Set the image name from text or raw bytes
    pub fn name(mut self, name: impl AsRef<[u8]>) -> Self {
        self.options.image_name = name.as_ref().to_vec();
        self
    }

    /// Build the image around `payload`
    pub fn build(&self, payload: &[u8]) -> Result<Vec<u8>> {
        build_image(payload, &self.options)
    }
}
