//! Legacy uImage header structure and serialization
//!
//! All fields are stored in network byte order. The layout is fixed:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0      | 4    | magic |
//! | 4      | 4    | header CRC32 |
//! | 8      | 4    | timestamp |
//! | 12     | 4    | data size |
//! | 16     | 4    | load address |
//! | 20     | 4    | entry point |
//! | 24     | 4    | data CRC32 |
//! | 28     | 1    | OS |
//! | 29     | 1    | architecture |
//! | 30     | 1    | image type |
//! | 31     | 1    | compression |
//! | 32     | 32   | name |

use std::io::{Read, Write};

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use chrono::{DateTime, Utc};

use crate::IH_MAGIC;
use crate::crc::calculate_crc32;
use crate::error::{Result, UImageError};
use crate::registry::registries;

/// Maximum length of image name
pub const IH_NMLEN: usize = 32;

/// Size of the serialized header: 7 words, 4 code bytes and the name
pub const IH_HEADER_SIZE: usize = 7 * 4 + 4 + IH_NMLEN;

/// Byte range of the header CRC field
pub const IH_HCRC_RANGE: std::ops::Range<usize> = 4..8;

/// Legacy image header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    /// Magic number (must be IH_MAGIC)
    pub magic: u32,
    /// CRC32 of the header, computed with this field set to zero
    pub hcrc: u32,
    /// Creation timestamp in seconds
    pub time: u32,
    /// Size of the data following the header
    pub size: u32,
    pub load: u32,
    pub ep: u32,
    /// CRC32 of the data following the header
    pub dcrc: u32,
    pub os: u8,
    pub arch: u8,
    pub type_: u8,
    pub comp: u8,
    /// Zero padded name bytes
    pub name: [u8; IH_NMLEN],
}

impl Default for ImageHeader {
    fn default() -> Self {
        Self {
            magic: IH_MAGIC,
            hcrc: 0,
            time: 0,
            size: 0,
            load: 0,
            ep: 0,
            dcrc: 0,
            os: 0,
            arch: 0,
            type_: 0,
            comp: 0,
            name: [0; IH_NMLEN],
        }
    }
}

impl ImageHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image name
    ///
    /// Names longer than [`IH_NMLEN`] bytes are truncated; shorter names are
    /// zero padded.
    pub fn set_name(&mut self, name: impl AsRef<[u8]>) {
        let name = name.as_ref();
        let len = name.len().min(IH_NMLEN);
        self.name = [0; IH_NMLEN];
        self.name[..len].copy_from_slice(&name[..len]);
    }

    /// Name up to the first NUL, lossily decoded
    pub fn name_str(&self) -> String {
        let len = self.name.iter().position(|&b| b == 0).unwrap_or(IH_NMLEN);
        String::from_utf8_lossy(&self.name[..len]).into_owned()
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time as i64, 0)
    }

    /// Check the magic number
    pub fn validate(&self) -> Result<()> {
        if self.magic != IH_MAGIC {
            return Err(UImageError::BadMagic {
                expected: IH_MAGIC,
                found: self.magic,
            });
        }
        Ok(())
    }

    /// Serialize the header to its 64 byte representation
    pub fn to_bytes(&self) -> [u8; IH_HEADER_SIZE] {
        let mut buf = [0u8; IH_HEADER_SIZE];
        BigEndian::write_u32(&mut buf[0..4], self.magic);
        BigEndian::write_u32(&mut buf[4..8], self.hcrc);
        BigEndian::write_u32(&mut buf[8..12], self.time);
        BigEndian::write_u32(&mut buf[12..16], self.size);
        BigEndian::write_u32(&mut buf[16..20], self.load);
        BigEndian::write_u32(&mut buf[20..24], self.ep);
        BigEndian::write_u32(&mut buf[24..28], self.dcrc);
        buf[28] = self.os;
        buf[29] = self.arch;
        buf[30] = self.type_;
        buf[31] = self.comp;
        buf[32..].copy_from_slice(&self.name);
        buf
    }

    /// Write the header to a writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// CRC32 of the serialized header with the CRC field held at zero
    pub fn compute_header_crc(&self) -> u32 {
        let mut bytes = self.to_bytes();
        bytes[IH_HCRC_RANGE].fill(0);
        calculate_crc32(&bytes)
    }

    /// Store the header CRC; every other field must already be final
    pub fn update_header_crc(&mut self) {
        self.hcrc = 0;
        self.hcrc = self.compute_header_crc();
    }

    /// Parse a header from the start of `data`
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < IH_HEADER_SIZE {
            return Err(UImageError::invalid_image_data(format!(
                "header too short: {} bytes (expected at least {})",
                data.len(),
                IH_HEADER_SIZE
            )));
        }

        let mut cursor = std::io::Cursor::new(data);
        let mut header = Self {
            magic: cursor.read_u32::<BigEndian>()?,
            hcrc: cursor.read_u32::<BigEndian>()?,
            time: cursor.read_u32::<BigEndian>()?,
            size: cursor.read_u32::<BigEndian>()?,
            load: cursor.read_u32::<BigEndian>()?,
            ep: cursor.read_u32::<BigEndian>()?,
            dcrc: cursor.read_u32::<BigEndian>()?,
            os: cursor.read_u8()?,
            arch: cursor.read_u8()?,
            type_: cursor.read_u8()?,
            comp: cursor.read_u8()?,
            name: [0; IH_NMLEN],
        };
        cursor.read_exact(&mut header.name)?;

        header.validate()?;
        Ok(header)
    }

    /// Total image size (header + data)
    pub fn total_size(&self) -> usize {
        IH_HEADER_SIZE + self.size as usize
    }

    /// Human readable description of the header
    pub fn summary(&self) -> String {
        let regs = registries();
        let label = |name: Option<&str>, code: u8| match name {
            Some(name) => name.to_string(),
            None => format!("unknown ({code})"),
        };
        let time = match self.timestamp() {
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => format!("{}", self.time),
        };

        format!(
            "Image Name:   {}\n\
             Created:      {}\n\
             Image Type:   {} {} {} ({} compressed)\n\
             Data Size:    {} bytes\n\
             Load Address: 0x{:08x}\n\
             Entry Point:  0x{:08x}\n\
             Header CRC:   0x{:08x}\n\
             Data CRC:     0x{:08x}",
            self.name_str(),
            time,
            label(regs.arch.name_of(self.arch), self.arch),
            label(regs.os.name_of(self.os), self.os),
            label(regs.image_type.name_of(self.type_), self.type_),
            label(regs.compression.name_of(self.comp), self.comp),
            self.size,
            self.load,
            self.ep,
            self.hcrc,
            self.dcrc,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ImageHeader {
        let mut header = ImageHeader::new();
        header.time = 0x6000_0000;
        header.size = 1024;
        header.load = 0x8000;
        header.ep = 0x8040;
        header.dcrc = 0xdead_beef;
        header.os = 5;
        header.arch = 22;
        header.type_ = 2;
        header.set_name("Test");
        header
    }

    #[test]
    fn test_header_size() {
        assert_eq!(IH_HEADER_SIZE, 64);
        assert_eq!(ImageHeader::default().to_bytes().len(), IH_HEADER_SIZE);
    }

    #[test]
    fn test_header_default() {
        let header = ImageHeader::default();
        assert_eq!(header.magic, IH_MAGIC);
        assert_eq!(header.time, 0);
        assert_eq!(header.name_str(), "");
        assert!(header.validate().is_ok());
    }

    #[test]
    fn test_field_offsets() {
        let mut header = sample();
        header.hcrc = 0x0102_0304;
        header.comp = 0;
        let bytes = header.to_bytes();

        assert_eq!(&bytes[0..4], &[0x27, 0x05, 0x19, 0x56]);
        assert_eq!(&bytes[4..8], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(&bytes[8..12], &[0x60, 0x00, 0x00, 0x00]);
        assert_eq!(&bytes[12..16], &1024u32.to_be_bytes());
        assert_eq!(&bytes[16..20], &0x8000u32.to_be_bytes());
        assert_eq!(&bytes[20..24], &0x8040u32.to_be_bytes());
        assert_eq!(&bytes[24..28], &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(&bytes[28..32], &[5, 22, 2, 0]);
        assert_eq!(&bytes[32..36], b"Test");
        assert!(bytes[36..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_to_matches_to_bytes() {
        let mut header = sample();
        header.update_header_crc();
        let mut out = Vec::new();
        header.write_to(&mut out).unwrap();
        assert_eq!(out, header.to_bytes());
    }

    #[test]
    fn test_name_truncation() {
        let mut header = ImageHeader::new();
        header.set_name("A".repeat(IH_NMLEN + 10));
        assert_eq!(header.name, [b'A'; IH_NMLEN]);
        assert_eq!(header.name_str(), "A".repeat(IH_NMLEN));

        // A shorter name clears what was there before.
        header.set_name(b"xy");
        assert_eq!(header.name_str(), "xy");
        assert!(header.name[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_header_crc_ignores_stored_value() {
        let mut header = sample();
        header.update_header_crc();
        let crc = header.hcrc;
        assert_ne!(crc, 0);

        header.hcrc = 0x1234_5678;
        assert_eq!(header.compute_header_crc(), crc);

        let mut bytes = header.to_bytes();
        bytes[4..8].fill(0);
        assert_eq!(calculate_crc32(&bytes), crc);
    }

    #[test]
    fn test_parse_back() {
        let mut header = sample();
        header.update_header_crc();
        let parsed = ImageHeader::from_bytes(&header.to_bytes()).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            ImageHeader::from_bytes(&[0u8; 10]),
            Err(UImageError::InvalidImageData(_))
        ));
        assert!(matches!(
            ImageHeader::from_bytes(&[0u8; IH_HEADER_SIZE]),
            Err(UImageError::BadMagic { found: 0, .. })
        ));
    }

    #[test]
    fn test_header_summary() {
        let mut header = sample();
        header.comp = 99;
        let summary = header.summary();
        assert!(summary.contains("Image Name:   Test"));
        assert!(summary.contains("ARM64 LINUX KERNEL"));
        assert!(summary.contains("unknown (99) compressed"));
        assert!(summary.contains("0x00008000"));
    }

    #[test]
    fn test_total_size() {
        assert_eq!(sample().total_size(), IH_HEADER_SIZE + 1024);
    }
}
