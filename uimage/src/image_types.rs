//! Code tables for the uImage header
//!
//! Every table maps a symbolic name to the position it occupies. The
//! positions are written into images and read by bootloaders, so new
//! names MUST be appended at the end of a table and NEVER inserted.

/// An ordered, append-only list of symbolic names sharing one prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeTable {
    /// Human readable axis name used in diagnostics
    pub kind: &'static str,
    /// Prefix every entry carries, e.g. `IH_OS_`
    pub prefix: &'static str,
    /// Entries in code order; index 0 is the `INVALID`/`NONE` sentinel
    pub entries: &'static [&'static str],
}

impl CodeTable {
    /// Number of codes defined by the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry name without its prefix for the given code
    pub fn short_name(&self, code: u8) -> Option<&'static str> {
        self.entries
            .get(code as usize)
            .map(|&entry| entry.strip_prefix(self.prefix).unwrap_or(entry))
    }

    /// Iterate `(short_name, code)` pairs in code order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        self.entries.iter().enumerate().map(|(code, &entry)| {
            let name = entry.strip_prefix(self.prefix).unwrap_or(entry);
            (name, code as u8)
        })
    }
}

/// Operating system codes
pub static OS_TABLE: CodeTable = CodeTable {
    kind: "operating system",
    prefix: "IH_OS_",
    entries: &[
        "IH_OS_INVALID",
        "IH_OS_OPENBSD",
        "IH_OS_NETBSD",
        "IH_OS_FREEBSD",
        "IH_OS_4_4BSD",
        "IH_OS_LINUX",
        "IH_OS_SVR4",
        "IH_OS_ESIX",
        "IH_OS_SOLARIS",
        "IH_OS_IRIX",
        "IH_OS_SCO",
        "IH_OS_DELL",
        "IH_OS_NCR",
        "IH_OS_LYNXOS",
        "IH_OS_VXWORKS",
        "IH_OS_PSOS",
        "IH_OS_QNX",
        "IH_OS_U_BOOT",
        "IH_OS_RTEMS",
        "IH_OS_ARTOS",
        "IH_OS_UNITY",
        "IH_OS_INTEGRITY",
        "IH_OS_OSE",
        "IH_OS_PLAN9",
        "IH_OS_OPENRTOS",
        "IH_OS_ARM_TRUSTED_FIRMWARE",
        "IH_OS_TEE",
        "IH_OS_OPENSBI",
        "IH_OS_EFI",
    ],
};

/// CPU architecture codes
pub static ARCH_TABLE: CodeTable = CodeTable {
    kind: "architecture",
    prefix: "IH_ARCH_",
    entries: &[
        "IH_ARCH_INVALID",
        "IH_ARCH_ALPHA",
        "IH_ARCH_ARM",
        "IH_ARCH_I386",
        "IH_ARCH_IA64",
        "IH_ARCH_MIPS",
        "IH_ARCH_MIPS64",
        "IH_ARCH_PPC",
        "IH_ARCH_S390",
        "IH_ARCH_SH",
        "IH_ARCH_SPARC",
        "IH_ARCH_SPARC64",
        "IH_ARCH_M68K",
        "IH_ARCH_NIOS",
        "IH_ARCH_MICROBLAZE",
        "IH_ARCH_NIOS2",
        "IH_ARCH_BLACKFIN",
        "IH_ARCH_AVR32",
        "IH_ARCH_ST200",
        "IH_ARCH_SANDBOX",
        "IH_ARCH_NDS32",
        "IH_ARCH_OPENRISC",
        "IH_ARCH_ARM64",
        "IH_ARCH_ARC",
        "IH_ARCH_X86_64",
        "IH_ARCH_XTENSA",
        "IH_ARCH_RISCV",
    ],
};

/// Image type codes
///
/// `MULTI` images carry a list of big-endian sub-image sizes terminated by
/// a zero word, followed by the sub-images, each padded to 4 bytes except
/// the last. See [`crate::multi`].
pub static IMAGE_TYPE_TABLE: CodeTable = CodeTable {
    kind: "image type",
    prefix: "IH_TYPE_",
    entries: &[
        "IH_TYPE_INVALID",
        "IH_TYPE_STANDALONE",
        "IH_TYPE_KERNEL",
        "IH_TYPE_RAMDISK",
        "IH_TYPE_MULTI",
        "IH_TYPE_FIRMWARE",
        "IH_TYPE_SCRIPT",
        "IH_TYPE_FILESYSTEM",
        "IH_TYPE_FLATDT",
        "IH_TYPE_KWBIMAGE",
        "IH_TYPE_IMXIMAGE",
        "IH_TYPE_UBLIMAGE",
        "IH_TYPE_OMAPIMAGE",
        "IH_TYPE_AISIMAGE",
        "IH_TYPE_KERNEL_NOLOAD",
        "IH_TYPE_PBLIMAGE",
        "IH_TYPE_MXSIMAGE",
        "IH_TYPE_GPIMAGE",
        "IH_TYPE_ATMELIMAGE",
        "IH_TYPE_SOCFPGAIMAGE",
        "IH_TYPE_X86_SETUP",
        "IH_TYPE_LPC32XXIMAGE",
        "IH_TYPE_LOADABLE",
        "IH_TYPE_RKIMAGE",
        "IH_TYPE_RKSD",
        "IH_TYPE_RKSPI",
        "IH_TYPE_ZYNQIMAGE",
        "IH_TYPE_ZYNQMPIMAGE",
        "IH_TYPE_ZYNQMPBIF",
        "IH_TYPE_FPGA",
        "IH_TYPE_VYBRIDIMAGE",
        "IH_TYPE_TEE",
        "IH_TYPE_FIRMWARE_IVT",
        "IH_TYPE_PMMC",
        "IH_TYPE_STM32IMAGE",
        "IH_TYPE_SOCFPGAIMAGE_V1",
        "IH_TYPE_MTKIMAGE",
        "IH_TYPE_IMX8MIMAGE",
        "IH_TYPE_IMX8IMAGE",
        "IH_TYPE_COPRO",
        "IH_TYPE_SUNXI_EGON",
        "IH_TYPE_SUNXI_TOC0",
        "IH_TYPE_FDT_LEGACY",
        "IH_TYPE_RENESAS_SPKG",
    ],
};

/// Compression codes
pub static COMPRESSION_TABLE: CodeTable = CodeTable {
    kind: "compression",
    prefix: "IH_COMP_",
    entries: &[
        "IH_COMP_NONE",
        "IH_COMP_GZIP",
        "IH_COMP_BZIP2",
        "IH_COMP_LZMA",
        "IH_COMP_LZO",
        "IH_COMP_LZ4",
        "IH_COMP_ZSTD",
    ],
};

/// Code of the identity compression transform
pub const IH_COMP_NONE: u8 = 0;

/// Code of the multi-file image type
pub const IH_TYPE_MULTI: u8 = 4;
