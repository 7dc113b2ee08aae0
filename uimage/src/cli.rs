//! Command line interface for uimage

use std::path::PathBuf;

use clap::Parser;
use clap::builder::{PossibleValue, PossibleValuesParser};
use log::{LevelFilter, debug, info, warn};

use crate::VERSION;
use crate::builder::{ImageOptions, build_image};
use crate::error::{Result, UImageError};
use crate::image_types::IH_TYPE_MULTI;
use crate::multi::pack_multi;
use crate::registry::{OptionRegistry, registries};

/// Command line arguments for uimage
#[derive(Parser, Debug)]
#[command(name = "uimage")]
#[command(version = VERSION)]
#[command(about = "Wrap a binary in a legacy U-Boot image header", long_about = None)]
pub struct Args {
    /// Path to file to wrap
    #[arg(value_parser = parse_path)]
    pub filepath: PathBuf,

    /// Address to load image at
    #[arg(short = 'l', long, value_parser = parse_address, default_value = "0")]
    pub load_address: u32,

    /// Address to set instruction pointer to
    #[arg(short = 'e', long, value_parser = parse_address, default_value = "0")]
    pub entrypoint: u32,

    #[arg(short = 's', long, default_value = "LINUX", value_parser = option_parser(&registries().os))]
    pub operating_system: String,

    #[arg(short = 'a', long, default_value = "X86_64", value_parser = option_parser(&registries().arch))]
    pub architecture: String,

    #[arg(short = 'i', long, default_value = "KERNEL", value_parser = option_parser(&registries().image_type))]
    pub image_type: String,

    #[arg(short = 'c', long, default_value = "NONE", value_parser = option_parser(&registries().compression))]
    pub compression: String,

    /// Creation timestamp in seconds
    #[arg(short = 't', long, default_value_t = 0)]
    pub timestamp: u32,

    #[arg(short = 'n', long, default_value = "")]
    pub image_name: String,

    /// Additional files; the payload becomes a multi-file image body
    #[arg(short = 'm', long = "multi", value_parser = parse_path)]
    pub multi: Vec<PathBuf>,

    /// Build the image but do not write it
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Log every header field
    #[arg(long)]
    pub debug: bool,

    /// Path to output to
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Header options selected on the command line
    pub fn image_options(&self) -> ImageOptions {
        ImageOptions {
            entrypoint: self.entrypoint,
            load_address: self.load_address,
            compression: self.compression.clone(),
            operating_system: self.operating_system.clone(),
            arch: self.architecture.clone(),
            image_type: self.image_type.clone(),
            timestamp: self.timestamp,
            image_name: self.image_name.as_bytes().to_vec(),
        }
    }
}

/// Choices of a registry; the lower-case aliases are accepted but not listed
fn option_parser(registry: &'static OptionRegistry) -> PossibleValuesParser {
    let mut values = Vec::new();
    for name in registry.option_names() {
        let alias = name.bytes().any(|b| b.is_ascii_lowercase());
        values.push(PossibleValue::new(name).hide(alias));
    }
    PossibleValuesParser::new(values)
}

/// Parse an integer literal with an optional radix prefix
///
/// `0x`, `0o` and `0b` select the radix, anything else is decimal. A decimal
/// literal may not start with `0` unless its value is zero, and a single `_`
/// may separate digits or follow the prefix.
pub fn parse_address(s: &str) -> Result<u32> {
    let invalid = |reason: String| UImageError::InvalidNumber {
        input: s.to_string(),
        reason,
    };

    let trimmed = s.trim();
    let (digits, radix) = match trimmed.get(..2) {
        Some("0x" | "0X") => (&trimmed[2..], 16),
        Some("0o" | "0O") => (&trimmed[2..], 8),
        Some("0b" | "0B") => (&trimmed[2..], 2),
        _ => (trimmed, 10),
    };
    let digits = match radix {
        10 => digits,
        _ => digits.strip_prefix('_').unwrap_or(digits),
    };

    if digits.is_empty() {
        return Err(invalid("no digits".to_string()));
    }
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err(invalid("misplaced underscore".to_string()));
    }
    let cleaned = digits.replace('_', "");
    if !cleaned.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(invalid("invalid digit found in string".to_string()));
    }
    if radix == 10 && cleaned.starts_with('0') && cleaned.bytes().any(|b| b != b'0') {
        return Err(invalid("leading zeros in decimal literal".to_string()));
    }

    u32::from_str_radix(&cleaned, radix)
        .map_err(|e| invalid(e.to_string()))
}

/// Expand a leading `~` to the home directory
fn parse_path(s: &str) -> std::result::Result<PathBuf, std::convert::Infallible> {
    let home = std::env::var_os("HOME");
    let path = match (s.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            PathBuf::from(home).join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(s),
    };
    Ok(path)
}

/// Install the stderr logger; `--debug` raises the level to debug
pub fn init_logger(debug: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn).parse_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

/// Read the payload, build the image and write it unless in dry-run mode
///
/// Returns the built image.
pub fn run_cli(args: Args) -> Result<Vec<u8>> {
    debug!("{args:?}");

    if !args.multi.is_empty() {
        let type_ = registries().image_type.resolve(&args.image_type)?;
        if type_ != IH_TYPE_MULTI {
            return Err(UImageError::InvalidArgument(format!(
                "--multi needs image type MULTI, got {}",
                args.image_type
            )));
        }
    }

    let mut payload = std::fs::read(&args.filepath)?;
    if !args.multi.is_empty() {
        let mut parts = vec![payload];
        for path in &args.multi {
            parts.push(std::fs::read(path)?);
        }
        payload = pack_multi(&parts)?;
        info!("packed {} files into a multi-file payload", parts.len());
    }

    let image = build_image(&payload, &args.image_options())?;

    match (&args.output, args.dry_run) {
        (Some(output), false) => {
            std::fs::write(output, &image)?;
            info!("wrote {} bytes to {}", image.len(), output.display());
        }
        (Some(output), true) => {
            info!("dry run, not writing {}", output.display());
        }
        (None, _) => {
            warn!("no output path given, image not written");
        }
    }

    Ok(image)
}
