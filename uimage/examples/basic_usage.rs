//! Basic usage example for uimage

use uimage::{ImageBuilder, verify_image};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let kernel_data = b"Hello, U-Boot! This is a test kernel image.";

    let image = ImageBuilder::new()
        .arch("ARM64")
        .os("LINUX")
        .image_type("KERNEL")
        .load_address(0x80000)
        .entry_point(0x80000)
        .name("Test Kernel")
        .build(kernel_data)?;

    std::fs::write("test_kernel.uimg", &image)?;
    println!("Created test_kernel.uimg ({} bytes)", image.len());

    let (header, _data) = verify_image(&image)?;
    println!();
    println!("{}", header.summary());

    Ok(())
}
