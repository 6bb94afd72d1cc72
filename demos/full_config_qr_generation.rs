use std::error::Error;

use qrgrid::{ECLevel, MaskPattern, Mode, QRBuilder, Version};

fn main() -> Result<(), Box<dyn Error>> {
    let data = "All available configuration options for QR code generation.";

    let qr = QRBuilder::new(data.as_bytes())
        .version(Version::new(4))     // QR version (size) - if not provided, defaults to version 2
        .ec_level(ECLevel::L)         // Error correction level - if not provided, defaults to ECLevel::M
        .mode(Mode::Byte)             // Encoding mode - if not provided, defaults to Mode::Byte
        .mask(MaskPattern::new(2))    // Mask pattern - if not provided, finds best mask based on penalty score
        .build()?;

    for row in qr.to_bits() {
        let line: String = row.iter().map(|&b| if b { "██" } else { "  " }).collect();
        println!("{line}");
    }

    println!("QR metadata: {}", qr.metadata());

    Ok(())
}
