use std::error::Error;

use qrgrid::QRBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    // Simplest usage - provide only data, all other settings are automatically chosen
    let qr = QRBuilder::new(b"Hello, World!").build()?;

    // Print the module grid to the terminal
    for row in qr.to_bits() {
        let line: String = row.iter().map(|&b| if b { "██" } else { "  " }).collect();
        println!("{line}");
    }

    Ok(())
}
