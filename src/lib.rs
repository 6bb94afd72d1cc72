//! # qrgrid
//!
//! A Rust library for generating monochrome QR code matrices with Reed-Solomon
//! error correction. Supports versions 1 through 5 with numeric, alphanumeric
//! and byte mode encoding.
//!
//! ## Features
//!
//! - **QR Code Generation**: Build QR matrices with customizable versions, error correction levels and masks
//! - **Reed-Solomon Error Correction**: Parity codewords computed over GF(256) with configurable levels (L, M, Q, H)
//! - **Mask Evaluation**: Automatic selection of the lowest-penalty mask pattern when none is specified
//! - **Module Matrix Output**: Render the finished symbol as a boolean grid for any downstream rasterizer
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrgrid::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage - provide only data, all other settings are automatically chosen
//! let qr = QRBuilder::new(b"Hello, World!")
//!     .build()?;
//!
//! let bits = qr.to_bits();
//! assert_eq!(bits.len(), 25);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrgrid::{QRBuilder, ECLevel, MaskPattern, Mode, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = "Hello, World!";
//! let qr = QRBuilder::new(data.as_bytes())
//!     .version(Version::new(2))   // QR version (size) - defaults to version 2
//!     .ec_level(ECLevel::M)       // Error correction level - defaults to ECLevel::M
//!     .mode(Mode::Byte)           // Encoding mode - defaults to Mode::Byte
//!     .mask(MaskPattern::new(3))  // Mask pattern - if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! assert_eq!(qr.width(), 25);
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - **Versions 1-5**: Symbol sides from 21x21 to 37x37 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! Not every level is available at every version; [`QRBuilder::build`] reports
//! unsupported combinations as [`QRError::InvalidVersion`].

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{Module, QRBuilder, QR};
pub use common::codec::{to_latin1, Mode};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Metadata, Version};
