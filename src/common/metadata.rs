use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::Deref,
};

use super::{
    codec::Mode,
    error::{QRError, QRResult},
    mask::MaskPattern,
    poly,
};

// Color of a module
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Light,
    Dark,
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version(usize);

impl Version {
    pub fn new(version: usize) -> Self {
        debug_assert!((1..=5).contains(&version), "Version must be within 1 and 5: {version}");

        Self(version)
    }

    pub fn width(self) -> usize {
        self.0 * 4 + 17
    }

    pub fn mode_bits(self) -> usize {
        4
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        match self.0 {
            1..=9 => match mode {
                Mode::Numeric => 10,
                Mode::Alphanumeric => 9,
                Mode::Byte => 8,
            },
            10..=26 => match mode {
                Mode::Numeric => 12,
                Mode::Alphanumeric => 11,
                Mode::Byte => 16,
            },
            27..=40 => match mode {
                Mode::Numeric => 14,
                Mode::Alphanumeric => 13,
                Mode::Byte => 16,
            },
            _ => unreachable!("Invalid version: {}", self.0),
        }
    }

    // Spare modules left over in the encoding region after all codewords
    // are placed
    pub fn remainder_bits(self) -> usize {
        match self.0 {
            1 => 0,
            _ => 7,
        }
    }

    pub fn total_codewords(self) -> usize {
        TOTAL_CODEWORDS[self.0 - 1]
    }

    // None marks a version and level pair whose codewords the standard
    // splits across multiple RS blocks, which this crate doesn't cover
    pub fn data_codewords(self, ec_level: ECLevel) -> QRResult<usize> {
        DATA_CODEWORDS[self.0 - 1][ec_level as usize].ok_or(QRError::InvalidVersion)
    }

    pub fn data_bit_capacity(self, ec_level: ECLevel) -> QRResult<usize> {
        Ok(self.data_codewords(ec_level)? << 3)
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_COORDS[self.0 - 1]
    }
}

impl Deref for Version {
    type Target = usize;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod version_tests {
    use test_case::test_case;

    use super::{ECLevel, Version};
    use crate::common::{codec::Mode, error::QRError};

    #[test_case(1, 21)]
    #[test_case(2, 25)]
    #[test_case(3, 29)]
    #[test_case(4, 33)]
    #[test_case(5, 37)]
    fn test_width(version: usize, width: usize) {
        assert_eq!(Version::new(version).width(), width);
    }

    #[test]
    fn test_char_cnt_bits() {
        let ver = Version::new(2);
        assert_eq!(ver.char_cnt_bits(Mode::Numeric), 10);
        assert_eq!(ver.char_cnt_bits(Mode::Alphanumeric), 9);
        assert_eq!(ver.char_cnt_bits(Mode::Byte), 8);
    }

    #[test_case(1, 26)]
    #[test_case(2, 44)]
    #[test_case(3, 70)]
    #[test_case(4, 100)]
    #[test_case(5, 134)]
    fn test_total_codewords(version: usize, total: usize) {
        assert_eq!(Version::new(version).total_codewords(), total);
    }

    #[test_case(1, ECLevel::L, 19)]
    #[test_case(1, ECLevel::M, 16)]
    #[test_case(1, ECLevel::Q, 13)]
    #[test_case(1, ECLevel::H, 9)]
    #[test_case(2, ECLevel::M, 28)]
    #[test_case(3, ECLevel::M, 44)]
    #[test_case(4, ECLevel::L, 80)]
    #[test_case(5, ECLevel::L, 108)]
    fn test_data_codewords(version: usize, ec_level: ECLevel, data: usize) {
        assert_eq!(Version::new(version).data_codewords(ec_level), Ok(data));
    }

    #[test_case(3, ECLevel::Q)]
    #[test_case(4, ECLevel::M)]
    #[test_case(5, ECLevel::H)]
    fn test_data_codewords_multi_block(version: usize, ec_level: ECLevel) {
        assert_eq!(
            Version::new(version).data_codewords(ec_level),
            Err(QRError::InvalidVersion)
        );
    }

    #[test]
    fn test_remainder_bits() {
        assert_eq!(Version::new(1).remainder_bits(), 0);
        assert_eq!(Version::new(2).remainder_bits(), 7);
        assert_eq!(Version::new(5).remainder_bits(), 7);
    }

    #[test]
    fn test_alignment_pattern() {
        assert!(Version::new(1).alignment_pattern().is_empty());
        assert_eq!(Version::new(2).alignment_pattern(), &[6, 18]);
        assert_eq!(Version::new(5).alignment_pattern(), &[6, 30]);
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

// Format information
//------------------------------------------------------------------------------

// 15 bit sequence: 2 level bits and 3 mask bits followed by the 10 bit BCH
// remainder, the whole obscured by FORMAT_MASK
pub fn format_info(ec_level: ECLevel, mask: MaskPattern) -> QRResult<u32> {
    let level_code: u8 = match ec_level {
        ECLevel::L => 0b01,
        ECLevel::M => 0b00,
        ECLevel::Q => 0b11,
        ECLevel::H => 0b10,
    };

    let mut bits = [0u8; FORMAT_INFO_BIT_LEN];
    bits[0] = (level_code >> 1) & 1;
    bits[1] = level_code & 1;
    for i in 0..3 {
        bits[2 + i] = (*mask >> (2 - i)) & 1;
    }

    let rem = poly::remainder(&bits, &FORMAT_DIVISOR)?;

    let mut info = 0;
    for &b in bits[..5].iter().chain(rem.iter()) {
        info = (info << 1) | b as u32;
    }
    Ok(info ^ FORMAT_MASK)
}


// Metadata
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub version: Version,
    pub ec_level: ECLevel,
    pub mask: Option<MaskPattern>,
}

impl Metadata {
    pub fn new(version: Version, ec_level: ECLevel, mask: Option<MaskPattern>) -> Self {
        Self { version, ec_level, mask }
    }
}

impl Display for Metadata {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self.mask {
            Some(m) => {
                write!(f, "{{ Version: {}, Ec level: {:?}, Mask: {} }}", self.version, self.ec_level, *m)
            }
            None => {
                write!(f, "{{ Version: {}, Ec level: {:?}, Mask: None }}", self.version, self.ec_level)
            }
        }
    }
}


// Global constants
//------------------------------------------------------------------------------

pub const MAX_QR_SIZE: usize = 37 * 37;

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub static FORMAT_DIVISOR: [u8; 11] = [1, 0, 1, 0, 0, 1, 1, 0, 1, 1, 1];

pub static FORMAT_MASK: u32 = 0b101010000010010;

pub static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 6),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

static TOTAL_CODEWORDS: [usize; 5] = [26, 44, 70, 100, 134];

static DATA_CODEWORDS: [[Option<usize>; 4]; 5] = [
    [Some(19), Some(16), Some(13), Some(9)],
    [Some(34), Some(28), Some(22), Some(16)],
    [Some(55), Some(44), None, None],
    [Some(80), None, None, None],
    [Some(108), None, None, None],
];

static ALIGNMENT_COORDS: [&[i16]; 5] = [&[], &[6, 18], &[6, 22], &[6, 26], &[6, 30]];
