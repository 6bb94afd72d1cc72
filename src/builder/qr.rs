use std::ops::Deref;

use crate::common::{
    bitstream::BitStream,
    error::{QRError, QRResult},
    mask::MaskPattern,
    metadata::{
        format_info, Color, ECLevel, Metadata, Version, FORMAT_INFO_BIT_LEN,
        FORMAT_INFO_COORDS_MAIN, FORMAT_INFO_COORDS_SIDE, MAX_QR_SIZE,
    },
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QR {
    grid: Box<[Module; MAX_QR_SIZE]>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: MaskPattern,
}

// QR symbol grid
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version, ecl: ECLevel, mask: MaskPattern) -> Self {
        let w = ver.width();
        Self { grid: Box::new([Module::Empty; MAX_QR_SIZE]), w, ver, ecl, mask }
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn metadata(&self) -> Metadata {
        Metadata::new(self.ver, self.ecl, Some(self.mask))
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    // Row major dark/light grid, the handoff format for renderers
    pub fn to_bits(&self) -> Vec<Vec<bool>> {
        let w = self.w as i16;
        (0..w)
            .map(|r| (0..w).map(|c| matches!(*self.get(r, c), Color::Dark)).collect())
            .collect()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "Row out of bounds: {r}");
        debug_assert!(-w <= c && c < w, "Column out of bounds: {c}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }
}

#[cfg(test)]
mod qr_util_tests {
    use crate::builder::{Module, QR};
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{Color, ECLevel, Version};

    fn blank_qr() -> QR {
        QR::new(Version::new(1), ECLevel::L, MaskPattern::new(0))
    }

    #[test]
    fn test_index_wrap() {
        let mut qr = blank_qr();
        let w = qr.w as i16;
        qr.set(-1, -1, Module::Func(Color::Dark));
        assert_eq!(qr.get(w - 1, w - 1), Module::Func(Color::Dark));
        qr.set(0, 0, Module::Func(Color::Dark));
        assert_eq!(qr.get(-w, -w), Module::Func(Color::Dark));
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_bound() {
        let qr = blank_qr();
        let w = qr.w as i16;
        qr.get(w, 0);
    }

    #[test]
    #[should_panic]
    fn test_col_out_of_bound() {
        let qr = blank_qr();
        let w = qr.w as i16;
        qr.get(0, w);
    }

    #[test]
    #[should_panic]
    fn test_row_index_overwrap() {
        let qr = blank_qr();
        let w = qr.w as i16;
        qr.get(-(w + 1), 0);
    }

    #[test]
    #[should_panic]
    fn test_col_index_overwrap() {
        let qr = blank_qr();
        let w = qr.w as i16;
        qr.get(0, -(w + 1));
    }

    #[test]
    fn test_empty_module_reads_light() {
        let qr = blank_qr();
        assert_eq!(*qr.get(10, 10), Color::Light);
        assert_eq!(qr.count_dark_modules(), 0);
    }

    #[test]
    fn test_to_bits_dimensions() {
        let qr = QR::new(Version::new(3), ECLevel::L, MaskPattern::new(0));
        let bits = qr.to_bits();
        assert_eq!(bits.len(), 29);
        assert!(bits.iter().all(|row| row.len() == 29));
        assert!(bits.iter().flatten().all(|&b| !b));
    }

    #[test]
    fn test_qr_metadata() {
        let qr = QR::new(Version::new(2), ECLevel::M, MaskPattern::new(5));
        let meta = qr.metadata();
        assert_eq!(meta.version, Version::new(2));
        assert_eq!(meta.ec_level, ECLevel::M);
        assert_eq!(meta.mask, Some(MaskPattern::new(5)));
        assert_eq!(meta.to_string(), "{ Version: 2, Ec level: M, Mask: 5 }");
    }
}

// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Concentric 7x7, 5x5 and 3x3 squares around the center, with the
    // separator strip folded into the 8x8 block on the interior side
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let rows = if r > 0 { -3..=4 } else { -4..=3 };
        let cols = if c > 0 { -3..=4 } else { -4..=3 };
        for i in rows {
            for j in cols.clone() {
                let module = match (i, j) {
                    (4 | -4, _) | (_, 4 | -4) => Module::Func(Color::Light),
                    (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                    (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                    _ => Module::Func(Color::Dark),
                };
                self.set(r + i, c + j, module);
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_patterns(&mut self) {
        let last = self.w as i16 - 9;
        self.draw_line(6, 8, 6, last);
        self.draw_line(8, 6, last, 6);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                let m =
                    if j & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
                self.set(r1, j, m);
            }
        } else {
            for i in r1..=r2 {
                let m =
                    if i & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
                self.set(i, c1, m);
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r, c);
            }
        }
    }

    // Centers colliding with a finder pattern are skipped, which leaves a
    // single pattern near the bottom right for the versions covered here
    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.w as i16;
        if (r == 6 && (c == 6 || c - w == -7)) || (r - w == -7 && c == 6) {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                let module = match (i, j) {
                    (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                    _ => Module::Func(Color::Light),
                };
                self.set(r + i, c + j, module);
            }
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_patterns();
        self.draw_alignment_patterns();
        self.set(-8, 8, Module::Func(Color::Dark));
    }
}


// Format info
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_format_info(&mut self) -> QRResult<()> {
        let info = format_info(self.ecl, self.mask)?;
        self.draw_number(info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_MAIN);
        self.draw_number(info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_SIDE);
        Ok(())
    }

    fn draw_number(&mut self, number: u32, bit_len: usize, coords: &[(i16, i16)]) {
        let mut bit = 1u32 << (bit_len - 1);
        for &(r, c) in coords {
            let clr = if number & bit == 0 { Color::Light } else { Color::Dark };
            self.set(r, c, Module::Format(clr));
            bit >>= 1;
        }
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QR {
    // Writes the payload bit by bit along the placement sequence, masking
    // each bit as it lands. Spare modules at the tail of the sequence are
    // the remainder bits and stay light
    pub fn draw_data(&mut self, payload: &BitStream, seq: &[(i16, i16)]) -> QRResult<()> {
        if payload.len() > seq.len() {
            return Err(QRError::CapacityOverflow);
        }
        debug_assert!(
            seq.len() - payload.len() == self.ver.remainder_bits(),
            "Leftover modules {} don't match remainder bits {}",
            seq.len() - payload.len(),
            self.ver.remainder_bits()
        );

        let mask_fn = self.mask.mask_functions();
        let data = payload.data();
        for (i, &(r, c)) in seq.iter().enumerate() {
            let clr = if i < payload.len() {
                let bit = (data[i >> 3] >> (7 - (i & 7))) & 1 == 1;
                if bit ^ mask_fn(r, c) {
                    Color::Dark
                } else {
                    Color::Light
                }
            } else {
                Color::Light
            };
            self.set(r, c, Module::Data(clr));
        }
        Ok(())
    }
}

#[cfg(test)]
mod encoding_region_tests {
    use crate::builder::{Module, QR};
    use crate::common::bitstream::BitStream;
    use crate::common::error::QRError;
    use crate::common::iter::encoding_region;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{Color, ECLevel, Version};

    #[test]
    fn test_draw_data_applies_mask() {
        let ver = Version::new(1);
        let mut qr = QR::new(ver, ECLevel::L, MaskPattern::new(0));
        let mut payload = BitStream::new(ver.total_codewords() << 3);
        payload.extend(&[0u8; 26]);
        let seq = encoding_region(ver);
        qr.draw_data(&payload, &seq).unwrap();
        // Zero bits under the checkerboard mask come out dark wherever the
        // formula holds
        for &(r, c) in &seq {
            let exp = if (r + c) & 1 == 0 { Color::Dark } else { Color::Light };
            assert_eq!(qr.get(r, c), Module::Data(exp), "Mismatch at ({r}, {c})");
        }
    }

    #[test]
    fn test_draw_data_unmasks_to_original_bits() {
        let ver = Version::new(1);
        let mask = MaskPattern::new(5);
        let mut qr = QR::new(ver, ECLevel::L, mask);
        let bytes = (0..26).map(|i| (i * 37) as u8).collect::<Vec<_>>();
        let mut payload = BitStream::new(ver.total_codewords() << 3);
        payload.extend(&bytes);
        let seq = encoding_region(ver);
        qr.draw_data(&payload, &seq).unwrap();

        // Applying the formula a second time recovers the payload
        let mask_fn = mask.mask_functions();
        let mut recovered = vec![0u8; 26];
        for (i, &(r, c)) in seq.iter().enumerate() {
            let dark = matches!(*qr.get(r, c), Color::Dark);
            if dark ^ mask_fn(r, c) {
                recovered[i >> 3] |= 1 << (7 - (i & 7));
            }
        }
        assert_eq!(recovered, bytes);
    }

    #[test]
    fn test_draw_data_capacity_overflow() {
        let ver = Version::new(1);
        let mut qr = QR::new(ver, ECLevel::L, MaskPattern::new(0));
        let mut payload = BitStream::new(27 << 3);
        payload.extend(&[0u8; 27]);
        let seq = encoding_region(ver);
        assert_eq!(qr.draw_data(&payload, &seq), Err(QRError::CapacityOverflow));
    }

    #[test]
    fn test_draw_data_remainder_modules_stay_light() {
        let ver = Version::new(2);
        let mut qr = QR::new(ver, ECLevel::M, MaskPattern::new(3));
        let mut payload = BitStream::new(ver.total_codewords() << 3);
        payload.extend(&[0xFF; 44]);
        let seq = encoding_region(ver);
        qr.draw_data(&payload, &seq).unwrap();
        for &(r, c) in &seq[352..] {
            assert_eq!(qr.get(r, c), Module::Data(Color::Light));
        }
    }

    #[test]
    fn test_function_patterns_overwrite_nothing_in_sequence() {
        let ver = Version::new(2);
        let mut qr = QR::new(ver, ECLevel::M, MaskPattern::new(0));
        let mut payload = BitStream::new(ver.total_codewords() << 3);
        payload.extend(&[0b1010_1010; 44]);
        let seq = encoding_region(ver);
        qr.draw_data(&payload, &seq).unwrap();
        let before = seq.iter().map(|&(r, c)| qr.get(r, c)).collect::<Vec<_>>();
        qr.draw_all_function_patterns();
        qr.draw_format_info().unwrap();
        let after = seq.iter().map(|&(r, c)| qr.get(r, c)).collect::<Vec<_>>();
        assert_eq!(before, after);
    }
}
