use super::metadata::Version;

// Iterator for traversing the encoding region of a QR
//------------------------------------------------------------------------------
// Walks every cell of the grid in the boustrophedon placement order: two
// column wide strips from the right edge leftwards, alternately upward and
// downward, jumping over the vertical timing column

pub struct EncRegionIter {
    r: i16,
    c: i16,
    width: i16,
}

impl EncRegionIter {
    pub fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        let adjusted_col = if self.c <= VERT_TIMING_COL { self.c + 1 } else { self.c };
        if self.c < 0 {
            return None;
        }
        let res = (self.r, self.c);
        let col_type = (self.width - adjusted_col) % 4;
        match col_type {
            2 if self.r > 0 => {
                self.r -= 1;
                self.c += 1;
            }
            0 if self.r < self.width - 1 => {
                self.r += 1;
                self.c += 1;
            }
            0 | 2 if self.c == VERT_TIMING_COL + 1 => {
                self.c -= 2;
            }
            _ => {
                self.c -= 1;
            }
        }
        Some(res)
    }
}

// Reserved area
//------------------------------------------------------------------------------
// Bitmap of all cells claimed by function patterns and format info, filled
// rectangle by rectangle. Everything left unclaimed is the encoding region

pub struct ReservedArea {
    w: usize,
    map: Vec<bool>,
}

impl ReservedArea {
    pub fn new(version: Version) -> Self {
        let w = version.width();
        let mut area = Self { w, map: vec![false; w * w] };

        // Corner blocks: finder, separator and the format strips hugging them
        area.fill_rect(0, 0, 9, 9);
        area.fill_rect(0, w - 8, 9, 8);
        area.fill_rect(w - 8, 0, 8, 9);

        // Timing lines, full span since the corner blocks already cover the ends
        area.fill_rect(6, 0, 1, w);
        area.fill_rect(0, 6, w, 1);

        if !version.alignment_pattern().is_empty() {
            area.fill_rect(w - 9, w - 9, 5, 5);
        }

        area
    }

    fn fill_rect(&mut self, r: usize, c: usize, height: usize, width: usize) {
        debug_assert!(
            r + height <= self.w && c + width <= self.w,
            "Rect out of bounds: Corner ({r}, {c}), Size {height}x{width}"
        );

        for i in r..r + height {
            let start = i * self.w + c;
            self.map[start..start + width].fill(true);
        }
    }

    pub fn contains(&self, r: i16, c: i16) -> bool {
        debug_assert!(
            (0..self.w as i16).contains(&r) && (0..self.w as i16).contains(&c),
            "Coordinate out of bounds: ({r}, {c})"
        );

        self.map[r as usize * self.w + c as usize]
    }

    pub fn count(&self) -> usize {
        self.map.iter().filter(|&&m| m).count()
    }
}

// Ordered coordinates of every module open to data, zig-zagging from the
// bottom right corner. Pure function of the version, so one sequence serves
// all mask candidates
pub fn encoding_region(version: Version) -> Vec<(i16, i16)> {
    let reserved = ReservedArea::new(version);
    EncRegionIter::new(version).filter(|&(r, c)| !reserved.contains(r, c)).collect()
}

#[cfg(test)]
mod iter_tests {
    use std::collections::HashSet;

    use test_case::test_case;

    use super::{encoding_region, EncRegionIter, ReservedArea};
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_enc_region_iter_covers_grid() {
        // Every column except the vertical timing line, each exactly once
        for v in 1..=5 {
            let version = Version::new(v);
            let w = version.width();
            let coords = EncRegionIter::new(version).collect::<Vec<_>>();
            assert_eq!(coords.len(), w * (w - 1));
            let unique = coords.iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), w * (w - 1));
            assert!(coords.iter().all(|&(r, c)| {
                (0..w as i16).contains(&r) && (0..w as i16).contains(&c) && c != 6
            }));
        }
    }

    #[test]
    fn test_enc_region_iter_order() {
        let coords = EncRegionIter::new(Version::new(2)).collect::<Vec<_>>();
        assert_eq!(&coords[..4], &[(24, 24), (24, 23), (23, 24), (23, 23)]);
    }

    #[test_case(1, 233)]
    #[test_case(2, 266)]
    #[test_case(3, 274)]
    #[test_case(4, 282)]
    #[test_case(5, 290)]
    fn test_reserved_area_count(version: usize, reserved: usize) {
        assert_eq!(ReservedArea::new(Version::new(version)).count(), reserved);
    }

    #[test_case(1)]
    #[test_case(2)]
    #[test_case(3)]
    #[test_case(4)]
    #[test_case(5)]
    fn test_encoding_region_len(version: usize) {
        let ver = Version::new(version);
        let seq = encoding_region(ver);
        let exp_len = (ver.total_codewords() << 3) + ver.remainder_bits();
        assert_eq!(seq.len(), exp_len);
        let w = ver.width();
        assert_eq!(seq.len(), w * w - ReservedArea::new(ver).count());
    }

    #[test]
    fn test_encoding_region_no_duplicates() {
        let seq = encoding_region(Version::new(2));
        let unique = seq.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), seq.len());
    }

    #[test]
    fn test_encoding_region_skips_reserved() {
        let ver = Version::new(2);
        let reserved = ReservedArea::new(ver);
        let seq = encoding_region(ver);
        assert!(seq.iter().all(|&(r, c)| !reserved.contains(r, c)));
    }

    #[test]
    fn test_encoding_region_fits_codewords() {
        // One data bit per coordinate, leftovers are the remainder modules
        let ver = Version::new(2);
        let ecl = ECLevel::M;
        let data_bits = ver.data_bit_capacity(ecl).unwrap();
        let total_bits = ver.total_codewords() << 3;
        let seq = encoding_region(ver);
        assert!(data_bits <= total_bits);
        assert_eq!(seq.len() - total_bits, ver.remainder_bits());
    }
}

// Global constants
//------------------------------------------------------------------------------

const VERT_TIMING_COL: i16 = 6;
