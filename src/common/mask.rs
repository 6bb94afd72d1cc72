use std::ops::Deref;

use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> Self {
        debug_assert!(pattern < 8, "Invalid masking pattern");
        Self(pattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        debug_assert!(*self < 8, "Invalid pattern");

        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!(),
        }
    }
}

// Penalty scoring
//------------------------------------------------------------------------------
// Four rules scored on the finished symbol: runs of same colored modules,
// solid 2x2 blocks, false finder patterns next to a 4 module light flank,
// and deviation of the dark module share from 50 percent

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen_h = compute_finder_pattern_penalty(qr, true);
    let fp_pen_v = compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// Scores 3 when a run of same colored modules reaches 5, and 1 more for
// every module beyond that
fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width();
    let mut cols = vec![(Color::Light, 0u32); w];
    for r in 0..w {
        let mut last = Color::Light;
        let mut row_run = 0u32;
        for (c, col) in cols.iter_mut().enumerate() {
            let clr = *qr.get(r as i16, c as i16);
            if last != clr {
                last = clr;
                row_run = 0;
            }
            row_run += 1;
            if row_run == 5 {
                pen += 3;
            } else if row_run > 5 {
                pen += 1;
            }
            if col.0 != clr {
                col.0 = clr;
                col.1 = 0;
            }
            col.1 += 1;
            if col.1 == 5 {
                pen += 3;
            } else if col.1 > 5 {
                pen += 1;
            }
        }
    }
    pen
}

fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// Scores 40 per 1011101 run flanked by 4 light modules on either side. The
// quiet zone beyond the edges counts as light
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];
    for i in 0..w {
        let get = |x: i16| if is_hor { *qr.get(i, x) } else { *qr.get(x, i) };
        for j in 0..w - 6 {
            if (j..j + 7).map(get).eq(PATTERN.iter().copied()) {
                let is_light = |x: i16| x < 0 || x >= w || get(x) == Color::Light;
                if (j - 4..j).all(is_light) || (j + 7..j + 11).all(is_light) {
                    pen += 40;
                }
            }
        }
    }
    pen
}

fn compute_balance_penalty(qr: &QR) -> u32 {
    let w = qr.width();
    let dark_cnt = qr.count_dark_modules();
    let percent = dark_cnt * 100 / (w * w);
    let deviation = if percent < 50 { 50 - percent } else { percent - 50 };
    (deviation / 5 * 10) as u32
}
