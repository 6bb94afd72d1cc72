use encoding_rs::mem::{convert_utf8_to_latin1_lossy, is_str_latin1};

use super::{
    bitstream::BitStream,
    error::{QRError, QRResult},
    metadata::{ECLevel, Version},
};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
}

impl Mode {
    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            b'A'..=b'Z' => (char - b'A' + 10) as u16,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            b':' => 44,
            _ => unreachable!("Invalid alphanumeric {char}"),
        }
    }

    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric chunk: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric chunk: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte chunk: {len}");
                data[0] as u16
            }
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => {
                matches!(byte, b'0'..=b'9' | b'A'..=b'Z' | b' ' | b'$' | b'%' | b'*' | b'+' | b'-' | b'.' | b'/' | b':')
            }
            Self::Byte => true,
        }
    }

    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
        }
    }
}


// Segment
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    pub mode: Mode,
    pub mode_bits: usize, // Bit len of mode
    pub len_bits: usize,  // Bit len of char count
    pub data: &'a [u8],   // Reference to raw data
}

impl<'a> Segment<'a> {
    pub fn new(mode: Mode, mode_bits: usize, len_bits: usize, data: &'a [u8]) -> Self {
        Self { mode, mode_bits, len_bits, data }
    }

    pub fn bit_len(&self) -> usize {
        let encoded_bits = self.mode.encoded_len(self.data.len());
        self.mode_bits + self.len_bits + encoded_bits
    }
}


// Encoder
//------------------------------------------------------------------------------

pub fn encode(data: &[u8], mode: Mode, ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
    if data.iter().any(|&b| !mode.contains(b)) {
        return Err(QRError::InvalidChar);
    }

    let bcap = ver.data_bit_capacity(ecl)?;
    let seg = Segment::new(mode, ver.mode_bits(), ver.char_cnt_bits(mode), data);
    if seg.bit_len() > bcap {
        return Err(QRError::DataTooLong);
    }

    let mut bs = BitStream::new(bcap);
    writer::push_segment(seg, &mut bs);
    writer::push_terminator(&mut bs);
    writer::pad_remaining_capacity(&mut bs);
    Ok(bs)
}

// Converts str payloads to the single byte charset byte mode carries
pub fn to_latin1(text: &str) -> QRResult<Vec<u8>> {
    if !is_str_latin1(text) {
        return Err(QRError::InvalidChar);
    }
    let mut out = vec![0; text.len()];
    let len = convert_utf8_to_latin1_lossy(text.as_bytes(), &mut out);
    out.truncate(len);
    Ok(out)
}


// Writer for encoded data
//------------------------------------------------------------------------------

mod writer {
    use super::{Mode, Segment, PADDING_CODEWORDS};
    use crate::common::bitstream::BitStream;

    pub fn push_segment(seg: Segment, out: &mut BitStream) {
        push_header(&seg, out);
        match seg.mode {
            Mode::Numeric => push_numeric_data(seg.data, out),
            Mode::Alphanumeric => push_alphanumeric_data(seg.data, out),
            Mode::Byte => push_byte_data(seg.data, out),
        }
    }

    fn push_header(seg: &Segment, out: &mut BitStream) {
        out.push_bits(seg.mode as u8, seg.mode_bits);
        let char_cnt = seg.data.len();
        debug_assert!(
            char_cnt < (1 << seg.len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {}",
            seg.len_bits
        );
        out.push_bits(char_cnt as u16, seg.len_bits);
    }

    fn push_numeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(3) {
            let len = (chunk.len() * 10).div_ceil(3);
            let data = Mode::Numeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(2) {
            let len = (chunk.len() * 11).div_ceil(2);
            let data = Mode::Alphanumeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    fn push_byte_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(1) {
            let data = Mode::Byte.encode_chunk(chunk);
            out.push_bits(data, 8);
        }
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(
            offset == 0,
            "Bit offset should be zero before padding codewords: {}",
            offset
        );

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

}

// Global constants
//------------------------------------------------------------------------------

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
