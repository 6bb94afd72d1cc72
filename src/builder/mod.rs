mod qr;

pub use qr::{Module, QR};

use crate::common::{
    bitstream::BitStream,
    codec::{encode, Mode},
    ec::ecc,
    error::{QRError, QRResult},
    iter::encoding_region,
    mask::{compute_total_penalty, MaskPattern},
    metadata::{ECLevel, Metadata, Version},
};

pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Version,
    ec_level: ECLevel,
    mode: Mode,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            version: Version::new(2),
            ec_level: ECLevel::M,
            mode: Mode::Byte,
            mask: None,
        }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = version;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn metadata(&self) -> Metadata {
        Metadata::new(self.version, self.ec_level, self.mask)
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }

        // Data codewords, padded out to the full capacity of the version
        let encoded = encode(self.data, self.mode, self.version, self.ec_level)?;

        let total_codewords = self.version.total_codewords();
        let mut payload = BitStream::new(total_codewords << 3);
        payload.extend(encoded.data());
        payload.extend(&ecc(encoded.data(), total_codewords)?);

        let seq = encoding_region(self.version);

        match self.mask {
            Some(mask) => Self::assemble(&payload, &seq, self.version, self.ec_level, mask),
            None => {
                // Score all eight candidates, lowest penalty wins and ties
                // go to the smaller pattern index
                let mut best =
                    Self::assemble(&payload, &seq, self.version, self.ec_level, MaskPattern::new(0))?;
                let mut best_pen = compute_total_penalty(&best);
                for m in 1..8 {
                    let qr =
                        Self::assemble(&payload, &seq, self.version, self.ec_level, MaskPattern::new(m))?;
                    let pen = compute_total_penalty(&qr);
                    if pen < best_pen {
                        best = qr;
                        best_pen = pen;
                    }
                }
                Ok(best)
            }
        }
    }

    // Layering order matters: masked data first, then function patterns,
    // then format info, so fixed cells always win an overlap
    fn assemble(
        payload: &BitStream,
        seq: &[(i16, i16)],
        version: Version,
        ec_level: ECLevel,
        mask: MaskPattern,
    ) -> QRResult<QR> {
        let mut qr = QR::new(version, ec_level, mask);
        qr.draw_data(payload, seq)?;
        qr.draw_all_function_patterns();
        qr.draw_format_info()?;
        Ok(qr)
    }
}

#[cfg(test)]
mod builder_tests {
    use test_case::test_case;

    use super::QRBuilder;
    use crate::common::error::QRError;
    use crate::common::mask::{compute_total_penalty, MaskPattern};
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_build_empty_data() {
        let res = QRBuilder::new(b"").build();
        assert_eq!(res.err(), Some(QRError::EmptyData));
    }

    #[test]
    fn test_build_data_too_long() {
        // Version 1-L in byte mode holds 17 characters
        let res = QRBuilder::new(&[b'a'; 18])
            .version(Version::new(1))
            .ec_level(ECLevel::L)
            .build();
        assert_eq!(res.err(), Some(QRError::DataTooLong));
    }

    #[test_case(Version::new(3), ECLevel::Q)]
    #[test_case(Version::new(4), ECLevel::H)]
    #[test_case(Version::new(5), ECLevel::M)]
    fn test_build_unsupported_pair(version: Version, ec_level: ECLevel) {
        let res = QRBuilder::new(b"hello").version(version).ec_level(ec_level).build();
        assert_eq!(res.err(), Some(QRError::InvalidVersion));
    }

    #[test]
    fn test_build_explicit_mask() {
        let qr = QRBuilder::new(b"A")
            .version(Version::new(2))
            .ec_level(ECLevel::M)
            .mask(MaskPattern::new(3))
            .build()
            .unwrap();
        assert_eq!(qr.mask(), MaskPattern::new(3));
        assert_eq!(qr.width(), 25);
    }

    #[test]
    fn test_auto_mask_beats_or_ties_explicit() {
        let data = b"https://example.com/qr";
        let auto = QRBuilder::new(data).build().unwrap();
        let auto_pen = compute_total_penalty(&auto);
        for m in 0..8 {
            let fixed = QRBuilder::new(data).mask(MaskPattern::new(m)).build().unwrap();
            assert!(
                auto_pen <= compute_total_penalty(&fixed),
                "Mask {m} scored below the chosen mask {}",
                *auto.mask()
            );
        }
    }

    #[test]
    fn test_build_idempotent() {
        let build = || {
            QRBuilder::new(b"idempotence probe")
                .version(Version::new(2))
                .ec_level(ECLevel::M)
                .build()
                .unwrap()
        };
        assert_eq!(build().to_bits(), build().to_bits());
    }

    #[test_case(1, ECLevel::L, 21)]
    #[test_case(2, ECLevel::Q, 25)]
    #[test_case(3, ECLevel::M, 29)]
    #[test_case(4, ECLevel::L, 33)]
    #[test_case(5, ECLevel::L, 37)]
    fn test_build_supported_pairs(version: usize, ec_level: ECLevel, width: usize) {
        let qr = QRBuilder::new(b"ok").version(Version::new(version)).ec_level(ec_level).build().unwrap();
        assert_eq!(qr.width(), width);
    }
}
