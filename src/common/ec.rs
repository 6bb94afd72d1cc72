use super::{error::QRResult, gf, poly};

// Reed-Solomon error correction codeword generator
//------------------------------------------------------------------------------

// Product of (x - alpha^i) for i in 0..degree
pub fn generator_polynomial(degree: usize) -> Vec<u8> {
    let mut gen = vec![1];
    for i in 0..degree {
        gen = poly::multiply(&gen, &[1, gf::exp(i)]);
    }
    gen
}

// Systematic encoding: the data codewords are shifted up by the generator
// degree and the remainder becomes the parity suffix
pub fn ecc(data: &[u8], total_codewords: usize) -> QRResult<Vec<u8>> {
    debug_assert!(
        data.len() < total_codewords,
        "Data codewords exceed total codewords: Data len {}, Total {}",
        data.len(),
        total_codewords
    );

    let degree = total_codewords - data.len();
    let mut message = data.to_vec();
    message.resize(total_codewords, 0);

    poly::remainder(&message, &generator_polynomial(degree))
}
