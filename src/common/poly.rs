use super::{error::QRResult, gf};

// Polynomial arithmetic over GF(256)
//------------------------------------------------------------------------------
// Coefficients are ordered most significant first. Leading zeros are
// tolerated in either operand

pub fn multiply(p1: &[u8], p2: &[u8]) -> Vec<u8> {
    debug_assert!(!p1.is_empty() && !p2.is_empty(), "Multiplying empty polynomial");

    let mut product = vec![0; p1.len() + p2.len() - 1];
    for (i, &a) in p1.iter().enumerate() {
        for (j, &b) in p2.iter().enumerate() {
            product[i + j] = gf::add(product[i + j], gf::mul(a, b));
        }
    }
    product
}

// Long division discarding the quotient. The result always has exactly
// divisor length - 1 coefficients, left padded with zeros if the dividend
// is short
pub fn remainder(dividend: &[u8], divisor: &[u8]) -> QRResult<Vec<u8>> {
    debug_assert!(!divisor.is_empty(), "Dividing by empty polynomial");

    let steps = (dividend.len() + 1).saturating_sub(divisor.len());
    let mut work = dividend.to_vec();

    for i in 0..steps {
        let lead = work[i];
        if lead == 0 {
            continue;
        }
        let factor = gf::div(lead, divisor[0])?;
        for (w, &d) in work[i..].iter_mut().zip(divisor.iter()) {
            *w = gf::sub(*w, gf::mul(d, factor));
        }
    }

    let rem_len = divisor.len() - 1;
    if work.len() < rem_len {
        let mut rem = vec![0; rem_len - work.len()];
        rem.extend_from_slice(&work);
        return Ok(rem);
    }
    Ok(work.split_off(work.len() - rem_len))
}
