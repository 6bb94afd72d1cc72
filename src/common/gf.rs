use std::sync::LazyLock;

use super::error::{QRError, QRResult};

// Galois field GF(256) arithmetic
//------------------------------------------------------------------------------

struct Tables {
    log: [u8; 256],
    exp: [u8; 256],
}

// Built on first use, read only afterwards. log[0] is unused because 0 has
// no discrete log
static TABLES: LazyLock<Tables> = LazyLock::new(|| {
    let mut log = [0u8; 256];
    let mut exp = [0u8; 256];

    let mut val: u16 = 1;
    for exponent in 1..=255usize {
        val <<= 1;
        if val > 0xFF {
            val ^= PRIMITIVE_POLYNOMIAL;
        }
        exp[exponent % 255] = val as u8;
        log[val as usize] = (exponent % 255) as u8;
    }

    Tables { log, exp }
});

pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

pub fn sub(a: u8, b: u8) -> u8 {
    a ^ b
}

pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let tables = &*TABLES;
    let log_sum = (tables.log[a as usize] as usize + tables.log[b as usize] as usize) % 255;
    tables.exp[log_sum]
}

pub fn div(a: u8, b: u8) -> QRResult<u8> {
    if b == 0 {
        return Err(QRError::DivisionByZero);
    }
    if a == 0 {
        return Ok(0);
    }
    let tables = &*TABLES;
    let log_diff = (tables.log[a as usize] as usize + 255 - tables.log[b as usize] as usize) % 255;
    Ok(tables.exp[log_diff])
}

// Alpha raised to the given exponent, wrapping at the multiplicative order
pub fn exp(exponent: usize) -> u8 {
    TABLES.exp[exponent % 255]
}


// Global constants
//------------------------------------------------------------------------------

const PRIMITIVE_POLYNOMIAL: u16 = 0x11D;
