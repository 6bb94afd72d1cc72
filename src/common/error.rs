use std::fmt::{Debug, Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    EmptyData,
    DataTooLong,
    CapacityOverflow,
    DivisionByZero,
    InvalidVersion,
    InvalidChar,
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            Self::EmptyData => "Empty data",
            Self::DataTooLong => "Data too long",
            Self::CapacityOverflow => "Capacity overflow",
            Self::DivisionByZero => "Division by zero field element",
            Self::InvalidVersion => "Invalid version",
            Self::InvalidChar => "Invalid character",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;
