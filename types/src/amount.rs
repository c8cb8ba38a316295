//! Microlumen / lumen unit conversion.
//!
//! Amounts travel on the wire as integer microlumens. The conversion helpers
//! bound values to 2^53 - 1 so that amounts survive round-trips through
//! clients whose number type only carries 53 bits of integer precision.

use thiserror::Error;

/// Number of microlumens in one lumen.
pub const MICROLUMENS_PER_LUMEN: u64 = 1_000_000;

/// Largest representable microlumen amount (2^53 - 1).
pub const MAX_MICROLUMENS: u64 = (1u64 << 53) - 1;

/// Errors arising from unit conversion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("microlumen amount must be positive and less than 2^53 - 1")]
    InvalidMicrolumenAmount,
}

/// Convert integer microlumens to a fractional lumen amount.
///
/// Rejects negative values and values above `MAX_MICROLUMENS`.
pub fn microlumens_to_lumens(microlumens: i64) -> Result<f64, AmountError> {
    if microlumens < 0 || microlumens as u64 > MAX_MICROLUMENS {
        return Err(AmountError::InvalidMicrolumenAmount);
    }
    Ok(microlumens as f64 / MICROLUMENS_PER_LUMEN as f64)
}

/// Convert a fractional lumen amount to integer microlumens, rounding to the
/// nearest microlumen.
///
/// Rejects negative, non-finite, and out-of-range values.
pub fn lumens_to_microlumens(lumens: f64) -> Result<u64, AmountError> {
    if !lumens.is_finite() || lumens < 0.0 {
        return Err(AmountError::InvalidMicrolumenAmount);
    }
    let microlumens = (lumens * MICROLUMENS_PER_LUMEN as f64).round();
    if microlumens > MAX_MICROLUMENS as f64 {
        return Err(AmountError::InvalidMicrolumenAmount);
    }
    Ok(microlumens as u64)
}
