//! Currency conversion over a fetched rate table.

use super::rates::{RateTable, normalize_code};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("Currency {0} not found")]
    CurrencyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
}

/// Converts `amount` of `from` into `to`.
///
/// The amount is first normalized to the table's pivot currency and then multiplied by
/// the target rate. Both codes must be present in `rates`; the pivot always is.
pub fn convert(
    rates: &RateTable,
    from: &str,
    to: &str,
    amount: f64,
) -> Result<f64, ConvertError> {
    if !amount.is_finite() {
        return Err(ConvertError::InvalidAmount(amount));
    }
    let from_rate = rates
        .rate(from)
        .ok_or_else(|| ConvertError::CurrencyNotFound(normalize_code(from)))?;
    let to_rate = rates
        .rate(to)
        .ok_or_else(|| ConvertError::CurrencyNotFound(normalize_code(to)))?;

    if normalize_code(from) == normalize_code(to) {
        return Ok(amount);
    }

    let in_pivot = amount / from_rate;
    Ok(in_pivot * to_rate)
}

/// Converts the same `amount` in the opposite direction, `to` into `from`.
pub fn reverse(
    rates: &RateTable,
    from: &str,
    to: &str,
    amount: f64,
) -> Result<f64, ConvertError> {
    convert(rates, to, from, amount)
}
