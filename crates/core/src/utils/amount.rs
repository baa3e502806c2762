use rust_decimal::Decimal;

use crate::constants::MAX_AMOUNT;
use crate::errors::{Result, ValidationError};

/// Accepts amounts in `(0, MAX_AMOUNT]`. `label` names the field in the error.
pub fn validate_amount(amount: Decimal, label: &str) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(label.to_string()).into());
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(label.to_string(), MAX_AMOUNT).into());
    }
    Ok(())
}
