use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Monthly savings target used when a period has no goals, so that the
/// progress ratio always has a denominator.
pub const DEFAULT_MONTHLY_GOAL: Decimal = dec!(5000);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Suggested payment day for fixed expenses created without one
pub const DEFAULT_SUGGESTED_PAYMENT_DAY: u32 = 1;

/// Minimum number of characters in a variable expense description
pub const MIN_DESCRIPTION_LENGTH: usize = 2;

/// Currency symbol used when formatting amounts for people
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

/// Largest amount a single record or contribution may carry. Keeps sums over
/// any realistic number of rows far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000);
