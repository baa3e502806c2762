use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Rounds to display precision, half away from zero.
pub fn round_for_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// `R$ 1234.50` style rendering used in assistant confirmations.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    format!("{} {:.2}", symbol, round_for_display(amount))
}

/// `12.50%`
pub fn format_percentage(value: Decimal) -> String {
    format!("{:.2}%", round_for_display(value))
}

/// Label shown for fixed incomes, which have a day rather than a date.
pub fn format_day_label(day_of_month: u32) -> String {
    format!("Day {}", day_of_month)
}
