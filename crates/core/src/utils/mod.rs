pub mod amount;
pub mod format;
pub mod period;

pub use amount::validate_amount;
pub use period::{days_in_month, DateRange, MonthPeriod};
