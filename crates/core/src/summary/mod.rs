//! Financial summary engine: dashboard metrics derived from a user's records.

mod record_store;
mod summary_calculator;
mod summary_model;
mod summary_service;
mod summary_traits;

pub use record_store::RepositoryRecordStore;
pub use summary_calculator::{
    compare_months, compute_summary, days_elapsed, expenses_by_category,
    forecast_next_payment, month_totals, variation, SummaryInput,
};
pub use summary_model::{
    CategoryBreakdown, FinancialSummary, MonthTotals, MonthlyComparison, NextPayment, Variation,
};
pub use summary_service::FinancialSummaryService;
pub use summary_traits::{FinancialSummaryServiceTrait, RecordStoreTrait};
