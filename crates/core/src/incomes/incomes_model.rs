//! Income domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::MonthPeriod;

/// When an income is received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum IncomeSchedule {
    /// Recurs every month on `day_of_month`, clamped in short months.
    Fixed { day_of_month: u32 },
    /// Paid once at `payment_date`.
    OneTime { payment_date: DateTime<Utc> },
}

impl IncomeSchedule {
    pub fn validate(&self) -> Result<()> {
        if let IncomeSchedule::Fixed { day_of_month } = self {
            if !(1..=31).contains(day_of_month) {
                return Err(ValidationError::InvalidDayOfMonth(*day_of_month).into());
            }
        }
        Ok(())
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, IncomeSchedule::Fixed { .. })
    }

    /// Date this schedule falls on within `period`.
    pub fn date_in(&self, period: &MonthPeriod) -> NaiveDate {
        match self {
            IncomeSchedule::Fixed { day_of_month } => period.date_for_day(*day_of_month),
            IncomeSchedule::OneTime { payment_date } => payment_date.date_naive(),
        }
    }
}

/// Domain model representing an income entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub schedule: IncomeSchedule,
    pub amount: Decimal,
    pub month: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

impl Income {
    pub fn period(&self) -> Result<MonthPeriod> {
        MonthPeriod::new(self.month, self.year)
    }

    /// Recurring day for fixed incomes.
    pub fn fixed_day(&self) -> Option<u32> {
        match self.schedule {
            IncomeSchedule::Fixed { day_of_month } => Some(day_of_month),
            IncomeSchedule::OneTime { .. } => None,
        }
    }

    /// Date the income is received in its own period.
    pub fn occurrence_date(&self) -> Result<NaiveDate> {
        Ok(self.schedule.date_in(&self.period()?))
    }
}

/// Input model for creating a new income.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncome {
    #[serde(flatten)]
    pub schedule: IncomeSchedule,
    pub amount: Decimal,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl NewIncome {
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        self.schedule.validate()?;
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(ValidationError::InvalidMonth(month).into());
            }
        }
        Ok(())
    }

    /// Period the income belongs to. An explicit month and year win; otherwise
    /// one-time incomes use the month of their payment date and fixed incomes
    /// use the month containing `today`.
    pub fn resolve_period(&self, today: NaiveDate) -> Result<MonthPeriod> {
        let fallback = match &self.schedule {
            IncomeSchedule::Fixed { .. } => MonthPeriod::of_date(today),
            IncomeSchedule::OneTime { payment_date } => {
                MonthPeriod::of_date(payment_date.date_naive())
            }
        };
        MonthPeriod::new(
            self.month.unwrap_or_else(|| fallback.month()),
            self.year.unwrap_or_else(|| fallback.year()),
        )
    }
}

/// Input model for updating an existing income. Month and year are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeUpdate {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub schedule: IncomeSchedule,
    pub amount: Decimal,
}

impl IncomeUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid_input("Income ID is required for updates"));
        }
        validate_amount(self.amount)?;
        self.schedule.validate()
    }
}

fn validate_amount(amount: Decimal) -> Result<()> {
    crate::utils::validate_amount(amount, "income")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_AMOUNT;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_schedule_serializes_flattened_with_type_tag() {
        let income = Income {
            id: "i1".to_string(),
            user_id: "u1".to_string(),
            schedule: IncomeSchedule::Fixed { day_of_month: 5 },
            amount: dec!(3000),
            month: 6,
            year: 2024,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&income).unwrap();
        assert_eq!(json["type"], "fixed");
        assert_eq!(json["dayOfMonth"], 5);
        assert_eq!(json["userId"], "u1");

        let parsed: NewIncome = serde_json::from_value(serde_json::json!({
            "type": "oneTime",
            "paymentDate": "2024-06-20T12:00:00Z",
            "amount": 150.5
        }))
        .unwrap();
        assert!(!parsed.schedule.is_fixed());
        assert_eq!(parsed.amount, dec!(150.5));
    }

    #[test]
    fn test_validate_rejects_bad_amount_and_day() {
        let mut input = NewIncome {
            schedule: IncomeSchedule::Fixed { day_of_month: 32 },
            amount: dec!(100),
            month: None,
            year: None,
        };
        assert!(input.validate().is_err());
        input.schedule = IncomeSchedule::Fixed { day_of_month: 31 };
        assert!(input.validate().is_ok());
        input.amount = Decimal::ZERO;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_caps_amount() {
        let mut input = NewIncome {
            schedule: IncomeSchedule::Fixed { day_of_month: 5 },
            amount: MAX_AMOUNT,
            month: None,
            year: None,
        };
        assert!(input.validate().is_ok());
        input.amount = MAX_AMOUNT + dec!(0.01);
        assert!(input.validate().is_err());

        let update = IncomeUpdate {
            id: "i1".to_string(),
            schedule: IncomeSchedule::Fixed { day_of_month: 5 },
            amount: Decimal::MAX,
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_resolve_period_defaults() {
        let one_time = NewIncome {
            schedule: IncomeSchedule::OneTime {
                payment_date: Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap(),
            },
            amount: dec!(10),
            month: None,
            year: None,
        };
        let period = one_time.resolve_period(date(2024, 6, 15)).unwrap();
        assert_eq!((period.month(), period.year()), (2, 2024));

        let fixed = NewIncome {
            schedule: IncomeSchedule::Fixed { day_of_month: 5 },
            amount: dec!(10),
            month: None,
            year: Some(2023),
        };
        let period = fixed.resolve_period(date(2024, 6, 15)).unwrap();
        assert_eq!((period.month(), period.year()), (6, 2023));
    }

    #[test]
    fn test_fixed_occurrence_is_clamped() {
        let income = Income {
            id: "i1".to_string(),
            user_id: "u1".to_string(),
            schedule: IncomeSchedule::Fixed { day_of_month: 31 },
            amount: dec!(1),
            month: 2,
            year: 2023,
            created_at: Utc::now(),
        };
        assert_eq!(income.occurrence_date().unwrap(), date(2023, 2, 28));
    }
}
