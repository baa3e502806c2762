//! Database models for incomes.

use diesel::prelude::*;
use wallet_core::incomes::{Income, IncomeSchedule};

use crate::utils::{
    format_decimal, format_timestamp, parse_decimal, parse_timestamp, to_i32, to_u32,
};

const FIXED: &str = "fixed";
const ONE_TIME: &str = "oneTime";

/// Database model for incomes. The schedule is split over
/// `income_type`, `day_of_month` and `payment_date`.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::incomes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct IncomeDB {
    pub id: String,
    pub user_id: String,
    pub income_type: String,
    pub day_of_month: Option<i32>,
    pub payment_date: Option<String>,
    pub amount: String,
    pub month: i32,
    pub year: i32,
    pub created_at: String,
}

impl From<IncomeDB> for Income {
    fn from(db: IncomeDB) -> Self {
        let schedule = match (db.income_type.as_str(), db.day_of_month, &db.payment_date) {
            (FIXED, Some(day), _) => IncomeSchedule::Fixed {
                day_of_month: to_u32(day),
            },
            (_, _, Some(date)) => IncomeSchedule::OneTime {
                payment_date: parse_timestamp(date, "payment_date"),
            },
            _ => {
                log::error!("Income {} has an incomplete schedule, assuming day 1", db.id);
                IncomeSchedule::Fixed { day_of_month: 1 }
            }
        };
        Self {
            id: db.id,
            user_id: db.user_id,
            schedule,
            amount: parse_decimal(&db.amount, "amount"),
            month: to_u32(db.month),
            year: db.year,
            created_at: parse_timestamp(&db.created_at, "created_at"),
        }
    }
}

impl From<Income> for IncomeDB {
    fn from(domain: Income) -> Self {
        let (income_type, day_of_month, payment_date) = match &domain.schedule {
            IncomeSchedule::Fixed { day_of_month } => {
                (FIXED, Some(to_i32(*day_of_month)), None)
            }
            IncomeSchedule::OneTime { payment_date } => {
                (ONE_TIME, None, Some(format_timestamp(payment_date)))
            }
        };
        Self {
            id: domain.id,
            user_id: domain.user_id,
            income_type: income_type.to_string(),
            day_of_month,
            payment_date,
            amount: format_decimal(domain.amount),
            month: to_i32(domain.month),
            year: domain.year,
            created_at: format_timestamp(&domain.created_at),
        }
    }
}
