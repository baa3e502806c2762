//! Database models for fixed expenses.

use diesel::prelude::*;
use wallet_core::fixed_expenses::{FixedExpense, PaymentStatus};

use crate::utils::{
    format_decimal, format_timestamp, parse_category, parse_decimal, parse_timestamp, to_i32,
    to_u32,
};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::fixed_expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FixedExpenseDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub amount: String,
    pub category: String,
    pub status: String,
    pub suggested_payment_day: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<FixedExpenseDB> for FixedExpense {
    fn from(db: FixedExpenseDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            amount: parse_decimal(&db.amount, "amount"),
            category: parse_category(&db.category),
            status: PaymentStatus::from_str_lossy(&db.status),
            suggested_payment_day: to_u32(db.suggested_payment_day),
            created_at: parse_timestamp(&db.created_at, "created_at"),
            updated_at: parse_timestamp(&db.updated_at, "updated_at"),
        }
    }
}

impl From<FixedExpense> for FixedExpenseDB {
    fn from(domain: FixedExpense) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            amount: format_decimal(domain.amount),
            category: domain.category.as_str().to_string(),
            status: domain.status.as_str().to_string(),
            suggested_payment_day: to_i32(domain.suggested_payment_day),
            created_at: format_timestamp(&domain.created_at),
            updated_at: format_timestamp(&domain.updated_at),
        }
    }
}
