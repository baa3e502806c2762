//! Database models for variable expenses.

use diesel::prelude::*;
use wallet_core::variable_expenses::VariableExpense;

use crate::utils::{
    format_decimal, format_timestamp, parse_category, parse_decimal, parse_timestamp,
};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::variable_expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VariableExpenseDB {
    pub id: String,
    pub user_id: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: String,
    pub created_at: String,
}

impl From<VariableExpenseDB> for VariableExpense {
    fn from(db: VariableExpenseDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            amount: parse_decimal(&db.amount, "amount"),
            category: parse_category(&db.category),
            description: db.description,
            date: parse_timestamp(&db.date, "date"),
            created_at: parse_timestamp(&db.created_at, "created_at"),
        }
    }
}

impl From<VariableExpense> for VariableExpenseDB {
    fn from(domain: VariableExpense) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            amount: format_decimal(domain.amount),
            category: domain.category.as_str().to_string(),
            description: domain.description,
            date: format_timestamp(&domain.date),
            created_at: format_timestamp(&domain.created_at),
        }
    }
}
