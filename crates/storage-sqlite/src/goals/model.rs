//! Database models for goals.

use diesel::prelude::*;
use wallet_core::goals::Goal;

use crate::utils::{format_decimal, format_timestamp, parse_decimal, parse_timestamp, to_i32, to_u32};

/// Database model for goals
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub monthly_goal: String,
    pub saved_amount: String,
    pub month: i32,
    pub year: i32,
    pub created_at: String,
    pub updated_at: String,
}

// Conversion to domain models
impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            description: db.description,
            monthly_goal: parse_decimal(&db.monthly_goal, "monthly_goal"),
            saved_amount: parse_decimal(&db.saved_amount, "saved_amount"),
            month: to_u32(db.month),
            year: db.year,
            created_at: parse_timestamp(&db.created_at, "created_at"),
            updated_at: parse_timestamp(&db.updated_at, "updated_at"),
        }
    }
}

impl From<Goal> for GoalDB {
    fn from(domain: Goal) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            description: domain.description,
            monthly_goal: format_decimal(domain.monthly_goal),
            saved_amount: format_decimal(domain.saved_amount),
            month: to_i32(domain.month),
            year: domain.year,
            created_at: format_timestamp(&domain.created_at),
            updated_at: format_timestamp(&domain.updated_at),
        }
    }
}
