use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use wallet_core::errors::{Error, Result};
use wallet_core::fixed_expenses::{FixedExpense, FixedExpenseRepositoryTrait, PaymentStatus};

use super::model::FixedExpenseDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::fixed_expenses;
use crate::utils::format_timestamp;

pub struct FixedExpenseRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FixedExpenseRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        FixedExpenseRepository { pool, writer }
    }
}

#[async_trait]
impl FixedExpenseRepositoryTrait for FixedExpenseRepository {
    fn get_fixed_expense(&self, user_id: &str, expense_id: &str) -> Result<FixedExpense> {
        let mut conn = get_connection(&self.pool)?;
        fixed_expenses::table
            .filter(fixed_expenses::id.eq(expense_id))
            .filter(fixed_expenses::user_id.eq(user_id))
            .select(FixedExpenseDB::as_select())
            .first::<FixedExpenseDB>(&mut conn)
            .optional()
            .into_core()?
            .map(FixedExpense::from)
            .ok_or_else(|| Error::NotFound(format!("Fixed expense {}", expense_id)))
    }

    fn list_fixed_expenses(&self, user_id: &str) -> Result<Vec<FixedExpense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = fixed_expenses::table
            .filter(fixed_expenses::user_id.eq(user_id))
            .order((
                fixed_expenses::suggested_payment_day.asc(),
                fixed_expenses::created_at.asc(),
            ))
            .select(FixedExpenseDB::as_select())
            .load::<FixedExpenseDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(FixedExpense::from).collect())
    }

    async fn insert_fixed_expense(&self, expense: FixedExpense) -> Result<FixedExpense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FixedExpense> {
                let row: FixedExpenseDB = expense.into();
                let saved = diesel::insert_into(fixed_expenses::table)
                    .values(&row)
                    .returning(FixedExpenseDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(FixedExpense::from(saved))
            })
            .await
    }

    async fn update_fixed_expense(&self, expense: FixedExpense) -> Result<FixedExpense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FixedExpense> {
                let row: FixedExpenseDB = expense.into();
                let saved = diesel::update(
                    fixed_expenses::table
                        .filter(fixed_expenses::id.eq(&row.id))
                        .filter(fixed_expenses::user_id.eq(&row.user_id)),
                )
                .set(&row)
                .returning(FixedExpenseDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?
                .ok_or_else(|| Error::NotFound(format!("Fixed expense {}", row.id)))?;
                Ok(FixedExpense::from(saved))
            })
            .await
    }

    async fn delete_fixed_expense(&self, user_id: &str, expense_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let expense_id = expense_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    fixed_expenses::table
                        .filter(fixed_expenses::id.eq(expense_id))
                        .filter(fixed_expenses::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }

    async fn reset_statuses(&self, user_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::update(
                    fixed_expenses::table
                        .filter(fixed_expenses::user_id.eq(user_id))
                        .filter(fixed_expenses::status.eq(PaymentStatus::Paid.as_str())),
                )
                .set((
                    fixed_expenses::status.eq(PaymentStatus::Unpaid.as_str()),
                    fixed_expenses::updated_at.eq(format_timestamp(&Utc::now())),
                ))
                .execute(conn)
                .into_core()
            })
            .await
    }
}
