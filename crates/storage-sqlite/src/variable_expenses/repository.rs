use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use wallet_core::errors::Result;
use wallet_core::utils::DateRange;
use wallet_core::variable_expenses::{VariableExpense, VariableExpenseRepositoryTrait};

use super::model::VariableExpenseDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::variable_expenses;
use crate::utils::format_timestamp;

pub struct VariableExpenseRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl VariableExpenseRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        VariableExpenseRepository { pool, writer }
    }
}

#[async_trait]
impl VariableExpenseRepositoryTrait for VariableExpenseRepository {
    fn list_variable_expenses(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> Result<Vec<VariableExpense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = variable_expenses::table
            .filter(variable_expenses::user_id.eq(user_id))
            .filter(variable_expenses::date.ge(format_timestamp(&range.start)))
            .filter(variable_expenses::date.le(format_timestamp(&range.end)))
            .order(variable_expenses::date.desc())
            .select(VariableExpenseDB::as_select())
            .load::<VariableExpenseDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(VariableExpense::from).collect())
    }

    async fn insert_variable_expense(&self, expense: VariableExpense) -> Result<VariableExpense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<VariableExpense> {
                let row: VariableExpenseDB = expense.into();
                let saved = diesel::insert_into(variable_expenses::table)
                    .values(&row)
                    .returning(VariableExpenseDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(VariableExpense::from(saved))
            })
            .await
    }

    async fn delete_variable_expense(&self, user_id: &str, expense_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let expense_id = expense_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    variable_expenses::table
                        .filter(variable_expenses::id.eq(expense_id))
                        .filter(variable_expenses::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
