use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use wallet_core::errors::{Error, Result};
use wallet_core::incomes::{Income, IncomeRepositoryTrait};

use super::model::IncomeDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::incomes;
use crate::utils::to_i32;

pub struct IncomeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl IncomeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        IncomeRepository { pool, writer }
    }
}

#[async_trait]
impl IncomeRepositoryTrait for IncomeRepository {
    fn get_income(&self, user_id: &str, income_id: &str) -> Result<Income> {
        let mut conn = get_connection(&self.pool)?;
        incomes::table
            .filter(incomes::id.eq(income_id))
            .filter(incomes::user_id.eq(user_id))
            .select(IncomeDB::as_select())
            .first::<IncomeDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Income::from)
            .ok_or_else(|| Error::NotFound(format!("Income {}", income_id)))
    }

    fn list_incomes(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Income>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = incomes::table
            .filter(incomes::user_id.eq(user_id))
            .filter(incomes::month.eq(to_i32(month)))
            .filter(incomes::year.eq(year))
            .select(IncomeDB::as_select())
            .load::<IncomeDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Income::from).collect())
    }

    async fn insert_income(&self, income: Income) -> Result<Income> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Income> {
                let row: IncomeDB = income.into();
                let saved = diesel::insert_into(incomes::table)
                    .values(&row)
                    .returning(IncomeDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Income::from(saved))
            })
            .await
    }

    async fn update_income(&self, income: Income) -> Result<Income> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Income> {
                let row: IncomeDB = income.into();
                let saved = diesel::update(
                    incomes::table
                        .filter(incomes::id.eq(&row.id))
                        .filter(incomes::user_id.eq(&row.user_id)),
                )
                .set(&row)
                .returning(IncomeDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?
                .ok_or_else(|| Error::NotFound(format!("Income {}", row.id)))?;
                Ok(Income::from(saved))
            })
            .await
    }

    async fn delete_income(&self, user_id: &str, income_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let income_id = income_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    incomes::table
                        .filter(incomes::id.eq(income_id))
                        .filter(incomes::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
