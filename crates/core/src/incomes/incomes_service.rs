use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::incomes_model::{Income, IncomeUpdate, NewIncome};
use super::incomes_traits::{IncomeRepositoryTrait, IncomeServiceTrait};
use crate::errors::{Error, Result};
use crate::utils::MonthPeriod;

pub struct IncomeService {
    income_repository: Arc<dyn IncomeRepositoryTrait>,
}

impl IncomeService {
    pub fn new(income_repository: Arc<dyn IncomeRepositoryTrait>) -> Self {
        IncomeService { income_repository }
    }
}

#[async_trait]
impl IncomeServiceTrait for IncomeService {
    /// Incomes of the period, earliest occurrence first.
    fn get_incomes(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Income>> {
        let period = MonthPeriod::new(month, year)?;
        let mut incomes = self.income_repository.list_incomes(user_id, month, year)?;
        incomes.sort_by_key(|income| income.schedule.date_in(&period));
        Ok(incomes)
    }

    fn total_for_period(&self, user_id: &str, month: u32, year: i32) -> Result<Decimal> {
        MonthPeriod::new(month, year)?;
        Ok(self
            .income_repository
            .list_incomes(user_id, month, year)?
            .iter()
            .fold(Decimal::ZERO, |total, income| {
                total.saturating_add(income.amount)
            }))
    }

    async fn create_income(&self, user_id: &str, new_income: NewIncome) -> Result<Income> {
        new_income.validate()?;
        let now = Utc::now();
        let period = new_income.resolve_period(now.date_naive())?;
        let income = Income {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            schedule: new_income.schedule,
            amount: new_income.amount,
            month: period.month(),
            year: period.year(),
            created_at: now,
        };
        debug!("Creating income {} for period {}", income.id, period);
        self.income_repository.insert_income(income).await
    }

    async fn update_income(&self, user_id: &str, income_update: IncomeUpdate) -> Result<Income> {
        income_update.validate()?;
        let mut income = self
            .income_repository
            .get_income(user_id, &income_update.id)?;
        income.schedule = income_update.schedule;
        income.amount = income_update.amount;
        self.income_repository.update_income(income).await
    }

    async fn delete_income(&self, user_id: &str, income_id: &str) -> Result<()> {
        let deleted = self
            .income_repository
            .delete_income(user_id, income_id)
            .await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Income {}", income_id)));
        }
        Ok(())
    }
}
