use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::variable_expenses_model::{CategoryTotal, NewVariableExpense, VariableExpense};
use super::variable_expenses_traits::{
    VariableExpenseRepositoryTrait, VariableExpenseServiceTrait,
};
use crate::categories::ExpenseCategory;
use crate::errors::{Error, Result};
use crate::utils::MonthPeriod;

pub struct VariableExpenseService {
    repository: Arc<dyn VariableExpenseRepositoryTrait>,
}

impl VariableExpenseService {
    pub fn new(repository: Arc<dyn VariableExpenseRepositoryTrait>) -> Self {
        VariableExpenseService { repository }
    }
}

/// Groups expenses by category, largest total first.
pub fn summarize_by_category(expenses: &[VariableExpense]) -> Vec<CategoryTotal> {
    let mut grouped: BTreeMap<ExpenseCategory, (Decimal, usize)> = BTreeMap::new();
    for expense in expenses {
        let entry = grouped
            .entry(expense.category)
            .or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.saturating_add(expense.amount);
        entry.1 += 1;
    }

    let mut totals: Vec<CategoryTotal> = grouped
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category,
            label: category.label().to_string(),
            total,
            count,
        })
        .collect();
    // Stable sort keeps category order for equal totals.
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

#[async_trait]
impl VariableExpenseServiceTrait for VariableExpenseService {
    /// Expenses dated inside the month, newest first.
    fn get_variable_expenses(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
        category: Option<ExpenseCategory>,
    ) -> Result<Vec<VariableExpense>> {
        let range = MonthPeriod::new(month, year)?.date_range();
        let mut expenses = self.repository.list_variable_expenses(user_id, &range)?;
        if let Some(category) = category {
            expenses.retain(|e| e.category == category);
        }
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    async fn create_variable_expense(
        &self,
        user_id: &str,
        new_expense: NewVariableExpense,
    ) -> Result<VariableExpense> {
        new_expense.validate()?;
        let now = Utc::now();
        let expense = VariableExpense {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            amount: new_expense.amount,
            category: new_expense.category,
            description: new_expense.description.trim().to_string(),
            date: new_expense.date.unwrap_or(now),
            created_at: now,
        };
        debug!(
            "Recording variable expense {} ({}) on {}",
            expense.id, expense.category, expense.date
        );
        self.repository.insert_variable_expense(expense).await
    }

    async fn delete_variable_expense(&self, user_id: &str, expense_id: &str) -> Result<()> {
        let deleted = self
            .repository
            .delete_variable_expense(user_id, expense_id)
            .await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Variable expense {}", expense_id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_AMOUNT;
    use crate::errors::ErrorKind;
    use crate::utils::DateRange;
    use chrono::{DateTime, TimeZone};
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockVariableExpenseRepository {
        expenses: Mutex<Vec<VariableExpense>>,
    }

    #[async_trait]
    impl VariableExpenseRepositoryTrait for MockVariableExpenseRepository {
        fn list_variable_expenses(
            &self,
            user_id: &str,
            range: &DateRange,
        ) -> Result<Vec<VariableExpense>> {
            Ok(self
                .expenses
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.user_id == user_id && range.contains(&e.date))
                .cloned()
                .collect())
        }

        async fn insert_variable_expense(
            &self,
            expense: VariableExpense,
        ) -> Result<VariableExpense> {
            self.expenses.lock().unwrap().push(expense.clone());
            Ok(expense)
        }

        async fn delete_variable_expense(&self, user_id: &str, expense_id: &str) -> Result<usize> {
            let mut expenses = self.expenses.lock().unwrap();
            let before = expenses.len();
            expenses.retain(|e| !(e.id == expense_id && e.user_id == user_id));
            Ok(before - expenses.len())
        }
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn input(amount: Decimal, category: ExpenseCategory, date: DateTime<Utc>) -> NewVariableExpense {
        NewVariableExpense {
            amount,
            category,
            description: "Groceries".to_string(),
            date: Some(date),
        }
    }

    #[tokio::test]
    async fn test_list_filters_month_and_category_newest_first() {
        let service =
            VariableExpenseService::new(Arc::new(MockVariableExpenseRepository::default()));
        service
            .create_variable_expense("u1", input(dec!(10), ExpenseCategory::Food, at(2024, 6, 2)))
            .await
            .unwrap();
        service
            .create_variable_expense("u1", input(dec!(20), ExpenseCategory::Food, at(2024, 6, 28)))
            .await
            .unwrap();
        service
            .create_variable_expense(
                "u1",
                input(dec!(30), ExpenseCategory::Leisure, at(2024, 6, 15)),
            )
            .await
            .unwrap();
        service
            .create_variable_expense("u1", input(dec!(40), ExpenseCategory::Food, at(2024, 7, 1)))
            .await
            .unwrap();

        let all = service.get_variable_expenses("u1", 6, 2024, None).unwrap();
        let amounts: Vec<Decimal> = all.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![dec!(20), dec!(30), dec!(10)]);

        let food = service
            .get_variable_expenses("u1", 6, 2024, Some(ExpenseCategory::Food))
            .unwrap();
        assert_eq!(food.len(), 2);
    }

    #[tokio::test]
    async fn test_create_validates_description_and_amount() {
        let service =
            VariableExpenseService::new(Arc::new(MockVariableExpenseRepository::default()));
        let mut bad = input(dec!(10), ExpenseCategory::Food, at(2024, 6, 2));
        bad.description = " a ".to_string();
        let err = service.create_variable_expense("u1", bad).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let bad = input(dec!(0), ExpenseCategory::Food, at(2024, 6, 2));
        assert!(service.create_variable_expense("u1", bad).await.is_err());

        let at_cap = input(MAX_AMOUNT, ExpenseCategory::Food, at(2024, 6, 2));
        assert!(service.create_variable_expense("u1", at_cap).await.is_ok());
        let bad = input(MAX_AMOUNT + dec!(0.01), ExpenseCategory::Food, at(2024, 6, 2));
        let err = service.create_variable_expense("u1", bad).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let service =
            VariableExpenseService::new(Arc::new(MockVariableExpenseRepository::default()));
        let err = service
            .delete_variable_expense("u1", "missing")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_summarize_by_category_orders_by_total() {
        let make = |amount, category| VariableExpense {
            id: "x".to_string(),
            user_id: "u1".to_string(),
            amount,
            category,
            description: "test".to_string(),
            date: at(2024, 6, 1),
            created_at: at(2024, 6, 1),
        };
        let totals = summarize_by_category(&[
            make(dec!(10), ExpenseCategory::Food),
            make(dec!(50), ExpenseCategory::Leisure),
            make(dec!(15), ExpenseCategory::Food),
            make(dec!(25), ExpenseCategory::Transport),
        ]);
        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].category, ExpenseCategory::Leisure);
        // Food and Transport tie at 25; declaration order wins.
        assert_eq!(totals[1].category, ExpenseCategory::Transport);
        assert_eq!(totals[2].category, ExpenseCategory::Food);
        assert_eq!(totals[2].count, 2);
        assert_eq!(totals[2].label, "Food");
    }
}
