use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use uuid::Uuid;

use super::fixed_expenses_model::{
    FixedExpense, FixedExpenseUpdate, NewFixedExpense, PaymentStatus,
};
use super::fixed_expenses_traits::{FixedExpenseRepositoryTrait, FixedExpenseServiceTrait};
use crate::constants::DEFAULT_SUGGESTED_PAYMENT_DAY;
use crate::errors::{Error, Result};

pub struct FixedExpenseService {
    repository: Arc<dyn FixedExpenseRepositoryTrait>,
}

impl FixedExpenseService {
    pub fn new(repository: Arc<dyn FixedExpenseRepositoryTrait>) -> Self {
        FixedExpenseService { repository }
    }

    async fn set_status(
        &self,
        user_id: &str,
        expense_id: &str,
        status: PaymentStatus,
    ) -> Result<FixedExpense> {
        let mut expense = self.repository.get_fixed_expense(user_id, expense_id)?;
        if expense.status == status {
            return Ok(expense);
        }
        expense.status = status;
        expense.updated_at = Utc::now();
        debug!("Fixed expense {} is now {}", expense.id, status.as_str());
        self.repository.update_fixed_expense(expense).await
    }
}

#[async_trait]
impl FixedExpenseServiceTrait for FixedExpenseService {
    /// All fixed expenses of the user, by suggested payment day.
    fn get_fixed_expenses(&self, user_id: &str) -> Result<Vec<FixedExpense>> {
        let mut expenses = self.repository.list_fixed_expenses(user_id)?;
        expenses.sort_by_key(|e| e.suggested_payment_day);
        Ok(expenses)
    }

    async fn create_fixed_expense(
        &self,
        user_id: &str,
        new_expense: NewFixedExpense,
    ) -> Result<FixedExpense> {
        new_expense.validate()?;
        let now = Utc::now();
        let expense = FixedExpense {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_expense.name.trim().to_string(),
            amount: new_expense.amount,
            category: new_expense.category,
            status: PaymentStatus::Unpaid,
            suggested_payment_day: new_expense
                .suggested_payment_day
                .unwrap_or(DEFAULT_SUGGESTED_PAYMENT_DAY),
            created_at: now,
            updated_at: now,
        };
        self.repository.insert_fixed_expense(expense).await
    }

    async fn update_fixed_expense(
        &self,
        user_id: &str,
        expense_update: FixedExpenseUpdate,
    ) -> Result<FixedExpense> {
        expense_update.validate()?;
        let mut expense = self
            .repository
            .get_fixed_expense(user_id, &expense_update.id)?;
        expense_update.apply_to(&mut expense);
        expense.updated_at = Utc::now();
        self.repository.update_fixed_expense(expense).await
    }

    async fn mark_as_paid(&self, user_id: &str, expense_id: &str) -> Result<FixedExpense> {
        self.set_status(user_id, expense_id, PaymentStatus::Paid)
            .await
    }

    async fn mark_as_unpaid(&self, user_id: &str, expense_id: &str) -> Result<FixedExpense> {
        self.set_status(user_id, expense_id, PaymentStatus::Unpaid)
            .await
    }

    async fn delete_fixed_expense(&self, user_id: &str, expense_id: &str) -> Result<()> {
        let deleted = self
            .repository
            .delete_fixed_expense(user_id, expense_id)
            .await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Fixed expense {}", expense_id)));
        }
        Ok(())
    }

    async fn reset_statuses(&self, user_id: &str) -> Result<usize> {
        let count = self.repository.reset_statuses(user_id).await?;
        info!("Reset {} fixed expense(s) to unpaid for user {}", count, user_id);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::ExpenseCategory;
    use crate::constants::MAX_AMOUNT;
    use crate::errors::ErrorKind;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockFixedExpenseRepository {
        expenses: Mutex<Vec<FixedExpense>>,
    }

    #[async_trait]
    impl FixedExpenseRepositoryTrait for MockFixedExpenseRepository {
        fn get_fixed_expense(&self, user_id: &str, expense_id: &str) -> Result<FixedExpense> {
            self.expenses
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == expense_id && e.user_id == user_id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Fixed expense {}", expense_id)))
        }

        fn list_fixed_expenses(&self, user_id: &str) -> Result<Vec<FixedExpense>> {
            Ok(self
                .expenses
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn insert_fixed_expense(&self, expense: FixedExpense) -> Result<FixedExpense> {
            self.expenses.lock().unwrap().push(expense.clone());
            Ok(expense)
        }

        async fn update_fixed_expense(&self, expense: FixedExpense) -> Result<FixedExpense> {
            let mut expenses = self.expenses.lock().unwrap();
            if let Some(slot) = expenses.iter_mut().find(|e| e.id == expense.id) {
                *slot = expense.clone();
            }
            Ok(expense)
        }

        async fn delete_fixed_expense(&self, user_id: &str, expense_id: &str) -> Result<usize> {
            let mut expenses = self.expenses.lock().unwrap();
            let before = expenses.len();
            expenses.retain(|e| !(e.id == expense_id && e.user_id == user_id));
            Ok(before - expenses.len())
        }

        async fn reset_statuses(&self, user_id: &str) -> Result<usize> {
            let mut count = 0;
            for e in self.expenses.lock().unwrap().iter_mut() {
                if e.user_id == user_id && e.status == PaymentStatus::Paid {
                    e.status = PaymentStatus::Unpaid;
                    count += 1;
                }
            }
            Ok(count)
        }
    }

    fn new_expense(name: &str, day: Option<u32>) -> NewFixedExpense {
        NewFixedExpense {
            name: name.to_string(),
            amount: dec!(100),
            category: ExpenseCategory::Housing,
            suggested_payment_day: day,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_unpaid_day_one() {
        let service = FixedExpenseService::new(Arc::new(MockFixedExpenseRepository::default()));
        let expense = service
            .create_fixed_expense("u1", new_expense("  Rent ", None))
            .await
            .unwrap();
        assert_eq!(expense.status, PaymentStatus::Unpaid);
        assert_eq!(expense.suggested_payment_day, 1);
        assert_eq!(expense.name, "Rent");
    }

    #[tokio::test]
    async fn test_amount_is_capped_on_create_and_update() {
        let service = FixedExpenseService::new(Arc::new(MockFixedExpenseRepository::default()));
        let mut at_cap = new_expense("Rent", Some(5));
        at_cap.amount = MAX_AMOUNT;
        let expense = service.create_fixed_expense("u1", at_cap).await.unwrap();

        let mut too_large = new_expense("Mortgage", Some(5));
        too_large.amount = MAX_AMOUNT + dec!(1);
        let err = service
            .create_fixed_expense("u1", too_large)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let update = FixedExpenseUpdate {
            id: expense.id,
            amount: Some(Decimal::MAX),
            ..Default::default()
        };
        let err = service.update_fixed_expense("u1", update).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(service.get_fixed_expenses("u1").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_suggested_day() {
        let service = FixedExpenseService::new(Arc::new(MockFixedExpenseRepository::default()));
        for (name, day) in [("Gym", 20), ("Rent", 5), ("Internet", 10)] {
            service
                .create_fixed_expense("u1", new_expense(name, Some(day)))
                .await
                .unwrap();
        }
        let names: Vec<String> = service
            .get_fixed_expenses("u1")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Rent", "Internet", "Gym"]);
    }

    #[tokio::test]
    async fn test_mark_paid_then_reset() {
        let service = FixedExpenseService::new(Arc::new(MockFixedExpenseRepository::default()));
        let a = service
            .create_fixed_expense("u1", new_expense("Rent", Some(5)))
            .await
            .unwrap();
        let b = service
            .create_fixed_expense("u1", new_expense("Gym", Some(10)))
            .await
            .unwrap();
        service
            .create_fixed_expense("u2", new_expense("Other user", Some(10)))
            .await
            .unwrap();

        assert!(service.mark_as_paid("u1", &a.id).await.unwrap().is_paid());
        service.mark_as_paid("u1", &b.id).await.unwrap();
        assert!(!service.mark_as_unpaid("u1", &b.id).await.unwrap().is_paid());

        assert_eq!(service.reset_statuses("u1").await.unwrap(), 1);
        assert_eq!(service.reset_statuses("u1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_partial_update_and_ownership() {
        let service = FixedExpenseService::new(Arc::new(MockFixedExpenseRepository::default()));
        let expense = service
            .create_fixed_expense("u1", new_expense("Rent", Some(5)))
            .await
            .unwrap();

        let update = FixedExpenseUpdate {
            id: expense.id.clone(),
            amount: Some(dec!(1500)),
            ..Default::default()
        };
        let err = service
            .update_fixed_expense("u2", update.clone())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let updated = service.update_fixed_expense("u1", update).await.unwrap();
        assert_eq!(updated.amount, dec!(1500));
        assert_eq!(updated.name, "Rent");
        assert_eq!(updated.suggested_payment_day, 5);

        let bad = FixedExpenseUpdate {
            id: expense.id.clone(),
            suggested_payment_day: Some(0),
            ..Default::default()
        };
        assert_eq!(
            service.update_fixed_expense("u1", bad).await.unwrap_err().kind(),
            ErrorKind::Validation
        );
    }
}
