use wallet_core::errors::{Error, Result};
use wallet_core::goals::{Goal, GoalRepositoryTrait};

use super::model::GoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::goals;
use crate::utils::{format_decimal, format_timestamp, parse_decimal, to_i32};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;

use std::sync::Arc;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

fn find_owned(conn: &mut SqliteConnection, user_id: &str, goal_id: &str) -> Result<GoalDB> {
    goals::table
        .filter(goals::id.eq(goal_id))
        .filter(goals::user_id.eq(user_id))
        .select(GoalDB::as_select())
        .first::<GoalDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        find_owned(&mut conn, user_id, goal_id).map(Goal::from)
    }

    fn load_goals(&self, user_id: &str, month: u32, year: i32) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let goals_db = goals::table
            .filter(goals::user_id.eq(user_id))
            .filter(goals::month.eq(to_i32(month)))
            .filter(goals::year.eq(year))
            .order(goals::created_at.asc())
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .into_core()?;
        Ok(goals_db.into_iter().map(Goal::from).collect())
    }

    async fn insert_new_goal(&self, goal: Goal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let goal_db: GoalDB = goal.into();
                let result_db = diesel::insert_into(goals::table)
                    .values(&goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Goal::from(result_db))
            })
            .await
    }

    async fn update_goal(&self, goal_update: Goal) -> Result<Goal> {
        let goal_db: GoalDB = goal_update.into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                // The saved amount only moves through contributions.
                find_owned(conn, &goal_db.user_id, &goal_db.id)?;
                let result_db = diesel::update(goals::table.find(&goal_db.id))
                    .set((
                        goals::name.eq(&goal_db.name),
                        goals::description.eq(&goal_db.description),
                        goals::monthly_goal.eq(&goal_db.monthly_goal),
                        goals::updated_at.eq(&goal_db.updated_at),
                    ))
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Goal::from(result_db))
            })
            .await
    }

    async fn add_to_saved_amount(
        &self,
        user_id: &str,
        goal_id: &str,
        amount: Decimal,
    ) -> Result<Goal> {
        let user_id = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let current = find_owned(conn, &user_id, &goal_id)?;
                let saved = parse_decimal(&current.saved_amount, "saved_amount")
                    .checked_add(amount)
                    .ok_or_else(|| {
                        Error::invalid_input(format!(
                            "Contribution of {} overflows the saved amount of goal {}",
                            amount, goal_id
                        ))
                    })?;
                let result_db = diesel::update(goals::table.find(&goal_id))
                    .set((
                        goals::saved_amount.eq(format_decimal(saved)),
                        goals::updated_at.eq(format_timestamp(&Utc::now())),
                    ))
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Goal::from(result_db))
            })
            .await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    goals::table
                        .filter(goals::id.eq(goal_id))
                        .filter(goals::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;
    use rust_decimal_macros::dec;
    use wallet_core::errors::ErrorKind;

    fn goal(id: &str, user_id: &str) -> Goal {
        let now = Utc::now();
        Goal {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: "Trip".to_string(),
            description: Some("Lisbon".to_string()),
            monthly_goal: dec!(1000),
            saved_amount: Decimal::ZERO,
            month: 6,
            year: 2024,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_contributions_accumulate() {
        let db = test_db();
        let repo = GoalRepository::new(db.pool.clone(), db.writer.clone());
        repo.insert_new_goal(goal("g1", "u1")).await.unwrap();

        repo.add_to_saved_amount("u1", "g1", dec!(100.10)).await.unwrap();
        let saved = repo.add_to_saved_amount("u1", "g1", dec!(0.90)).await.unwrap();
        assert_eq!(saved.saved_amount, dec!(101));

        let err = repo
            .add_to_saved_amount("u2", "g1", dec!(5))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_overflowing_contribution_is_rejected_and_writer_keeps_serving() {
        let db = test_db();
        let repo = GoalRepository::new(db.pool.clone(), db.writer.clone());
        repo.insert_new_goal(goal("g1", "u1")).await.unwrap();

        let near_max = Decimal::MAX - dec!(1);
        repo.add_to_saved_amount("u1", "g1", near_max).await.unwrap();
        let err = repo
            .add_to_saved_amount("u1", "g1", near_max)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(repo.get_goal("u1", "g1").unwrap().saved_amount, near_max);

        let other = repo.insert_new_goal(goal("g2", "u2")).await.unwrap();
        assert_eq!(other.id, "g2");
        assert_eq!(repo.load_goals("u2", 6, 2024).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_never_touches_saved_amount() {
        let db = test_db();
        let repo = GoalRepository::new(db.pool.clone(), db.writer.clone());
        repo.insert_new_goal(goal("g1", "u1")).await.unwrap();
        repo.add_to_saved_amount("u1", "g1", dec!(300)).await.unwrap();

        let mut edited = repo.get_goal("u1", "g1").unwrap();
        edited.name = "Porto".to_string();
        edited.description = None;
        edited.saved_amount = Decimal::ZERO;
        let updated = repo.update_goal(edited).await.unwrap();
        assert_eq!(updated.name, "Porto");
        assert_eq!(updated.description, None);
        assert_eq!(updated.saved_amount, dec!(300));
    }

    #[tokio::test]
    async fn test_load_goals_scoped_by_period_and_user() {
        let db = test_db();
        let repo = GoalRepository::new(db.pool.clone(), db.writer.clone());
        repo.insert_new_goal(goal("g1", "u1")).await.unwrap();
        repo.insert_new_goal(goal("g2", "u2")).await.unwrap();
        let mut july = goal("g3", "u1");
        july.month = 7;
        repo.insert_new_goal(july).await.unwrap();

        let june = repo.load_goals("u1", 6, 2024).unwrap();
        assert_eq!(june.len(), 1);
        assert_eq!(june[0].id, "g1");
        assert_eq!(repo.delete_goal("u1", "g1").await.unwrap(), 1);
        assert!(repo.load_goals("u1", 6, 2024).unwrap().is_empty());
    }
}
