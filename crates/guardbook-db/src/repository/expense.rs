//! # Expense Repository
//!
//! Database operations for cash advances, fines, and other entries.
//!
//! Expenses have no natural key: a guard can take two advances in one day
//! and both rows stand. The only boundary rules are a non-empty guard
//! reference and a positive amount.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use guardbook_core::validation::validate_expense;
use guardbook_core::ExpenseRecord;

/// Repository for expense database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Lists all expense entries, newest first.
    pub async fn get_all(&self) -> DbResult<Vec<ExpenseRecord>> {
        let expenses = sqlx::query_as::<_, ExpenseRecord>(
            r#"
            SELECT id, guard_id, date, amount_paise, reason, expense_type, created_at
            FROM expense_records
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Inserts a new expense entry.
    ///
    /// ## Errors
    /// * `DbError::Validation` - missing guard reference or non-positive amount
    pub async fn insert(&self, expense: &ExpenseRecord) -> DbResult<()> {
        validate_expense(expense)?;

        debug!(
            id = %expense.id,
            guard_id = %expense.guard_id,
            amount_paise = expense.amount_paise,
            "Inserting expense"
        );

        sqlx::query(
            r#"
            INSERT INTO expense_records (
                id, guard_id, date, amount_paise, reason, expense_type, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.guard_id)
        .bind(expense.date)
        .bind(expense.amount_paise)
        .bind(&expense.reason)
        .bind(expense.expense_type)
        .bind(expense.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes an expense entry outright.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting expense");

        let result = sqlx::query("DELETE FROM expense_records WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Expense", id));
        }

        Ok(())
    }

    /// Counts expense entries (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM expense_records")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::test_support::sample_expense;
    use chrono::NaiveDate;
    use guardbook_core::{ExpenseType, Money};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, d).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_all() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.expenses()
            .insert(&sample_expense("g1", day(5), 300, ExpenseType::Advance))
            .await
            .unwrap();
        db.expenses()
            .insert(&sample_expense("g1", day(18), 200, ExpenseType::Fine))
            .await
            .unwrap();

        let all = db.expenses().get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        // Newest first
        assert_eq!(all[0].date, day(18));
        assert_eq!(all[0].expense_type, ExpenseType::Fine);
        assert_eq!(all[1].amount(), Money::from_rupees(300));
    }

    #[tokio::test]
    async fn test_multiple_entries_per_guard_day_are_legal() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        for _ in 0..2 {
            db.expenses()
                .insert(&sample_expense("g1", day(5), 100, ExpenseType::Advance))
                .await
                .unwrap();
        }

        assert_eq!(db.expenses().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_invalid_entries_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut no_guard = sample_expense("", day(5), 100, ExpenseType::Advance);
        no_guard.guard_id = "".to_string();
        assert!(matches!(
            db.expenses().insert(&no_guard).await,
            Err(DbError::Validation(_))
        ));

        let mut zero = sample_expense("g1", day(5), 100, ExpenseType::Other);
        zero.amount_paise = 0;
        assert!(matches!(
            db.expenses().insert(&zero).await,
            Err(DbError::Validation(_))
        ));

        assert_eq!(db.expenses().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let expense = sample_expense("g1", day(5), 100, ExpenseType::Advance);
        db.expenses().insert(&expense).await.unwrap();
        db.expenses().delete(&expense.id).await.unwrap();

        assert_eq!(db.expenses().count().await.unwrap(), 0);
    }
}
