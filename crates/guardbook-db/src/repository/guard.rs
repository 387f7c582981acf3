//! # Guard Repository
//!
//! Database operations for the guard roster.
//!
//! Guards are the only record type with an id-keyed `update`: the roster is
//! long-lived and edited in place (reassignment, pay revisions, status
//! changes), unlike invoices which are re-saved as new records.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use guardbook_core::validation::validate_guard;
use guardbook_core::Guard;

/// Repository for guard database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.guards();
///
/// // Full roster, active and inactive
/// let roster = repo.get_all().await?;
///
/// // Reassign to another site
/// let mut guard = roster[0].clone();
/// guard.site_id = Some(new_site_id);
/// repo.update(&guard).await?;
/// ```
#[derive(Debug, Clone)]
pub struct GuardRepository {
    pool: SqlitePool,
}

const GUARD_COLUMNS: &str = r#"
    id, name, code, phone, national_id, site_id,
    salary_per_shift_paise, food_cost_per_shift_paise, uniform_deduction_paise,
    joining_date, status, created_at, updated_at
"#;

impl GuardRepository {
    /// Creates a new GuardRepository.
    pub fn new(pool: SqlitePool) -> Self {
        GuardRepository { pool }
    }

    /// Lists the whole roster, sorted by name.
    ///
    /// Inactive guards are included: payroll for past months must stay
    /// computable after staff leave. Filter on `Guard::status` if needed.
    pub async fn get_all(&self) -> DbResult<Vec<Guard>> {
        let guards = sqlx::query_as::<_, Guard>(&format!(
            "SELECT {GUARD_COLUMNS} FROM guards ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(guards)
    }

    /// Gets a guard by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Guard>> {
        let guard = sqlx::query_as::<_, Guard>(&format!(
            "SELECT {GUARD_COLUMNS} FROM guards WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(guard)
    }

    /// Inserts a new guard.
    ///
    /// ## Errors
    /// * `DbError::Validation` - empty name or negative pay fields
    /// * `DbError::UniqueViolation` - id already exists
    pub async fn insert(&self, guard: &Guard) -> DbResult<()> {
        validate_guard(guard)?;

        debug!(id = %guard.id, code = %guard.code, "Inserting guard");

        sqlx::query(
            r#"
            INSERT INTO guards (
                id, name, code, phone, national_id, site_id,
                salary_per_shift_paise, food_cost_per_shift_paise,
                uniform_deduction_paise, joining_date, status,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&guard.id)
        .bind(&guard.name)
        .bind(&guard.code)
        .bind(&guard.phone)
        .bind(&guard.national_id)
        .bind(&guard.site_id)
        .bind(guard.salary_per_shift_paise)
        .bind(guard.food_cost_per_shift_paise)
        .bind(guard.uniform_deduction_paise)
        .bind(guard.joining_date)
        .bind(guard.status)
        .bind(guard.created_at)
        .bind(guard.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing guard — whole-record, id-keyed replace.
    ///
    /// ## Errors
    /// * `DbError::Validation` - record fails preconditions
    /// * `DbError::NotFound` - no guard with this id
    pub async fn update(&self, guard: &Guard) -> DbResult<()> {
        validate_guard(guard)?;

        debug!(id = %guard.id, "Updating guard");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE guards SET
                name = ?2,
                code = ?3,
                phone = ?4,
                national_id = ?5,
                site_id = ?6,
                salary_per_shift_paise = ?7,
                food_cost_per_shift_paise = ?8,
                uniform_deduction_paise = ?9,
                joining_date = ?10,
                status = ?11,
                updated_at = ?12
            WHERE id = ?1
            "#,
        )
        .bind(&guard.id)
        .bind(&guard.name)
        .bind(&guard.code)
        .bind(&guard.phone)
        .bind(&guard.national_id)
        .bind(&guard.site_id)
        .bind(guard.salary_per_shift_paise)
        .bind(guard.food_cost_per_shift_paise)
        .bind(guard.uniform_deduction_paise)
        .bind(guard.joining_date)
        .bind(guard.status)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Guard", &guard.id));
        }

        Ok(())
    }

    /// Deletes a guard outright.
    ///
    /// Attendance and expense records referencing the guard are left in
    /// place; derivations render the unknown reference, they don't fail.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting guard");

        let result = sqlx::query("DELETE FROM guards WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Guard", id));
        }

        Ok(())
    }

    /// Counts guards (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guards")
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
    use crate::repository::test_support::{sample_guard, sample_site};
    use chrono::NaiveDate;
    use guardbook_core::{GuardStatus, Money};

    #[tokio::test]
    async fn test_insert_and_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let guard = sample_guard("Rajesh Kumar", Some("s1".to_string()));
        db.guards().insert(&guard).await.unwrap();

        let loaded = db.guards().get_by_id(&guard.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Rajesh Kumar");
        assert_eq!(loaded.site_id, Some("s1".to_string()));
        assert_eq!(loaded.salary_per_shift(), Money::from_rupees(600));
        assert_eq!(loaded.status, GuardStatus::Active);
        assert_eq!(
            loaded.joining_date,
            NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()
        );
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut guard = sample_guard("Amit Singh", None);
        db.guards().insert(&guard).await.unwrap();

        guard.site_id = Some("s2".to_string());
        guard.salary_per_shift_paise = Money::from_rupees(650).paise();
        guard.status = GuardStatus::Inactive;
        db.guards().update(&guard).await.unwrap();

        let loaded = db.guards().get_by_id(&guard.id).await.unwrap().unwrap();
        assert_eq!(loaded.site_id, Some("s2".to_string()));
        assert_eq!(loaded.salary_per_shift(), Money::from_rupees(650));
        assert_eq!(loaded.status, GuardStatus::Inactive);
    }

    #[tokio::test]
    async fn test_update_unknown_guard_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let guard = sample_guard("Nobody", None);
        assert!(matches!(
            db.guards().update(&guard).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let guard = sample_guard("", None);
        assert!(matches!(
            db.guards().insert(&guard).await,
            Err(DbError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_deleting_site_orphans_guard() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let site = sample_site("North Warehouse");
        db.sites().insert(&site).await.unwrap();

        let guard = sample_guard("Rajesh Kumar", Some(site.id.clone()));
        db.guards().insert(&guard).await.unwrap();

        db.sites().delete(&site.id).await.unwrap();

        // Guard survives with a dangling reference; lookup resolves to None
        let loaded = db.guards().get_by_id(&guard.id).await.unwrap().unwrap();
        assert_eq!(loaded.site_id, Some(site.id.clone()));
        assert!(db.sites().get_by_id(&site.id).await.unwrap().is_none());
    }
}
