//! # Site Repository
//!
//! Database operations for client sites.
//!
//! Deleting a site never cascades: guards keep their `site_id` and every
//! consumer renders the dangling reference as "Unassigned".

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use guardbook_core::validation::validate_site;
use guardbook_core::Site;

/// Repository for site database operations.
#[derive(Debug, Clone)]
pub struct SiteRepository {
    pool: SqlitePool,
}

impl SiteRepository {
    /// Creates a new SiteRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SiteRepository { pool }
    }

    /// Lists all sites, sorted by name.
    pub async fn get_all(&self) -> DbResult<Vec<Site>> {
        let sites = sqlx::query_as::<_, Site>(
            r#"
            SELECT id, name, client_name, contact_number, location,
                   created_at, updated_at
            FROM sites
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sites)
    }

    /// Gets a site by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Site))` - Site found
    /// * `Ok(None)` - Site not found (a dangling reference resolves here)
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Site>> {
        let site = sqlx::query_as::<_, Site>(
            r#"
            SELECT id, name, client_name, contact_number, location,
                   created_at, updated_at
            FROM sites
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(site)
    }

    /// Inserts a new site.
    ///
    /// ## Errors
    /// * `DbError::Validation` - empty site name
    /// * `DbError::UniqueViolation` - id already exists
    pub async fn insert(&self, site: &Site) -> DbResult<()> {
        validate_site(site)?;

        debug!(id = %site.id, name = %site.name, "Inserting site");

        sqlx::query(
            r#"
            INSERT INTO sites (
                id, name, client_name, contact_number, location,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&site.id)
        .bind(&site.name)
        .bind(&site.client_name)
        .bind(&site.contact_number)
        .bind(&site.location)
        .bind(site.created_at)
        .bind(site.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes a site outright.
    ///
    /// Physical and immediate — no tombstone. Guards posted here are left
    /// untouched with a now-dangling `site_id`.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting site");

        let result = sqlx::query("DELETE FROM sites WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Site", id));
        }

        Ok(())
    }

    /// Counts sites (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sites")
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
    use crate::repository::test_support::sample_site as site;

    #[tokio::test]
    async fn test_insert_and_get_all() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.sites().insert(&site("North Warehouse")).await.unwrap();
        db.sites().insert(&site("City Mall")).await.unwrap();

        let all = db.sites().get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        // Sorted by name
        assert_eq!(all[0].name, "City Mall");
        assert_eq!(all[1].name, "North Warehouse");
    }

    #[tokio::test]
    async fn test_empty_name_rejected_before_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let result = db.sites().insert(&site("   ")).await;
        assert!(matches!(result, Err(DbError::Validation(_))));
        assert_eq!(db.sites().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let s = site("North Warehouse");
        db.sites().insert(&s).await.unwrap();
        db.sites().delete(&s.id).await.unwrap();

        assert!(db.sites().get_by_id(&s.id).await.unwrap().is_none());
        assert!(matches!(
            db.sites().delete(&s.id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
