//! # Demo Data Seeding
//!
//! First-run seed: two demo sites and three demo guards, so a fresh install
//! opens onto a working roster instead of empty tables.
//!
//! ## One-Time Guard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Database::new (seed_demo = true)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  app_meta['demo_seeded'] present? ──── yes ──► skip, nothing written   │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  insert 2 sites + 3 guards, set the marker                             │
//! │                                                                         │
//! │  Attendance and expenses always start empty.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;
use crate::repository::generate_record_id;
use guardbook_core::{Guard, GuardStatus, Money, Site};

/// app_meta key marking that the demo seed already ran.
const SEED_MARKER_KEY: &str = "demo_seeded";

/// Seeds demo sites and guards exactly once per database.
///
/// Returns `true` if this call performed the seed, `false` if the marker
/// showed it already ran.
pub async fn seed_demo_data(db: &Database) -> DbResult<bool> {
    let already_seeded: Option<String> =
        sqlx::query_scalar("SELECT value FROM app_meta WHERE key = ?1")
            .bind(SEED_MARKER_KEY)
            .fetch_optional(db.pool())
            .await?;

    if already_seeded.is_some() {
        return Ok(false);
    }

    info!("Seeding demo sites and guards");

    let now = Utc::now();

    let warehouse = Site {
        id: generate_record_id(),
        name: "North Warehouse".to_string(),
        client_name: "Logistics Corp".to_string(),
        contact_number: "9876543210".to_string(),
        location: "Industrial Area A".to_string(),
        created_at: now,
        updated_at: now,
    };
    let mall = Site {
        id: generate_record_id(),
        name: "City Mall".to_string(),
        client_name: "Retail Giants".to_string(),
        contact_number: "9123456780".to_string(),
        location: "City Center".to_string(),
        created_at: now,
        updated_at: now,
    };

    db.sites().insert(&warehouse).await?;
    db.sites().insert(&mall).await?;

    let guards = [
        demo_guard(
            "Rajesh Kumar",
            "SG-101",
            "9988776655",
            "1234-5678-9012",
            &warehouse.id,
            600,
            50,
            0,
            (2023, 1, 15),
        ),
        demo_guard(
            "Amit Singh",
            "SG-102",
            "8877665544",
            "5678-1234-9012",
            &warehouse.id,
            550,
            50,
            100,
            (2023, 3, 10),
        ),
        demo_guard(
            "Suresh Patil",
            "SG-103",
            "7766554433",
            "9012-5678-1234",
            &mall.id,
            700,
            60,
            0,
            (2023, 6, 20),
        ),
    ];

    for guard in &guards {
        db.guards().insert(guard).await?;
    }

    sqlx::query("INSERT INTO app_meta (key, value) VALUES (?1, 'true')")
        .bind(SEED_MARKER_KEY)
        .execute(db.pool())
        .await?;

    info!(sites = 2, guards = guards.len(), "Demo data seeded");
    Ok(true)
}

#[allow(clippy::too_many_arguments)]
fn demo_guard(
    name: &str,
    code: &str,
    phone: &str,
    national_id: &str,
    site_id: &str,
    salary: i64,
    food: i64,
    uniform: i64,
    joined: (i32, u32, u32),
) -> Guard {
    let now = Utc::now();
    Guard {
        id: generate_record_id(),
        name: name.to_string(),
        code: code.to_string(),
        phone: phone.to_string(),
        national_id: national_id.to_string(),
        site_id: Some(site_id.to_string()),
        salary_per_shift_paise: Money::from_rupees(salary).paise(),
        food_cost_per_shift_paise: Money::from_rupees(food).paise(),
        uniform_deduction_paise: Money::from_rupees(uniform).paise(),
        joining_date: NaiveDate::from_ymd_opt(joined.0, joined.1, joined.2)
            .expect("demo joining date is valid"),
        status: GuardStatus::Active,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;

    #[tokio::test]
    async fn test_seed_runs_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(seed_demo_data(&db).await.unwrap());
        assert!(!seed_demo_data(&db).await.unwrap());

        assert_eq!(db.sites().count().await.unwrap(), 2);
        assert_eq!(db.guards().count().await.unwrap(), 3);
        assert_eq!(db.attendance().count().await.unwrap(), 0);
        assert_eq!(db.expenses().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seed_on_startup_flag() {
        let db = Database::new(DbConfig::in_memory().seed_demo(true))
            .await
            .unwrap();

        assert_eq!(db.guards().count().await.unwrap(), 3);
        // A second explicit call is still a no-op
        assert!(!seed_demo_data(&db).await.unwrap());
        assert_eq!(db.guards().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_demo_guards_reference_seeded_sites() {
        let db = Database::new(DbConfig::in_memory().seed_demo(true))
            .await
            .unwrap();

        let sites = db.sites().get_all().await.unwrap();
        let guards = db.guards().get_all().await.unwrap();

        for guard in &guards {
            let site_id = guard.site_id.as_deref().unwrap();
            assert!(sites.iter().any(|s| s.id == site_id));
        }
    }
}
