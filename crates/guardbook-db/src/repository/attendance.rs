//! # Attendance Repository
//!
//! Database operations for attendance records.
//!
//! ## Upsert by Natural Key
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  save_record(guard, date, marks)                        │
//! │                                                                         │
//! │  INSERT ... ON CONFLICT (guard_id, date) DO UPDATE                     │
//! │       │                                                                 │
//! │       ├── No row for (guard, date)  → new row                          │
//! │       │                                                                 │
//! │       └── Row exists               → content replaced, the stored      │
//! │                                       row keeps its original id        │
//! │                                                                         │
//! │  Marking the same sheet twice can never produce two rows for one       │
//! │  guard-day, no matter what id the caller generated.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use guardbook_core::{AttendanceRecord, ShiftStatus};

/// Repository for attendance database operations.
#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: SqlitePool,
}

const ATTENDANCE_COLUMNS: &str = r#"
    id, guard_id, site_id, date,
    morning_status, morning_food_taken,
    evening_status, evening_food_taken,
    night_status, night_food_taken,
    overtime_hrs, updated_at
"#;

impl AttendanceRepository {
    /// Creates a new AttendanceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AttendanceRepository { pool }
    }

    /// Lists all attendance records, oldest date first.
    pub async fn get_all(&self) -> DbResult<Vec<AttendanceRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance_records ORDER BY date, guard_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }

    /// The attendance sheet: every record for one date at one site.
    pub async fn get_by_date_and_site(
        &self,
        date: NaiveDate,
        site_id: &str,
    ) -> DbResult<Vec<AttendanceRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance_records \
             WHERE date = ?1 AND site_id = ?2 ORDER BY guard_id"
        ))
        .bind(date)
        .bind(site_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }

    /// Saves a record, replacing any existing one for `(guard_id, date)`.
    ///
    /// Food flags on non-Present slots are cleared before writing, so stale
    /// UI state never reaches the food-cost computation. Saving identical
    /// content twice is idempotent: one row.
    pub async fn save_record(&self, record: &AttendanceRecord) -> DbResult<()> {
        let mut record = record.clone();
        record.normalize();

        debug!(
            guard_id = %record.guard_id,
            date = %record.date,
            "Saving attendance record"
        );

        sqlx::query(
            r#"
            INSERT INTO attendance_records (
                id, guard_id, site_id, date,
                morning_status, morning_food_taken,
                evening_status, evening_food_taken,
                night_status, night_food_taken,
                overtime_hrs, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT (guard_id, date) DO UPDATE SET
                site_id = excluded.site_id,
                morning_status = excluded.morning_status,
                morning_food_taken = excluded.morning_food_taken,
                evening_status = excluded.evening_status,
                evening_food_taken = excluded.evening_food_taken,
                night_status = excluded.night_status,
                night_food_taken = excluded.night_food_taken,
                overtime_hrs = excluded.overtime_hrs,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&record.id)
        .bind(&record.guard_id)
        .bind(&record.site_id)
        .bind(record.date)
        .bind(record.morning.status)
        .bind(record.morning.food_taken)
        .bind(record.evening.status)
        .bind(record.evening.food_taken)
        .bind(record.night.status)
        .bind(record.night.food_taken)
        .bind(record.overtime_hrs)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts attendance records (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance_records")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Maps a row onto the domain record.
///
/// Hand-written because the three shift slots are nested pairs of columns;
/// FromRow can't express that shape.
fn record_from_row(row: &SqliteRow) -> DbResult<AttendanceRecord> {
    Ok(AttendanceRecord {
        id: row.try_get("id")?,
        guard_id: row.try_get("guard_id")?,
        site_id: row.try_get("site_id")?,
        date: row.try_get("date")?,
        morning: ShiftStatus {
            status: row.try_get("morning_status")?,
            food_taken: row.try_get("morning_food_taken")?,
        },
        evening: ShiftStatus {
            status: row.try_get("evening_status")?,
            food_taken: row.try_get("evening_food_taken")?,
        },
        night: ShiftStatus {
            status: row.try_get("night_status")?,
            food_taken: row.try_get("night_food_taken")?,
        },
        overtime_hrs: row.try_get("overtime_hrs")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::test_support::sample_attendance;
    use guardbook_core::{ShiftMark, ShiftStatus};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, d).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut record = sample_attendance("g1", Some("s1".to_string()), day(15));
        record.morning = ShiftStatus::present(true);
        record.evening = ShiftStatus::absent();
        record.overtime_hrs = 2;
        db.attendance().save_record(&record).await.unwrap();

        let loaded = db
            .attendance()
            .get_by_date_and_site(day(15), "s1")
            .await
            .unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].morning, ShiftStatus::present(true));
        assert_eq!(loaded[0].evening.status, ShiftMark::Absent);
        assert_eq!(loaded[0].night.status, ShiftMark::Unmarked);
        assert_eq!(loaded[0].overtime_hrs, 2);
    }

    #[tokio::test]
    async fn test_saving_twice_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut record = sample_attendance("g1", Some("s1".to_string()), day(15));
        record.morning = ShiftStatus::present(false);

        db.attendance().save_record(&record).await.unwrap();
        db.attendance().save_record(&record).await.unwrap();

        assert_eq!(db.attendance().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_content_keeps_row() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut first = sample_attendance("g1", Some("s1".to_string()), day(15));
        first.morning = ShiftStatus::present(false);
        db.attendance().save_record(&first).await.unwrap();

        // Second mark for the same guard-day, fresh id from the caller
        let mut second = sample_attendance("g1", Some("s1".to_string()), day(15));
        second.morning = ShiftStatus::absent();
        second.night = ShiftStatus::present(true);
        db.attendance().save_record(&second).await.unwrap();

        let loaded = db
            .attendance()
            .get_by_date_and_site(day(15), "s1")
            .await
            .unwrap();
        assert_eq!(loaded.len(), 1);
        // Second content wins, stored row keeps its original identity
        assert_eq!(loaded[0].morning.status, ShiftMark::Absent);
        assert_eq!(loaded[0].night, ShiftStatus::present(true));
        assert_eq!(loaded[0].id, first.id);
    }

    #[tokio::test]
    async fn test_distinct_guard_days_do_not_collide() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        for (guard, d) in [("g1", 15), ("g1", 16), ("g2", 15)] {
            let record = sample_attendance(guard, Some("s1".to_string()), day(d));
            db.attendance().save_record(&record).await.unwrap();
        }

        assert_eq!(db.attendance().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_food_flag_cleared_on_non_present_slots() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut record = sample_attendance("g1", Some("s1".to_string()), day(15));
        record.morning = ShiftStatus {
            status: ShiftMark::Absent,
            food_taken: true,
        };
        db.attendance().save_record(&record).await.unwrap();

        let loaded = db
            .attendance()
            .get_by_date_and_site(day(15), "s1")
            .await
            .unwrap();
        assert!(!loaded[0].morning.food_taken);
    }

    #[tokio::test]
    async fn test_sheet_filters_by_date_and_site() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let here = sample_attendance("g1", Some("s1".to_string()), day(15));
        let other_site = sample_attendance("g2", Some("s2".to_string()), day(15));
        let other_day = sample_attendance("g3", Some("s1".to_string()), day(16));
        for record in [&here, &other_site, &other_day] {
            db.attendance().save_record(record).await.unwrap();
        }

        let sheet = db
            .attendance()
            .get_by_date_and_site(day(15), "s1")
            .await
            .unwrap();
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet[0].guard_id, "g1");
    }
}
