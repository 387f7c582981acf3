//! # Report Queries
//!
//! The joins that feed the salary report and the guard roster view.
//!
//! ## Division of Labor
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  guardbook-db (this module)          guardbook-core                    │
//! │  ──────────────────────────          ───────────────                   │
//! │  load guards, attendance,     ───►   compute_salary_slips()            │
//! │  expenses from SQLite                ReportTotals::from_slips()        │
//! │                                                                         │
//! │  The derivation itself stays pure: same store state + month in,        │
//! │  same report out.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DbResult;
use crate::pool::Database;
use guardbook_core::payroll::{compute_salary_slips, ReportTotals};
use guardbook_core::{Guard, Month, SalarySlip};

/// Label shown for a guard whose site reference is missing or dangling.
pub const UNASSIGNED_SITE: &str = "Unassigned";

/// The monthly salary statement: one slip per guard plus column totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryReport {
    pub month: Month,
    pub slips: Vec<SalarySlip>,
    pub totals: ReportTotals,
}

/// A roster row: the guard plus its resolved site name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub guard: Guard,
    /// The posted site's name, or [`UNASSIGNED_SITE`] when the guard has no
    /// site or the referenced site was deleted.
    pub site_name: String,
}

impl Database {
    /// Computes the salary statement for a month across the whole roster.
    ///
    /// Every guard appears, including inactive ones and ones with no
    /// activity in the month (their slips are all zeros).
    pub async fn salary_report(&self, month: Month) -> DbResult<SalaryReport> {
        debug!(month = %month, "Computing salary report");

        let guards = self.guards().get_all().await?;
        let attendance = self.attendance().get_all().await?;
        let expenses = self.expenses().get_all().await?;

        let slips = compute_salary_slips(month, &guards, &attendance, &expenses);
        let totals = ReportTotals::from_slips(&slips);

        debug!(
            month = %month,
            guards = slips.len(),
            net_paise = totals.net_salary_paise,
            "Salary report computed"
        );

        Ok(SalaryReport {
            month,
            slips,
            totals,
        })
    }

    /// The guard roster with site names resolved.
    ///
    /// Dangling site references are legal state and resolve to
    /// [`UNASSIGNED_SITE`], never an error.
    pub async fn guard_roster(&self) -> DbResult<Vec<RosterEntry>> {
        let sites = self.sites().get_all().await?;
        let guards = self.guards().get_all().await?;

        let entries = guards
            .into_iter()
            .map(|guard| {
                let site_name = guard
                    .site_id
                    .as_deref()
                    .and_then(|id| sites.iter().find(|s| s.id == id))
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| UNASSIGNED_SITE.to_string());
                RosterEntry { guard, site_name }
            })
            .collect();

        Ok(entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use crate::repository::test_support::{
        sample_attendance, sample_expense, sample_guard, sample_site,
    };
    use chrono::NaiveDate;
    use guardbook_core::{ExpenseType, Money, ShiftStatus};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, d).unwrap()
    }

    /// End-to-end rendition of the worked example: 600/shift, food 50,
    /// uniform 100, 20 Present shifts with 10 food, 500 in expenses.
    #[tokio::test]
    async fn test_salary_report_reference_scenario() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut guard = sample_guard("Rajesh Kumar", None);
        guard.uniform_deduction_paise = Money::from_rupees(100).paise();
        db.guards().insert(&guard).await.unwrap();

        // 20 Present shifts over 7 days, 10 of them with food
        let mut food_left = 10;
        let mut shifts_left = 20;
        let mut d = 1;
        while shifts_left > 0 {
            let mut record = sample_attendance(&guard.id, None, day(d));
            for slot in guardbook_core::Shift::ALL {
                if shifts_left == 0 {
                    break;
                }
                *record.shift_mut(slot) = ShiftStatus::present(food_left > 0);
                if food_left > 0 {
                    food_left -= 1;
                }
                shifts_left -= 1;
            }
            db.attendance().save_record(&record).await.unwrap();
            d += 1;
        }

        db.expenses()
            .insert(&sample_expense(&guard.id, day(5), 300, ExpenseType::Advance))
            .await
            .unwrap();
        db.expenses()
            .insert(&sample_expense(&guard.id, day(18), 200, ExpenseType::Fine))
            .await
            .unwrap();

        let report = db.salary_report(Month::new(2026, 7)).await.unwrap();
        assert_eq!(report.slips.len(), 1);

        let slip = &report.slips[0];
        assert_eq!(slip.total_shifts, 20);
        assert_eq!(slip.gross_salary().rupees(), 12000);
        assert_eq!(slip.total_food_cost().rupees(), 500);
        assert_eq!(slip.total_advance().rupees(), 500);
        assert_eq!(slip.net_salary().rupees(), 10900);

        // Single-guard report: totals mirror the slip
        assert_eq!(report.totals.net_salary_paise, slip.net_salary_paise);
        assert_eq!(report.totals.total_shifts, 20);
    }

    #[tokio::test]
    async fn test_report_includes_idle_guards_with_zero_slips() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.guards()
            .insert(&sample_guard("Amit Singh", None))
            .await
            .unwrap();

        let report = db.salary_report(Month::new(2026, 7)).await.unwrap();
        assert_eq!(report.slips.len(), 1);
        assert_eq!(report.slips[0].total_shifts, 0);
        assert_eq!(report.slips[0].net_salary_paise, 0);
    }

    #[tokio::test]
    async fn test_roster_resolves_site_names_and_tolerates_dangling() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let site = sample_site("North Warehouse");
        db.sites().insert(&site).await.unwrap();

        db.guards()
            .insert(&sample_guard("Posted", Some(site.id.clone())))
            .await
            .unwrap();
        db.guards()
            .insert(&sample_guard("Unposted", None))
            .await
            .unwrap();
        db.guards()
            .insert(&sample_guard("Orphaned", Some("gone".to_string())))
            .await
            .unwrap();

        let roster = db.guard_roster().await.unwrap();
        let by_name = |name: &str| {
            roster
                .iter()
                .find(|e| e.guard.name == name)
                .unwrap()
                .site_name
                .clone()
        };

        assert_eq!(by_name("Posted"), "North Warehouse");
        assert_eq!(by_name("Unposted"), UNASSIGNED_SITE);
        assert_eq!(by_name("Orphaned"), UNASSIGNED_SITE);
    }

    #[tokio::test]
    async fn test_report_after_site_deletion_still_computes() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let site = sample_site("North Warehouse");
        db.sites().insert(&site).await.unwrap();

        let guard = sample_guard("Rajesh Kumar", Some(site.id.clone()));
        db.guards().insert(&guard).await.unwrap();

        let mut record = sample_attendance(&guard.id, Some(site.id.clone()), day(1));
        record.morning = ShiftStatus::present(false);
        db.attendance().save_record(&record).await.unwrap();

        db.sites().delete(&site.id).await.unwrap();

        let report = db.salary_report(Month::new(2026, 7)).await.unwrap();
        assert_eq!(report.slips[0].total_shifts, 1);
        assert_eq!(report.slips[0].gross_salary().rupees(), 600);
    }
}
