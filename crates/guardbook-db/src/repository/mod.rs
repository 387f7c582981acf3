//! # Repository Implementations
//!
//! One repository per record type, each owning its SQL.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Repository Layout                                  │
//! │                                                                         │
//! │  Database (pool.rs)                                                    │
//! │      │                                                                  │
//! │      ├── sites()       → SiteRepository        getAll/add/delete       │
//! │      ├── guards()      → GuardRepository       + id-keyed update       │
//! │      ├── attendance()  → AttendanceRepository  upsert by natural key   │
//! │      ├── expenses()    → ExpenseRepository     getAll/add/delete       │
//! │      └── invoices()    → InvoiceRepository     embedded JSON documents │
//! │                                                                         │
//! │  Each repository validates preconditions (guardbook-core::validation)  │
//! │  before anything touches SQLite. Referential integrity is deliberately │
//! │  NOT enforced: dangling site/guard references are legal state.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod attendance;
pub mod expense;
pub mod guard;
pub mod invoice;
pub mod site;

/// Generates a fresh record ID.
///
/// UUID v4: globally unique without coordination, which keeps the store
/// offline-safe.
pub fn generate_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Shared Test Fixtures
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, Utc};
    use guardbook_core::{
        AttendanceRecord, ExpenseRecord, ExpenseType, Guard, GuardStatus, Money, ShiftStatus, Site,
    };

    use super::generate_record_id;

    pub fn sample_site(name: &str) -> Site {
        Site {
            id: generate_record_id(),
            name: name.to_string(),
            client_name: "Logistics Corp".to_string(),
            contact_number: "9876543210".to_string(),
            location: "Industrial Area A".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn sample_guard(name: &str, site_id: Option<String>) -> Guard {
        Guard {
            id: generate_record_id(),
            name: name.to_string(),
            code: "SG-101".to_string(),
            phone: "9988776655".to_string(),
            national_id: "1234-5678-9012".to_string(),
            site_id,
            salary_per_shift_paise: Money::from_rupees(600).paise(),
            food_cost_per_shift_paise: Money::from_rupees(50).paise(),
            uniform_deduction_paise: 0,
            joining_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            status: GuardStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// An all-unmarked attendance record; tests set the slots they need.
    pub fn sample_attendance(
        guard_id: &str,
        site_id: Option<String>,
        date: NaiveDate,
    ) -> AttendanceRecord {
        AttendanceRecord {
            id: generate_record_id(),
            guard_id: guard_id.to_string(),
            site_id,
            date,
            morning: ShiftStatus::unmarked(),
            evening: ShiftStatus::unmarked(),
            night: ShiftStatus::unmarked(),
            overtime_hrs: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn sample_expense(
        guard_id: &str,
        date: NaiveDate,
        rupees: i64,
        expense_type: ExpenseType,
    ) -> ExpenseRecord {
        ExpenseRecord {
            id: generate_record_id(),
            guard_id: guard_id.to_string(),
            date,
            amount_paise: Money::from_rupees(rupees).paise(),
            reason: "test".to_string(),
            expense_type,
            created_at: Utc::now(),
        }
    }
}
