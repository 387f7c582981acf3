//! # Attendance Aggregation
//!
//! Turns raw attendance records into the per-guard monthly shift counts the
//! payroll engine consumes.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  All AttendanceRecords                                                  │
//! │       │                                                                 │
//! │       ▼  filter: guard_id matches AND date inside month                 │
//! │  Records for (guard, month)                                             │
//! │       │                                                                 │
//! │       ▼  per record: walk morning/evening/night                         │
//! │  Present            → present_shifts += 1                               │
//! │  Present + food     → food_taken_shifts += 1                            │
//! │  Absent / Unmarked  → contributes nothing (not an error)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sums are commutative; iteration order never changes the result.

use crate::types::{AttendanceRecord, Month};

// =============================================================================
// Shift Totals
// =============================================================================

/// Monthly shift counts for one guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftTotals {
    /// Present marks across all three slots.
    pub present_shifts: u32,

    /// Present marks that also took food.
    pub food_taken_shifts: u32,
}

/// Counts a guard's Present and food-taken shifts for a month.
///
/// A record with all three slots Unmarked or Absent contributes zero; it is
/// legal state, not an error. Food flags on non-Present slots are ignored
/// even if a caller managed to persist them.
///
/// ## Example
/// ```rust
/// use guardbook_core::attendance::month_totals;
/// use guardbook_core::types::Month;
///
/// let totals = month_totals(&[], "g1", Month::new(2026, 7));
/// assert_eq!(totals.present_shifts, 0);
/// ```
pub fn month_totals(records: &[AttendanceRecord], guard_id: &str, month: Month) -> ShiftTotals {
    let mut totals = ShiftTotals::default();

    for record in records
        .iter()
        .filter(|r| r.guard_id == guard_id && month.contains(r.date))
    {
        for (_, slot) in record.shifts() {
            if slot.is_present() {
                totals.present_shifts += 1;
                if slot.food_taken {
                    totals.food_taken_shifts += 1;
                }
            }
        }
    }

    totals
}

// =============================================================================
// Unit Tests
// =============================================================================
