//! # Payroll Engine
//!
//! Joins guards, attendance, and expenses into the monthly salary statement.
//!
//! ## Computation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Salary Slip Derivation                               │
//! │                                                                         │
//! │  For EVERY guard in the store (active or not):                         │
//! │                                                                         │
//! │  1. month_totals(attendance, guard, month)                             │
//! │         └── present_shifts, food_taken_shifts                          │
//! │                                                                         │
//! │  2. Sum expenses for (guard, month) — all types                        │
//! │                                                                         │
//! │  3. gross  = present_shifts × salary_per_shift                         │
//! │     food   = food_taken_shifts × food_cost_per_shift                   │
//! │     net    = gross − advance − food − uniform_deduction                │
//! │                                                                         │
//! │  A guard with no activity gets an all-zero slip, not an omission.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! For a fixed input and month the output is pure and repeatable: no clock,
//! no randomness, no mutation of the inputs.

use serde::{Deserialize, Serialize};

use crate::attendance::month_totals;
use crate::money::Money;
use crate::types::{AttendanceRecord, ExpenseRecord, ExpenseType, Guard, Month, SalarySlip};

// =============================================================================
// Slip Computation
// =============================================================================

/// Computes one salary slip per guard for the given month.
///
/// Slips come back in the same order as `guards`. Guards with zero
/// attendance and zero expenses still get a slip with every numeric field
/// at 0 so they appear in the report. Inactive guards are not filtered:
/// historical payroll for terminated staff stays computable, and callers
/// who want only active staff can filter on `Guard::status` themselves.
pub fn compute_salary_slips(
    month: Month,
    guards: &[Guard],
    attendance: &[AttendanceRecord],
    expenses: &[ExpenseRecord],
) -> Vec<SalarySlip> {
    guards
        .iter()
        .map(|guard| compute_slip(month, guard, attendance, expenses))
        .collect()
}

/// Computes a single guard's slip for the month.
pub fn compute_slip(
    month: Month,
    guard: &Guard,
    attendance: &[AttendanceRecord],
    expenses: &[ExpenseRecord],
) -> SalarySlip {
    let totals = month_totals(attendance, &guard.id, month);

    // All expense types count toward the advance column, matching the
    // ledger the business actually runs. expense_breakdown() has the
    // per-type split for callers that want it.
    let total_advance: Money = expenses
        .iter()
        .filter(|e| e.guard_id == guard.id && month.contains(e.date))
        .map(ExpenseRecord::amount)
        .sum();

    let gross = guard
        .salary_per_shift()
        .multiply_count(i64::from(totals.present_shifts));
    let food = guard
        .food_cost_per_shift()
        .multiply_count(i64::from(totals.food_taken_shifts));
    let net = gross - total_advance - food - guard.uniform_deduction();

    SalarySlip {
        guard_id: guard.id.clone(),
        guard_name: guard.name.clone(),
        month,
        total_shifts: totals.present_shifts,
        gross_salary_paise: gross.paise(),
        total_advance_paise: total_advance.paise(),
        total_food_cost_paise: food.paise(),
        uniform_deduction_paise: guard.uniform_deduction_paise,
        net_salary_paise: net.paise(),
    }
}

// =============================================================================
// Report Totals
// =============================================================================

/// Column totals across a set of slips, for the report footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub total_shifts: u32,
    pub gross_salary_paise: i64,
    pub total_advance_paise: i64,
    pub total_food_cost_paise: i64,
    pub uniform_deduction_paise: i64,
    pub net_salary_paise: i64,
}

impl ReportTotals {
    /// Sums every numeric column across the slips.
    pub fn from_slips(slips: &[SalarySlip]) -> Self {
        let mut totals = ReportTotals::default();
        for slip in slips {
            totals.total_shifts += slip.total_shifts;
            totals.gross_salary_paise += slip.gross_salary_paise;
            totals.total_advance_paise += slip.total_advance_paise;
            totals.total_food_cost_paise += slip.total_food_cost_paise;
            totals.uniform_deduction_paise += slip.uniform_deduction_paise;
            totals.net_salary_paise += slip.net_salary_paise;
        }
        totals
    }

    #[inline]
    pub fn net_salary(&self) -> Money {
        Money::from_paise(self.net_salary_paise)
    }
}

// =============================================================================
// Expense Breakdown
// =============================================================================

/// Per-type expense sums for one guard in one month.
///
/// The slip's `total_advance` folds Advance, Fine, and Other together; this
/// is the partitioned alternative for callers that want type-accurate
/// deduction lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub advance_paise: i64,
    pub fine_paise: i64,
    pub other_paise: i64,
}

impl ExpenseBreakdown {
    /// Sum of all three buckets; equals the slip's `total_advance`.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.advance_paise + self.fine_paise + self.other_paise)
    }
}

/// Partitions a guard's monthly expenses by type.
pub fn expense_breakdown(
    expenses: &[ExpenseRecord],
    guard_id: &str,
    month: Month,
) -> ExpenseBreakdown {
    let mut breakdown = ExpenseBreakdown::default();

    for expense in expenses
        .iter()
        .filter(|e| e.guard_id == guard_id && month.contains(e.date))
    {
        match expense.expense_type {
            ExpenseType::Advance => breakdown.advance_paise += expense.amount_paise,
            ExpenseType::Fine => breakdown.fine_paise += expense.amount_paise,
            ExpenseType::Other => breakdown.other_paise += expense.amount_paise,
        }
    }

    breakdown
}

// =============================================================================
// Unit Tests
// =============================================================================
