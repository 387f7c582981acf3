//! # Domain Types
//!
//! Core record types used throughout GuardBook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Site       │   │      Guard      │   │ AttendanceRecord│       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  code (SG-101)  │   │  (guard_id,date)│       │
//! │  │  client_name    │   │  site_id?       │   │   natural key   │       │
//! │  │  location       │   │  pay rates      │   │  3 × ShiftStatus│       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ExpenseRecord  │   │   SalarySlip    │   │     Invoice     │       │
//! │  │  ─────────────  │   │   (derived,     │   │  line items +   │       │
//! │  │  Advance/Fine/  │   │  not persisted) │   │  embedded docs  │       │
//! │  │  Other          │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every persisted entity has an `id` (UUID v4, immutable). AttendanceRecord
//! additionally has a natural key `(guard_id, date)` which drives upsert
//! behavior in the store; Guard has a human-readable employee `code` that is
//! unique by convention only.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Month
// =============================================================================

/// A calendar month, the unit payroll is computed over.
///
/// Serializes as a `YYYY-MM` string so it matches the store's date prefix
/// convention and whatever the presentation layer's month picker emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month. `month` is 1-12.
    #[inline]
    pub const fn new(year: i32, month: u32) -> Self {
        Month { year, month }
    }

    /// The month a given date falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Checks whether a date falls inside this month.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFormat {
            field: "month".to_string(),
            reason: "expected YYYY-MM".to_string(),
        };

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Month { year, month })
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Site
// =============================================================================

/// A client site guards are posted at.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Site {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name of the site (required at creation).
    pub name: String,

    /// Name of the client company billed for this site.
    pub client_name: String,

    /// Client contact number.
    pub contact_number: String,

    /// Free-text location description.
    pub location: String,

    /// When the site was created.
    pub created_at: DateTime<Utc>,

    /// When the site was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Guard Status
// =============================================================================

/// Employment status of a guard.
///
/// Inactive guards stay in the store: historical payroll for terminated
/// staff must remain computable, so nothing downstream filters on this
/// automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum GuardStatus {
    Active,
    Inactive,
}

impl Default for GuardStatus {
    fn default() -> Self {
        GuardStatus::Active
    }
}

// =============================================================================
// Guard
// =============================================================================

/// A security guard on the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Guard {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Full name (required at creation).
    pub name: String,

    /// Short employee code, e.g. "SG-101". Unique by convention, not enforced.
    pub code: String,

    /// Phone number.
    pub phone: String,

    /// National identity number, stored as an opaque string.
    pub national_id: String,

    /// Posted site. `None` when unassigned; a dangling reference to a
    /// deleted site is tolerated and rendered as "Unassigned" downstream.
    pub site_id: Option<String>,

    /// Pay per worked shift, in paise.
    pub salary_per_shift_paise: i64,

    /// Deduction per shift on which food was taken, in paise.
    pub food_cost_per_shift_paise: i64,

    /// Uniform deduction in paise. One-time or recurring is the caller's
    /// choice; payroll applies it to every month it computes.
    pub uniform_deduction_paise: i64,

    /// Date of joining.
    pub joining_date: NaiveDate,

    /// Employment status.
    pub status: GuardStatus,

    /// When the guard was created.
    pub created_at: DateTime<Utc>,

    /// When the guard was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Guard {
    /// Returns the per-shift pay as Money.
    #[inline]
    pub fn salary_per_shift(&self) -> Money {
        Money::from_paise(self.salary_per_shift_paise)
    }

    /// Returns the per-shift food deduction as Money.
    #[inline]
    pub fn food_cost_per_shift(&self) -> Money {
        Money::from_paise(self.food_cost_per_shift_paise)
    }

    /// Returns the uniform deduction as Money.
    #[inline]
    pub fn uniform_deduction(&self) -> Money {
        Money::from_paise(self.uniform_deduction_paise)
    }
}

// =============================================================================
// Shifts
// =============================================================================

/// One of the three fixed daily work periods.
///
/// Slot access is by exhaustive match on this enum; there is deliberately no
/// string-keyed lookup anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    Morning,
    Evening,
    Night,
}

impl Shift {
    /// All shift slots, in day order. Iteration order never affects any
    /// computed total (sums are commutative), it only fixes display order.
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Evening, Shift::Night];
}

/// Tri-state attendance mark for a single shift slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum ShiftMark {
    Unmarked,
    Present,
    Absent,
}

impl Default for ShiftMark {
    fn default() -> Self {
        ShiftMark::Unmarked
    }
}

/// Attendance state of one shift slot: the mark plus whether food was taken.
///
/// `food_taken` is only meaningful while `status == Present`. [`normalized`]
/// clears it otherwise, and aggregation ignores it regardless.
///
/// [`normalized`]: ShiftStatus::normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShiftStatus {
    pub status: ShiftMark,
    pub food_taken: bool,
}

impl ShiftStatus {
    /// An unmarked slot with no food taken.
    pub const fn unmarked() -> Self {
        ShiftStatus {
            status: ShiftMark::Unmarked,
            food_taken: false,
        }
    }

    /// A Present mark, optionally with food taken.
    pub const fn present(food_taken: bool) -> Self {
        ShiftStatus {
            status: ShiftMark::Present,
            food_taken,
        }
    }

    /// An Absent mark.
    pub const fn absent() -> Self {
        ShiftStatus {
            status: ShiftMark::Absent,
            food_taken: false,
        }
    }

    /// Whether this slot counts as a worked shift.
    #[inline]
    pub fn is_present(&self) -> bool {
        self.status == ShiftMark::Present
    }

    /// Whether this slot incurs a food deduction. False unless Present.
    #[inline]
    pub fn food_deducted(&self) -> bool {
        self.is_present() && self.food_taken
    }

    /// Returns a copy with the food flag cleared unless the mark is Present.
    pub fn normalized(self) -> Self {
        ShiftStatus {
            status: self.status,
            food_taken: self.food_deducted(),
        }
    }
}

// =============================================================================
// Attendance Record
// =============================================================================

/// One guard's attendance for one date, across all three shift slots.
///
/// ## Natural Key
/// At most one record exists per `(guard_id, date)`. The store enforces this
/// with a unique index and upsert-by-key; the `id` field is identity only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The guard this record marks.
    pub guard_id: String,

    /// Denormalized copy of the guard's site at marking time, so the sheet
    /// for a date+site stays stable even if the guard is reassigned later.
    pub site_id: Option<String>,

    /// The calendar date being marked.
    pub date: NaiveDate,

    pub morning: ShiftStatus,
    pub evening: ShiftStatus,
    pub night: ShiftStatus,

    /// Overtime hours for the day. The UI keeps this in 0-12; the store
    /// does not hard-enforce it.
    pub overtime_hrs: i64,

    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Returns the status of the given shift slot.
    pub fn shift(&self, shift: Shift) -> &ShiftStatus {
        match shift {
            Shift::Morning => &self.morning,
            Shift::Evening => &self.evening,
            Shift::Night => &self.night,
        }
    }

    /// Mutable access to the given shift slot.
    pub fn shift_mut(&mut self, shift: Shift) -> &mut ShiftStatus {
        match shift {
            Shift::Morning => &mut self.morning,
            Shift::Evening => &mut self.evening,
            Shift::Night => &mut self.night,
        }
    }

    /// Iterates the three shift slots in day order.
    pub fn shifts(&self) -> impl Iterator<Item = (Shift, &ShiftStatus)> {
        Shift::ALL.iter().map(move |s| (*s, self.shift(*s)))
    }

    /// Clears food flags on every slot that is not marked Present.
    pub fn normalize(&mut self) {
        for slot in Shift::ALL {
            let status = self.shift(slot).normalized();
            *self.shift_mut(slot) = status;
        }
    }
}

// =============================================================================
// Expense Record
// =============================================================================

/// Category of a cash entry against a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum ExpenseType {
    Advance,
    Fine,
    Other,
}

/// A cash advance, fine, or other deduction entry for a guard.
///
/// No natural key: several entries per guard per day are legal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ExpenseRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The guard this entry is charged against.
    pub guard_id: String,

    /// Date of the entry.
    pub date: NaiveDate,

    /// Amount in paise. Must be positive; enforced at the store boundary.
    pub amount_paise: i64,

    /// Free-text reason.
    pub reason: String,

    /// Category of the entry.
    pub expense_type: ExpenseType,

    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

impl ExpenseRecord {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_paise(self.amount_paise)
    }
}

// =============================================================================
// Salary Slip
// =============================================================================

/// One guard's computed pay statement for a month.
///
/// Derived on demand by the payroll engine; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalarySlip {
    pub guard_id: String,
    pub guard_name: String,
    pub month: Month,

    /// Count of Present marks across all three slots for the month.
    pub total_shifts: u32,

    /// `total_shifts × salary_per_shift`.
    pub gross_salary_paise: i64,

    /// Sum of every expense entry for the guard in the month, regardless of
    /// type. See `payroll::expense_breakdown` for per-type sums.
    pub total_advance_paise: i64,

    /// Present-with-food count × `food_cost_per_shift`.
    pub total_food_cost_paise: i64,

    /// Copied from the guard record.
    pub uniform_deduction_paise: i64,

    /// `gross − advance − food − uniform`. May be negative; never clamped.
    pub net_salary_paise: i64,
}

impl SalarySlip {
    #[inline]
    pub fn gross_salary(&self) -> Money {
        Money::from_paise(self.gross_salary_paise)
    }

    #[inline]
    pub fn total_advance(&self) -> Money {
        Money::from_paise(self.total_advance_paise)
    }

    #[inline]
    pub fn total_food_cost(&self) -> Money {
        Money::from_paise(self.total_food_cost_paise)
    }

    #[inline]
    pub fn uniform_deduction(&self) -> Money {
        Money::from_paise(self.uniform_deduction_paise)
    }

    #[inline]
    pub fn net_salary(&self) -> Money {
        Money::from_paise(self.net_salary_paise)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// The issuing company profile embedded in every invoice.
///
/// Embedded rather than referenced so a printed invoice stays stable after
/// the profile changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceCompany {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Tax identity (PAN).
    pub tax_id: String,
}

/// Bank details embedded in every invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceBankDetails {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub ifsc: String,
}

/// One billable line on an invoice.
///
/// ## Invariant
/// `value_paise == guards × days × rate_paise` at all times. Construct via
/// [`InvoiceLineItem::new`] and mutate only through the draft's setters,
/// which recompute the value on every edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub id: String,
    pub description: String,

    /// Headcount billed on this line.
    pub guards: i64,

    /// Days billed on this line.
    pub days: i64,

    /// Rate per guard per day, in paise.
    pub rate_paise: i64,

    /// Derived: `guards × days × rate_paise`.
    pub value_paise: i64,
}

impl InvoiceLineItem {
    /// Creates a line item with its value computed from the factors.
    pub fn new(description: impl Into<String>, guards: i64, days: i64, rate: Money) -> Self {
        let mut item = InvoiceLineItem {
            id: uuid::Uuid::new_v4().to_string(),
            description: description.into(),
            guards,
            days,
            rate_paise: rate.paise(),
            value_paise: 0,
        };
        item.recompute_value();
        item
    }

    /// Recomputes the derived value from the three factors.
    pub fn recompute_value(&mut self) {
        self.value_paise = self.guards * self.days * self.rate_paise;
    }

    /// Returns the rate as Money.
    #[inline]
    pub fn rate(&self) -> Money {
        Money::from_paise(self.rate_paise)
    }

    /// Returns the line value as Money.
    #[inline]
    pub fn value(&self) -> Money {
        Money::from_paise(self.value_paise)
    }
}

/// A saved invoice record.
///
/// Persisted only on explicit save. Re-saving a loaded invoice always
/// creates a new record; nothing updates a saved invoice in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// `INV/<fiscal-year>/<serial>`, editable before save.
    pub invoice_number: String,

    /// Date printed on the invoice.
    pub invoice_date: NaiveDate,

    pub company: InvoiceCompany,

    pub client_name: String,
    pub client_address: String,

    /// Ordered billable lines. Never empty.
    pub line_items: Vec<InvoiceLineItem>,

    /// Sum of all line values, in paise.
    pub total_amount_paise: i64,

    pub bank_details: InvoiceBankDetails,

    /// When the record was saved.
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Returns the grand total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_paise(self.total_amount_paise)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
