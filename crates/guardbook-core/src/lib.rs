//! # guardbook-core: Pure Business Logic for GuardBook
//!
//! This crate is the **heart** of GuardBook. It contains the derivation
//! logic of the staffing business as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       GuardBook Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (external collaborator)               │   │
//! │  │    Guard forms ─► Attendance sheet ─► Salary report ─► Invoice  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ guardbook-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌─────────┐ ┌────────────┐ ┌─────────┐ ┌───────┐ │   │
//! │  │  │  types   │ │  money  │ │ attendance │ │ payroll │ │invoice│ │   │
//! │  │  │  Guard   │ │  Money  │ │ShiftTotals │ │ Salary  │ │ Draft │ │   │
//! │  │  │  Site …  │ │ (paise) │ │            │ │  Slip   │ │ Words │ │   │
//! │  │  └──────────┘ └─────────┘ └────────────┘ └─────────┘ └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 guardbook-db (Database Layer)                   │   │
//! │  │           SQLite queries, migrations, repositories              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Record types (Site, Guard, AttendanceRecord, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Store-boundary precondition checks
//! - [`attendance`] - Monthly shift/food aggregation
//! - [`payroll`] - Salary slip derivation and report totals
//! - [`invoice`] - Fiscal year, invoice numbers, amount-in-words, drafts
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: payroll output for a fixed store state and month
//!    is repeatable — no clock, no randomness, no side effects (the two
//!    deliberate exceptions are invoice-number generation and fresh drafts,
//!    which need today's date and a random serial)
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are paise (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod attendance;
pub mod error;
pub mod invoice;
pub mod money;
pub mod payroll;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use guardbook_core::Money` instead of
// `use guardbook_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum overtime hours per day the attendance sheet accepts.
///
/// A UI convention rather than a store constraint: the validator exists for
/// the boundary, but the store persists whatever it is handed.
pub const MAX_OVERTIME_HOURS: i64 = 12;

/// Description a fresh invoice line starts with.
pub const DEFAULT_LINE_DESCRIPTION: &str = "Security Guard";

/// Billed days a fresh invoice line starts with.
///
/// Guards work a 26-day month by default; Sundays are billed separately
/// when worked.
pub const DEFAULT_BILLING_DAYS: i64 = 26;
