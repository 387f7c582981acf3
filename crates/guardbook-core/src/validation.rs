//! # Validation Module
//!
//! Boundary validation for records entering the store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (external)                                      │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository boundary (guardbook-db)                           │
//! │  └── THIS MODULE: precondition checks before anything is persisted     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE (guard_id, date) on attendance                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Referential checks are deliberately absent: a dangling site or guard
//! reference is legal state, rendered as "Unassigned"/"Unknown" downstream.

use crate::error::ValidationError;
use crate::types::{ExpenseRecord, Guard, Site};
use crate::MAX_OVERTIME_HOURS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a display name (site name, guard name, client name).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use guardbook_core::validation::validate_name;
///
/// assert!(validate_name("name", "Rajesh Kumar").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a monetary amount that must be strictly positive (expenses).
pub fn validate_positive_amount(field: &str, paise: i64) -> ValidationResult<()> {
    if paise <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a monetary amount that may be zero (pay rates, deductions).
pub fn validate_amount(field: &str, paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates daily overtime hours.
///
/// The 0-12 range is a UI convention; the store itself does not call this,
/// so out-of-range values can still be persisted by a determined caller.
pub fn validate_overtime_hrs(hours: i64) -> ValidationResult<()> {
    if !(0..=MAX_OVERTIME_HOURS).contains(&hours) {
        return Err(ValidationError::OutOfRange {
            field: "overtime_hrs".to_string(),
            min: 0,
            max: MAX_OVERTIME_HOURS,
        });
    }

    Ok(())
}

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use guardbook_core::validation::validate_uuid;
///
/// assert!(validate_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("id", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Preconditions for persisting a Site.
pub fn validate_site(site: &Site) -> ValidationResult<()> {
    validate_name("site name", &site.name)?;
    Ok(())
}

/// Preconditions for persisting a Guard.
pub fn validate_guard(guard: &Guard) -> ValidationResult<()> {
    validate_name("guard name", &guard.name)?;
    validate_amount("salary_per_shift", guard.salary_per_shift_paise)?;
    validate_amount("food_cost_per_shift", guard.food_cost_per_shift_paise)?;
    validate_amount("uniform_deduction", guard.uniform_deduction_paise)?;
    Ok(())
}

/// Preconditions for persisting an ExpenseRecord.
pub fn validate_expense(expense: &ExpenseRecord) -> ValidationResult<()> {
    if expense.guard_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "guard_id".to_string(),
        });
    }
    validate_positive_amount("amount", expense.amount_paise)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
