//! # guardbook-db: Database Layer for GuardBook
//!
//! This crate provides database access for the GuardBook system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        GuardBook Data Flow                              │
//! │                                                                         │
//! │  Presentation call (mark attendance, calculate report, save invoice)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  guardbook-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (site, guard, │    │  (embedded)  │  │   │
//! │  │   │               │    │  attendance,  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  expense,     │    │ 001_init.sql │  │   │
//! │  │   │ + seeding     │    │  invoice)     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   report.rs: loads collections, delegates the derivation to    │   │
//! │  │   guardbook-core's pure payroll engine                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │          (one local file, exactly one writing process)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (site, guard, ...)
//! - [`seed`] - One-time demo data seeding
//! - [`report`] - Salary report and roster joins
//!
//! ## Usage
//!
//! ```rust,ignore
//! use guardbook_db::{Database, DbConfig};
//!
//! // Create database with default config (migrates + seeds on first run)
//! let db = Database::new(DbConfig::new("path/to/guardbook.db")).await?;
//!
//! // Use repositories
//! let roster = db.guards().get_all().await?;
//!
//! // Derive the monthly statement
//! let report = db.salary_report("2026-07".parse()?).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod report;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use report::{RosterEntry, SalaryReport, UNASSIGNED_SITE};

// Repository re-exports for convenience
pub use repository::attendance::AttendanceRepository;
pub use repository::expense::ExpenseRepository;
pub use repository::guard::GuardRepository;
pub use repository::invoice::InvoiceRepository;
pub use repository::site::SiteRepository;
