//! # Invoice Repository
//!
//! Database operations for saved invoices.
//!
//! ## Append-Only Saves
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  InvoiceDraft ──► save_draft() ──► new row (fresh id, timestamp)       │
//! │                                                                         │
//! │  Reload + edit + save again    ──► ANOTHER new row                     │
//! │                                                                         │
//! │  A saved invoice is never updated in place; the only mutation is       │
//! │  outright deletion.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The company profile, bank details, and line items are embedded JSON
//! documents. A row whose documents no longer parse is skipped with a
//! warning — local state fails closed, it doesn't crash the caller.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::repository::generate_record_id;
use guardbook_core::invoice::InvoiceDraft;
use guardbook_core::Invoice;

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

const INVOICE_COLUMNS: &str = r#"
    id, invoice_number, invoice_date, company, client_name, client_address,
    line_items, total_amount_paise, bank_details, created_at
"#;

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Lists all saved invoices, newest first.
    ///
    /// Rows with malformed embedded documents are skipped, not fatal.
    pub async fn get_all(&self) -> DbResult<Vec<Invoice>> {
        let rows = sqlx::query(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut invoices = Vec::with_capacity(rows.len());
        for row in &rows {
            match invoice_from_row(row) {
                Ok(invoice) => invoices.push(invoice),
                Err(err) => {
                    let id: String = row.try_get("id").unwrap_or_default();
                    warn!(id = %id, error = %err, "Skipping unreadable invoice row");
                }
            }
        }

        Ok(invoices)
    }

    /// Gets a saved invoice by ID.
    ///
    /// An unreadable row resolves to `None`, same as a missing one.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Invoice>> {
        let row = sqlx::query(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            None => Ok(None),
            Some(row) => match invoice_from_row(&row) {
                Ok(invoice) => Ok(Some(invoice)),
                Err(err) => {
                    warn!(id = %id, error = %err, "Skipping unreadable invoice row");
                    Ok(None)
                }
            },
        }
    }

    /// Inserts a saved invoice record.
    pub async fn insert(&self, invoice: &Invoice) -> DbResult<()> {
        debug!(
            id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            "Inserting invoice"
        );

        let company = serde_json::to_string(&invoice.company)?;
        let line_items = serde_json::to_string(&invoice.line_items)?;
        let bank_details = serde_json::to_string(&invoice.bank_details)?;

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, invoice_number, invoice_date, company, client_name,
                client_address, line_items, total_amount_paise, bank_details,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.invoice_number)
        .bind(invoice.invoice_date)
        .bind(company)
        .bind(&invoice.client_name)
        .bind(&invoice.client_address)
        .bind(line_items)
        .bind(invoice.total_amount_paise)
        .bind(bank_details)
        .bind(invoice.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Freezes a draft into a new saved record and returns it.
    ///
    /// Always a NEW row: identity and timestamp are generated here, so
    /// saving a reloaded draft leaves the original record untouched.
    pub async fn save_draft(&self, draft: &InvoiceDraft) -> DbResult<Invoice> {
        let invoice = draft.build(generate_record_id(), Utc::now());
        self.insert(&invoice).await?;
        Ok(invoice)
    }

    /// Deletes a saved invoice outright.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting invoice");

        let result = sqlx::query("DELETE FROM invoices WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Invoice", id));
        }

        Ok(())
    }

    /// Counts saved invoices (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Maps a row onto the domain record, parsing the embedded documents.
fn invoice_from_row(row: &SqliteRow) -> DbResult<Invoice> {
    let company: String = row.try_get("company")?;
    let line_items: String = row.try_get("line_items")?;
    let bank_details: String = row.try_get("bank_details")?;

    Ok(Invoice {
        id: row.try_get("id")?,
        invoice_number: row.try_get("invoice_number")?,
        invoice_date: row.try_get("invoice_date")?,
        company: serde_json::from_str(&company)?,
        client_name: row.try_get("client_name")?,
        client_address: row.try_get("client_address")?,
        line_items: serde_json::from_str(&line_items)?,
        total_amount_paise: row.try_get("total_amount_paise")?,
        bank_details: serde_json::from_str(&bank_details)?,
        created_at: row.try_get("created_at")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
