//! # Invoice Derivation
//!
//! The three billing algorithms plus the invoice draft state machine.
//!
//! ## Invoice Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Invoice State Machine                               │
//! │                                                                         │
//! │   InvoiceDraft::new ──────────► DRAFTING                               │
//! │                                    │  add/remove/edit lines            │
//! │                                    │  (≥ 1 line at all times)          │
//! │                                    ▼                                    │
//! │   build() + repository insert ──► SAVED (immutable row)                │
//! │                                    │                                    │
//! │   InvoiceDraft::from_invoice ◄────┘  reload returns to DRAFTING;       │
//! │                                      saving again creates a NEW row,   │
//! │                                      never an in-place update          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, NaiveDate, Utc};
use rand::Rng;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Invoice, InvoiceBankDetails, InvoiceCompany, InvoiceLineItem};
use crate::{DEFAULT_BILLING_DAYS, DEFAULT_LINE_DESCRIPTION};

// =============================================================================
// Fiscal Year
// =============================================================================

/// The April-March fiscal year label a date falls in.
///
/// Indian convention: the year starting April of Y is labelled `Y-<YY+1>`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use guardbook_core::invoice::fiscal_year;
///
/// let march = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
/// assert_eq!(fiscal_year(march), "2025-26");
///
/// let april = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
/// assert_eq!(fiscal_year(april), "2026-27");
/// ```
pub fn fiscal_year(date: NaiveDate) -> String {
    let year = date.year();
    if date.month() >= 4 {
        format!("{}-{:02}", year, (year + 1).rem_euclid(100))
    } else {
        format!("{}-{:02}", year - 1, year.rem_euclid(100))
    }
}

// =============================================================================
// Invoice Number
// =============================================================================

/// Formats an invoice number for a date and serial.
pub fn invoice_number_for(date: NaiveDate, serial: u16) -> String {
    format!("INV/{}/{}", fiscal_year(date), serial)
}

/// Generates a fresh invoice number for today.
///
/// The serial is uniform in `[1000, 9999]`. Uniqueness is NOT guaranteed by
/// construction: collisions are rare at this volume and the number stays
/// editable until the invoice is saved.
pub fn generate_invoice_number() -> String {
    let serial: u16 = rand::thread_rng().gen_range(1000..=9999);
    invoice_number_for(Utc::now().date_naive(), serial)
}

// =============================================================================
// Amount in Words
// =============================================================================

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Renders a rupee amount in words using the Indian numbering system.
///
/// Grouping is Crore (10^7), Lakh (10^5), Thousand (10^3), then a final
/// three-digit group; each group is rendered through the three-digit helper
/// and suffixed with its scale word only when non-zero. Only the whole-rupee
/// part is spoken — paise are deliberately dropped, matching the printed
/// invoice.
///
/// ## Example
/// ```rust
/// use guardbook_core::invoice::amount_in_words;
/// use guardbook_core::money::Money;
///
/// assert_eq!(amount_in_words(Money::zero()), "Zero Rupees Only");
/// assert_eq!(
///     amount_in_words(Money::from_rupees(100000)),
///     "One Lakh Rupees Only"
/// );
/// ```
pub fn amount_in_words(amount: Money) -> String {
    let rupees = amount.rupees();
    if rupees <= 0 {
        return "Zero Rupees Only".to_string();
    }
    let n = rupees as u64;

    let mut result = String::new();
    if n >= 10_000_000 {
        result.push_str(&three_digits(n / 10_000_000));
        result.push_str(" Crore ");
    }
    if n % 10_000_000 >= 100_000 {
        result.push_str(&three_digits(n % 10_000_000 / 100_000));
        result.push_str(" Lakh ");
    }
    if n % 100_000 >= 1_000 {
        result.push_str(&three_digits(n % 100_000 / 1_000));
        result.push_str(" Thousand ");
    }
    if n % 1_000 > 0 {
        result.push_str(&three_digits(n % 1_000));
    }

    format!("{} Rupees Only", result.trim_end())
}

/// Renders 0-99. Numbers below 20 use the irregular name table.
fn two_digits(n: u64) -> String {
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    let tens = TENS[(n / 10) as usize];
    match n % 10 {
        0 => tens.to_string(),
        ones => format!("{} {}", tens, ONES[ones as usize]),
    }
}

/// Renders 0-999 as `<ones> Hundred [<two-digit group>]`.
fn three_digits(n: u64) -> String {
    if n < 100 {
        return two_digits(n);
    }
    let hundreds = format!("{} Hundred", ONES[(n / 100) as usize]);
    match n % 100 {
        0 => hundreds,
        rest => format!("{} {}", hundreds, two_digits(rest)),
    }
}

// =============================================================================
// Invoice Draft
// =============================================================================

/// An invoice being edited — the Drafting state.
///
/// Line items are private so every mutation flows through the setters that
/// keep `value == guards × days × rate` true. The draft always holds at
/// least one line.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub company: InvoiceCompany,
    pub client_name: String,
    pub client_address: String,
    pub bank_details: InvoiceBankDetails,
    line_items: Vec<InvoiceLineItem>,
}

impl InvoiceDraft {
    /// Starts a fresh draft dated `today` with a generated invoice number
    /// and one default line item.
    pub fn new(today: NaiveDate) -> Self {
        let serial: u16 = rand::thread_rng().gen_range(1000..=9999);
        InvoiceDraft {
            invoice_number: invoice_number_for(today, serial),
            invoice_date: today,
            company: InvoiceCompany::default(),
            client_name: String::new(),
            client_address: String::new(),
            bank_details: InvoiceBankDetails::default(),
            line_items: vec![Self::default_line()],
        }
    }

    /// Reloads a saved invoice into a new draft, fields populated.
    ///
    /// Building and saving this draft creates a new record; the original
    /// stays untouched.
    pub fn from_invoice(invoice: &Invoice) -> Self {
        InvoiceDraft {
            invoice_number: invoice.invoice_number.clone(),
            invoice_date: invoice.invoice_date,
            company: invoice.company.clone(),
            client_name: invoice.client_name.clone(),
            client_address: invoice.client_address.clone(),
            bank_details: invoice.bank_details.clone(),
            line_items: invoice.line_items.clone(),
        }
    }

    fn default_line() -> InvoiceLineItem {
        InvoiceLineItem::new(
            DEFAULT_LINE_DESCRIPTION,
            1,
            DEFAULT_BILLING_DAYS,
            Money::zero(),
        )
    }

    /// The current line items, in order. Never empty.
    pub fn line_items(&self) -> &[InvoiceLineItem] {
        &self.line_items
    }

    /// Appends a default line and returns its index.
    pub fn add_line(&mut self) -> usize {
        self.line_items.push(Self::default_line());
        self.line_items.len() - 1
    }

    /// Removes the line at `index`.
    ///
    /// Removing the sole remaining line is rejected and the draft is left
    /// unchanged.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<InvoiceLineItem> {
        if self.line_items.len() <= 1 {
            return Err(CoreError::LastLineItem);
        }
        if index >= self.line_items.len() {
            return Err(CoreError::LineItemNotFound { index });
        }
        Ok(self.line_items.remove(index))
    }

    /// Sets a line's description.
    pub fn set_description(&mut self, index: usize, description: impl Into<String>) -> CoreResult<()> {
        self.line_mut(index)?.description = description.into();
        Ok(())
    }

    /// Sets a line's headcount and recomputes its value.
    pub fn set_guards(&mut self, index: usize, guards: i64) -> CoreResult<()> {
        let line = self.line_mut(index)?;
        line.guards = guards;
        line.recompute_value();
        Ok(())
    }

    /// Sets a line's billed days and recomputes its value.
    pub fn set_days(&mut self, index: usize, days: i64) -> CoreResult<()> {
        let line = self.line_mut(index)?;
        line.days = days;
        line.recompute_value();
        Ok(())
    }

    /// Sets a line's rate and recomputes its value.
    pub fn set_rate(&mut self, index: usize, rate: Money) -> CoreResult<()> {
        let line = self.line_mut(index)?;
        line.rate_paise = rate.paise();
        line.recompute_value();
        Ok(())
    }

    fn line_mut(&mut self, index: usize) -> CoreResult<&mut InvoiceLineItem> {
        self.line_items
            .get_mut(index)
            .ok_or(CoreError::LineItemNotFound { index })
    }

    /// The grand total: sum of all line values, recomputed on every read so
    /// it can never drift from the lines.
    pub fn total(&self) -> Money {
        self.line_items.iter().map(InvoiceLineItem::value).sum()
    }

    /// The grand total in words, as printed on the invoice.
    pub fn total_in_words(&self) -> String {
        amount_in_words(self.total())
    }

    /// Freezes the draft into a persistable record.
    ///
    /// The caller supplies identity and timestamp so this stays pure; the
    /// repository layer generates both when saving.
    pub fn build(&self, id: String, created_at: chrono::DateTime<Utc>) -> Invoice {
        Invoice {
            id,
            invoice_number: self.invoice_number.clone(),
            invoice_date: self.invoice_date,
            company: self.company.clone(),
            client_name: self.client_name.clone(),
            client_address: self.client_address.clone(),
            line_items: self.line_items.clone(),
            total_amount_paise: self.total().paise(),
            bank_details: self.bank_details.clone(),
            created_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fiscal_year_boundaries() {
        assert_eq!(fiscal_year(date(2026, 3, 31)), "2025-26");
        assert_eq!(fiscal_year(date(2026, 4, 1)), "2026-27");
        assert_eq!(fiscal_year(date(2026, 12, 15)), "2026-27");
        assert_eq!(fiscal_year(date(2026, 1, 1)), "2025-26");
        // Century rollover keeps two digits
        assert_eq!(fiscal_year(date(2099, 5, 1)), "2099-00");
    }

    #[test]
    fn test_invoice_number_format() {
        assert_eq!(invoice_number_for(date(2026, 7, 1), 4821), "INV/2026-27/4821");

        let number = generate_invoice_number();
        let parts: Vec<&str> = number.split('/').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "INV");
        let serial: u16 = parts[2].parse().unwrap();
        assert!((1000..=9999).contains(&serial));
    }

    #[test]
    fn test_amount_in_words_zero() {
        assert_eq!(amount_in_words(Money::zero()), "Zero Rupees Only");
        // Sub-rupee amounts have no spoken part
        assert_eq!(amount_in_words(Money::from_paise(99)), "Zero Rupees Only");
    }

    #[test]
    fn test_amount_in_words_spec_values() {
        assert_eq!(
            amount_in_words(Money::from_rupees(100000)),
            "One Lakh Rupees Only"
        );
        assert_eq!(
            amount_in_words(Money::from_rupees(1234567)),
            "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven Rupees Only"
        );
    }

    #[test]
    fn test_amount_in_words_small_numbers() {
        assert_eq!(amount_in_words(Money::from_rupees(7)), "Seven Rupees Only");
        assert_eq!(
            amount_in_words(Money::from_rupees(17)),
            "Seventeen Rupees Only"
        );
        assert_eq!(
            amount_in_words(Money::from_rupees(40)),
            "Forty Rupees Only"
        );
        assert_eq!(
            amount_in_words(Money::from_rupees(99)),
            "Ninety Nine Rupees Only"
        );
        assert_eq!(
            amount_in_words(Money::from_rupees(800)),
            "Eight Hundred Rupees Only"
        );
        assert_eq!(
            amount_in_words(Money::from_rupees(912)),
            "Nine Hundred Twelve Rupees Only"
        );
    }

    #[test]
    fn test_amount_in_words_scale_groups() {
        assert_eq!(
            amount_in_words(Money::from_rupees(1000)),
            "One Thousand Rupees Only"
        );
        // Zero-valued groups are omitted entirely
        assert_eq!(
            amount_in_words(Money::from_rupees(10_000_000)),
            "One Crore Rupees Only"
        );
        assert_eq!(
            amount_in_words(Money::from_rupees(10_100_000)),
            "One Crore One Lakh Rupees Only"
        );
        assert_eq!(
            amount_in_words(Money::from_rupees(20_030_400)),
            "Two Crore Three Thousand Four Hundred Rupees Only"
        );
        // Paise are dropped, not rounded
        assert_eq!(
            amount_in_words(Money::from_paise(100_099)),
            "One Thousand Rupees Only"
        );
    }

    #[test]
    fn test_draft_starts_with_one_default_line() {
        let draft = InvoiceDraft::new(date(2026, 7, 1));
        assert_eq!(draft.line_items().len(), 1);

        let line = &draft.line_items()[0];
        assert_eq!(line.description, "Security Guard");
        assert_eq!(line.guards, 1);
        assert_eq!(line.days, 26);
        assert_eq!(line.value_paise, 0);

        assert!(draft.invoice_number.starts_with("INV/2026-27/"));
    }

    #[test]
    fn test_removing_last_line_is_rejected() {
        let mut draft = InvoiceDraft::new(date(2026, 7, 1));
        assert!(matches!(
            draft.remove_line(0),
            Err(CoreError::LastLineItem)
        ));
        assert_eq!(draft.line_items().len(), 1);

        draft.add_line();
        assert!(draft.remove_line(1).is_ok());
        assert_eq!(draft.line_items().len(), 1);
        // Back to one line: rejected again
        assert!(draft.remove_line(0).is_err());
    }

    #[test]
    fn test_setters_recompute_value() {
        let mut draft = InvoiceDraft::new(date(2026, 7, 1));
        draft.set_rate(0, Money::from_rupees(700)).unwrap();
        assert_eq!(draft.line_items()[0].value(), Money::from_rupees(1 * 26 * 700));

        draft.set_guards(0, 4).unwrap();
        assert_eq!(draft.line_items()[0].value(), Money::from_rupees(4 * 26 * 700));

        draft.set_days(0, 30).unwrap();
        assert_eq!(draft.line_items()[0].value(), Money::from_rupees(4 * 30 * 700));

        assert!(draft.set_rate(5, Money::zero()).is_err());
    }

    #[test]
    fn test_total_tracks_line_changes() {
        let mut draft = InvoiceDraft::new(date(2026, 7, 1));
        draft.set_rate(0, Money::from_rupees(100)).unwrap();
        assert_eq!(draft.total(), Money::from_rupees(2600));

        let second = draft.add_line();
        draft.set_rate(second, Money::from_rupees(50)).unwrap();
        assert_eq!(draft.total(), Money::from_rupees(2600 + 1300));

        draft.remove_line(second).unwrap();
        assert_eq!(draft.total(), Money::from_rupees(2600));
    }

    #[test]
    fn test_build_and_reload_round_trip() {
        let mut draft = InvoiceDraft::new(date(2026, 7, 1));
        draft.client_name = "Logistics Corp".to_string();
        draft.set_rate(0, Money::from_rupees(700)).unwrap();

        let invoice = draft.build("inv-1".to_string(), Utc::now());
        assert_eq!(invoice.total_amount_paise, draft.total().paise());
        assert_eq!(invoice.line_items.len(), 1);

        // Reload returns to Drafting with fields populated; a later build
        // under a new id is a new record, the original is untouched
        let reloaded = InvoiceDraft::from_invoice(&invoice);
        assert_eq!(reloaded.invoice_number, invoice.invoice_number);
        assert_eq!(reloaded.client_name, "Logistics Corp");
        assert_eq!(reloaded.total(), invoice.total_amount());

        let resaved = reloaded.build("inv-2".to_string(), Utc::now());
        assert_ne!(resaved.id, invoice.id);
        assert_eq!(resaved.total_amount_paise, invoice.total_amount_paise);
    }
}
