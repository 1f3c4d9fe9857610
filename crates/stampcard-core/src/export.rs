//! # CSV Export
//!
//! Flattens a customer list into comma-separated rows for the staff export
//! screen. Text fields are double-quoted with embedded quotes doubled;
//! numeric fields are bare. The filename is stamped with the export date.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::types::Customer;

/// Header row of the customer export.
const HEADER: &str =
    "Id,Name,Mobile,Member Code,Stamps,Redeems,Lifetime Stamps,Status,Joined\n";

// =============================================================================
// Formatting
// =============================================================================

/// Quotes a text field, doubling embedded double-quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Renders one customer as a CSV row (with trailing newline).
fn customer_row(customer: &Customer) -> String {
    let status = if customer.is_deleted {
        "Archived"
    } else {
        "Active"
    };

    let mut row = String::new();
    // writeln! to a String cannot fail.
    let _ = writeln!(
        row,
        "{},{},{},{},{},{},{},{},{}",
        customer.id,
        quote(&customer.name),
        quote(&customer.mobile),
        quote(&customer.member_code),
        customer.stamps,
        customer.redeems,
        customer.lifetime_stamps,
        quote(status),
        quote(&customer.created_at.format("%d %b %Y").to_string()),
    );
    row
}

/// Flattens the visible customer list into a CSV document.
pub fn customers_csv(customers: &[Customer]) -> String {
    let mut csv = String::from(HEADER);
    for customer in customers {
        csv.push_str(&customer_row(customer));
    }
    csv
}

/// Export filename stamped with the given date: `customers-2026-08-25.csv`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("customers-{}.csv", date.format("%Y-%m-%d"))
}

// =============================================================================
// Unit Tests
// =============================================================================
