//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;
use voidwear_core::Money;

/// Formats a peso amount with the currency symbol.
///
/// Usage in templates: `{{ sale.total_amount|money }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn money(amount: &Decimal, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(Money::new(*amount, voidwear_core::Currency::Ars).display())
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats an order timestamp for display, e.g. `20/08/2026`.
///
/// Usage in templates: `{{ sale.created_at|short_date }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn short_date(
    value: &chrono::DateTime<chrono::Utc>,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(value.format("%d/%m/%Y").to_string())
}

/// Formats a calendar date for display, e.g. `20/08/2026`.
///
/// Usage in templates: `{{ expense.incurred_on|day }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn day(value: &chrono::NaiveDate, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(value.format("%d/%m/%Y").to_string())
}
