//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::NaiveDate;
use miga_core::Category;

/// Formats an ISO date string (yyyy-mm-dd) as dd-mm-yyyy for display.
///
/// Values that are not ISO dates pass through unchanged.
#[must_use]
pub fn format_date(raw: &str) -> String {
    raw.parse::<NaiveDate>()
        .map_or_else(|_| raw.to_string(), |d| d.format("%d-%m-%Y").to_string())
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Maps a backend category code to its display label.
///
/// Usage in templates: `{{ product.category|category }}`
#[askama::filter_fn]
pub fn category(code: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let code = code.to_string();
    Ok(Category::label_for_code(&code).to_owned())
}

/// Formats an ISO date (yyyy-mm-dd) as dd-mm-yyyy for display.
///
/// Usage in templates: `{{ order.delivery_date|date }}`
#[askama::filter_fn]
pub fn date(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_date(&value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-07-01"), "01-07-2025");
    }

    #[test]
    fn test_format_date_passes_through_non_dates() {
        assert_eq!(format_date("pronto"), "pronto");
        assert_eq!(format_date(""), "");
    }
}
