//! Custom Askama template filters for the admin panel.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::NaiveDate;
use miga_core::Category;

/// Returns the current year.
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Maps a backend category code to its display label.
#[askama::filter_fn]
pub fn category(code: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let code = code.to_string();
    Ok(Category::label_for_code(&code).to_owned())
}

/// Formats an ISO date (yyyy-mm-dd) as dd-mm-yyyy for display.
#[askama::filter_fn]
pub fn date(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(raw
        .parse::<NaiveDate>()
        .map_or(raw, |d| d.format("%d-%m-%Y").to_string()))
}
