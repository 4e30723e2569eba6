//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// CSS `flex-basis` of one carousel slide for a slides-per-view count.
///
/// Usage in templates: `{{ page.carousel.per_view|slide_basis }}`
#[askama::filter_fn]
pub fn slide_basis(per_view: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(slide_basis_percent(per_view.to_string().parse().unwrap_or(1)))
}

fn slide_basis_percent(per_view: u32) -> String {
    format!("{:.4}%", 100.0 / f64::from(per_view.max(1)))
}
