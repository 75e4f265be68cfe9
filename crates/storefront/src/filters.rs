//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Format a decimal amount as a dollar price.
///
/// Usage in templates: `{{ line.unit_price|money }}`
#[askama::filter_fn]
pub fn money(
    value: impl std::borrow::Borrow<Decimal>,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(format_money(value.borrow()))
}

/// Format an order timestamp for display.
///
/// Usage in templates: `{{ order.created_at|datetime }}`
#[askama::filter_fn]
pub fn datetime(value: &DateTime<Utc>, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_datetime(value))
}

fn format_money(value: &Decimal) -> String {
    format!("${value:.2}")
}

fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn money_renders_two_decimal_places() {
        let price: Decimal = "19.9".parse().unwrap();
        assert_eq!(format_money(&price), "$19.90");
    }

    #[test]
    fn datetime_is_minute_precision() {
        let ts: DateTime<Utc> = "2026-08-23T14:30:15Z".parse().unwrap();
        assert_eq!(format_datetime(&ts), "2026-08-23 14:30");
    }
}
