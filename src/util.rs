// Cell parsing, guarded ratio arithmetic, and the rounding and formatting
// used where values leave the crate (JSON fields, console tables, insight
// text).
use crate::config::{CURRENCY_DECIMALS, RATE_DECIMALS};
use chrono::{NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};
use serde::Serializer;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Numeric value of a measure cell, if it has one.
///
/// Surrounding whitespace and `,` group separators are ignored; exponent
/// notation (`1e3`) is accepted. Blank cells, text, `NaN` and infinities
/// yield `None`.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Coerce a raw measure cell to a non-negative value; anything unusable is 0.
pub fn parse_measure(s: Option<&str>) -> f64 {
    match parse_f64_safe(s) {
        Some(v) if v > 0.0 => v,
        _ => 0.0,
    }
}

/// Timestamp of a date cell. Date-only layouts map to midnight so the time
/// of day, when present, still tells two rows apart.
pub fn parse_timestamp_safe(s: Option<&str>) -> Option<NaiveDateTime> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Year-month label (`YYYY-MM`); lexicographic order is chronological.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Trimmed text, or `fallback` when the cell is missing or blank.
pub fn text_or(s: Option<&str>, fallback: &str) -> String {
    match s.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// `numerator / denominator`, or `0.0` when the denominator is not positive.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        let r = numerator / denominator;
        if r.is_finite() {
            r
        } else {
            0.0
        }
    } else {
        0.0
    }
}

/// Percentage change from `previous` to `current`; `0.0` without a baseline.
pub fn pct_change(previous: f64, current: f64) -> f64 {
    safe_ratio(current - previous, previous) * 100.0
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // Avoid emitting `-0.0` for tiny negative growth figures.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub fn serialize_money<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, CURRENCY_DECIMALS))
}

pub fn serialize_rate<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, RATE_DECIMALS))
}

/// Whole-number count; fractional conversions are truncated toward zero.
pub fn serialize_count<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(value.trunc() as i64)
}

/// Render a rounded value the way the insight templates expect: integral
/// values keep one decimal place (`4.0`), others use the shortest form.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Fixed-decimal rendering with `en` digit grouping, e.g. `1,234,567.89`.
pub fn format_number(n: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, n.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let grouped = match whole.parse::<u64>() {
        Ok(v) => format_int(v),
        Err(_) => whole.to_string(),
    };
    // No sign when the value rounds to zero.
    let sign = if n < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

pub fn display_money(value: &f64) -> String {
    format_number(*value, CURRENCY_DECIMALS as usize)
}

/// Counts are shown as whole numbers, truncated like `serialize_count`.
pub fn display_count(value: &f64) -> String {
    format_int(value.trunc() as i64)
}

pub fn display_ratio(value: &f64) -> String {
    format!("{:.*}", CURRENCY_DECIMALS as usize, value)
}

pub fn display_rate(value: &f64) -> String {
    format!("{:.*}", RATE_DECIMALS as usize, value)
}
