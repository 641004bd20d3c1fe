//! Field utilities shared by the transformer and the SQL renderer
//!
//! - whitespace normalization of raw CSV values
//! - `MM/DD/YYYY` / `MM/DD/YY` date parsing
//! - formatting values as SQL literals

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::fmt;

/// Canonical timestamp form written to the `InspectionDate` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// First two-digit year read as 19xx; `00`..`68` are 20xx
const TWO_DIGIT_CENTURY_PIVOT: i32 = 69;

/// Trim a raw value and collapse internal whitespace runs to a single space
///
/// Missing, empty and whitespace-only values all normalize to `None`.
///
/// # Example
/// ```
/// use restaurant_inspections::fields::normalize_space;
///
/// assert_eq!(normalize_space(Some("  Joe's \t  Pizza ")), Some("Joe's Pizza".to_string()));
/// assert_eq!(normalize_space(Some("   ")), None);
/// assert_eq!(normalize_space(None), None);
/// ```
pub fn normalize_space(value: Option<&str>) -> Option<String> {
    let normalized = value?.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Parse an inspection-style date into a midnight timestamp
///
/// Accepts `MM/DD/YYYY` and `MM/DD/YY`; month and day may omit the leading
/// zero. The year must be exactly four or two ASCII digits and its width
/// selects the format, so `1/2/23` is 2023, never year 23. Two-digit years
/// `69`..`99` fall in the 1900s. Anything else yields `None`.
pub fn parse_date(value: Option<&str>) -> Option<NaiveDateTime> {
    let value = value?.trim();
    let year = value.rsplit('/').next()?;
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let format = match year.len() {
        4 => "%m/%d/%Y",
        2 => "%m/%d/%y",
        _ => return None,
    };

    let date = match NaiveDate::parse_from_str(value, format) {
        Ok(date) => date,
        Err(e) => {
            log::trace!("Unparseable date '{}': {}", value, e);
            return None;
        }
    };

    // chrono's %y only starts the 1900s at 70
    let date = if year.len() == 2 && date.year() >= 2000 + TWO_DIGIT_CENTURY_PIVOT {
        date.with_year(date.year() - 100)?
    } else {
        date
    };

    date.and_hms_opt(0, 0, 0)
}

/// Render a timestamp in the canonical `YYYY-MM-DD HH:MM:SS` form
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// A value ready to be written into an `INSERT` statement
///
/// `Display` produces the literal:
/// - `Null` and empty `Text` → `NULL`
/// - `Text` → single-quoted, embedded quotes doubled
/// - `Integer` → bare decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlValue<'a> {
    Null,
    Text(&'a str),
    Integer(u64),
}

impl fmt::Display for SqlValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Text(text) if text.is_empty() => f.write_str("NULL"),
            SqlValue::Text(text) => write!(f, "'{}'", text.replace('\'', "''")),
            SqlValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl<'a> From<&'a str> for SqlValue<'a> {
    fn from(value: &'a str) -> Self {
        SqlValue::Text(value)
    }
}

impl<'a> From<&'a String> for SqlValue<'a> {
    fn from(value: &'a String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<u64> for SqlValue<'_> {
    fn from(value: u64) -> Self {
        SqlValue::Integer(value)
    }
}

impl<'a, T> From<Option<T>> for SqlValue<'a>
where
    T: Into<SqlValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// Format any convertible value as a SQL literal
///
/// # Example
/// ```
/// use restaurant_inspections::fields::sql_literal;
///
/// assert_eq!(sql_literal("O'Brien's Deli"), "'O''Brien''s Deli'");
/// assert_eq!(sql_literal(""), "NULL");
/// assert_eq!(sql_literal(None::<&str>), "NULL");
/// assert_eq!(sql_literal(7u64), "7");
/// ```
pub fn sql_literal<'a>(value: impl Into<SqlValue<'a>>) -> String {
    value.into().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_space() {
        assert_eq!(normalize_space(Some("Pizza")), Some("Pizza".to_string()));
        assert_eq!(
            normalize_space(Some("\n 123   MAIN\tST  ")),
            Some("123 MAIN ST".to_string())
        );
        assert_eq!(normalize_space(Some("")), None);
        assert_eq!(normalize_space(Some(" \t ")), None);
        assert_eq!(normalize_space(None), None);
    }

    #[test]
    fn test_parse_two_digit_year() {
        let parsed = parse_date(Some("1/2/23")).unwrap();
        assert_eq!(format_timestamp(&parsed), "2023-01-02 00:00:00");
    }

    #[test]
    fn test_two_digit_year_century_boundary() {
        let parsed = parse_date(Some("1/2/68")).unwrap();
        assert_eq!(format_timestamp(&parsed), "2068-01-02 00:00:00");

        let parsed = parse_date(Some("1/2/69")).unwrap();
        assert_eq!(format_timestamp(&parsed), "1969-01-02 00:00:00");

        let parsed = parse_date(Some("12/31/99")).unwrap();
        assert_eq!(format_timestamp(&parsed), "1999-12-31 00:00:00");

        let parsed = parse_date(Some("01/01/00")).unwrap();
        assert_eq!(format_timestamp(&parsed), "2000-01-01 00:00:00");
    }

    #[test]
    fn test_parse_four_digit_year() {
        let parsed = parse_date(Some("01/02/2023")).unwrap();
        assert_eq!(format_timestamp(&parsed), "2023-01-02 00:00:00");

        let parsed = parse_date(Some("12/31/1900")).unwrap();
        assert_eq!(format_timestamp(&parsed), "1900-12-31 00:00:00");
    }

    #[test]
    fn test_unparseable_dates_are_none() {
        assert_eq!(parse_date(Some("N/A")), None);
        assert_eq!(parse_date(Some("")), None);
        assert_eq!(parse_date(Some("2023-01-02")), None);
        assert_eq!(parse_date(Some("13/01/2023")), None);
        assert_eq!(parse_date(Some("02/30/2023")), None);
        assert_eq!(parse_date(Some("1/2/023")), None);
        assert_eq!(parse_date(Some("1/2/-023")), None);
        assert_eq!(parse_date(Some("1/2/+023")), None);
        assert_eq!(parse_date(Some("1/2/-3")), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn test_sql_literal_text() {
        assert_eq!(sql_literal("O'Brien's Deli"), "'O''Brien''s Deli'");
        assert_eq!(sql_literal("Plain"), "'Plain'");
        assert_eq!(sql_literal(r"back\slash"), r"'back\slash'");
    }

    #[test]
    fn test_sql_literal_null_and_empty() {
        assert_eq!(sql_literal(""), "NULL");
        assert_eq!(sql_literal(None::<&str>), "NULL");
        assert_eq!(sql_literal(None::<u64>), "NULL");
        assert_eq!(sql_literal(SqlValue::Null), "NULL");
    }

    #[test]
    fn test_sql_literal_numbers() {
        assert_eq!(sql_literal(7u64), "7");
        assert_eq!(sql_literal(Some(42u64)), "42");
        assert_eq!(sql_literal(u64::MAX), "18446744073709551615");
    }
}
