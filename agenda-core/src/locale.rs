//! Locale-dependent names (months, weekdays) through chrono's locale tables.

use chrono::{Days, Locale, NaiveDate};

use crate::error::{AgendaError, AgendaResult};

pub const DEFAULT_LOCALE: &str = "pt_BR";

/// Parse a POSIX locale name such as `pt_BR` or `en_US`.
pub fn parse_locale(name: &str) -> AgendaResult<Locale> {
    name.parse::<Locale>()
        .map_err(|_| AgendaError::Config(format!("Unknown locale '{name}'")))
}

/// Full month name of `date`'s month, as the locale writes it.
pub fn month_name(date: NaiveDate, locale: Locale) -> String {
    date.format_localized("%B", locale).to_string()
}

/// Abbreviated weekday names starting on Sunday.
pub fn weekday_names(locale: Locale) -> Vec<String> {
    // 2023-01-01 was a Sunday
    let sunday = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();
    (0..7)
        .filter_map(|i| sunday.checked_add_days(Days::new(i)))
        .map(|d| d.format_localized("%a", locale).to_string())
        .collect()
}

/// Uppercase the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
