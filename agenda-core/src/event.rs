//! Event record and its date-prefixed identifier.
//!
//! The id of every event starts with the ISO date the event belongs to
//! (`YYYY-MM-DD-<suffix>`). That prefix is the only thing queries look at,
//! so it is validated whenever an id is parsed or deserialized.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AgendaError, AgendaResult};

/// Date format used for id prefixes and day queries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Placeholder shown wherever an event has no hour.
pub const MISSING_HOUR: &str = "—";

const DATE_PREFIX_LEN: usize = 10;

/// Years that format as exactly four digits.
const ID_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Composite identifier: `YYYY-MM-DD-<suffix>`.
///
/// Freshly minted ids use the creation time in Unix milliseconds as suffix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventId {
    raw: String,
    date: NaiveDate,
}

impl EventId {
    /// Id for an event on `date`. Fails for dates whose year does not fit
    /// the four-digit prefix, since such ids could never be parsed back.
    pub fn mint(date: NaiveDate, millis: i64) -> AgendaResult<Self> {
        if !ID_YEARS.contains(&date.year()) {
            return Err(AgendaError::InvalidDate(format!(
                "{date} is outside years 0000-9999"
            )));
        }

        Ok(EventId {
            raw: format!("{}-{}", date.format(DATE_FORMAT), millis),
            date,
        })
    }

    pub fn parse(s: &str) -> AgendaResult<Self> {
        let invalid = || AgendaError::InvalidId(s.to_string());

        let prefix = s.get(..DATE_PREFIX_LEN).ok_or_else(invalid)?;
        let date = NaiveDate::parse_from_str(prefix, DATE_FORMAT).map_err(|_| invalid())?;

        // Reject non-canonical prefixes like "2026-1-050" that chrono would accept.
        if date.format(DATE_FORMAT).to_string() != prefix {
            return Err(invalid());
        }

        let suffix = s[DATE_PREFIX_LEN..].strip_prefix('-').ok_or_else(invalid)?;
        let suffix_ok = !suffix.is_empty()
            && suffix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !suffix_ok {
            return Err(invalid());
        }

        Ok(EventId {
            raw: s.to_string(),
            date,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The calendar day encoded in the id prefix.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn suffix(&self) -> &str {
        &self.raw[DATE_PREFIX_LEN + 1..]
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.raw.starts_with(prefix)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for EventId {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventId::parse(s)
    }
}

impl TryFrom<String> for EventId {
    type Error = AgendaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EventId::parse(&value)
    }
}

impl From<EventId> for String {
    fn from(id: EventId) -> Self {
        id.raw
    }
}

/// A dated calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    /// Free-form time label, usually `HH:MM`
    #[serde(default, deserialize_with = "empty_as_none")]
    pub hour: Option<String>,
    /// Participant tags (a set; stored sorted)
    #[serde(default)]
    pub participants: BTreeSet<String>,
}

impl Event {
    pub fn date(&self) -> NaiveDate {
        self.id.date()
    }

    /// Hour for display, or the placeholder when absent.
    pub fn hour_label(&self) -> &str {
        self.hour.as_deref().unwrap_or(MISSING_HOUR)
    }

    /// One-line label used in day listings: `<hour> - <title>`.
    pub fn list_label(&self) -> String {
        format!("{} - {}", self.hour_label(), self.title)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Records written by older versions store "" for a missing description/hour.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
