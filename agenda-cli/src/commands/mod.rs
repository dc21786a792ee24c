pub mod add;
pub mod day;
pub mod delete;
pub mod edit;
pub mod export;
pub mod interactive;
pub mod month;

use agenda_core::form::FormFields;
use agenda_core::store::EventStore;
use agenda_core::{EventId, Session, YearMonth};
use anyhow::Result;
use chrono::NaiveDate;

/// Field values given on the command line. `None` leaves a field as loaded.
pub struct FieldEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub hour: Option<String>,
    pub participants: Option<Vec<String>>,
}

impl FieldEdit {
    pub fn apply(self, fields: &mut FormFields) {
        if let Some(title) = self.title {
            fields.title = title;
        }
        if let Some(description) = self.description {
            fields.description = description;
        }
        if let Some(hour) = self.hour {
            fields.hour = hour;
        }
        if let Some(participants) = self.participants {
            fields.participants = participants.into_iter().collect();
        }
    }
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
}

pub fn parse_id(s: &str) -> Result<EventId> {
    Ok(EventId::parse(s)?)
}

/// The requested month, filling missing parts from the session's month.
pub fn resolve_month<S: EventStore>(
    session: &Session<S>,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<YearMonth> {
    let current = session.current_month();
    Ok(YearMonth::new(
        year.unwrap_or(current.year()),
        month.unwrap_or(current.month()),
    )?)
}
