//! Month and year event reports.
//!
//! Builds the sorted, formatted table that the PDF renderer lays out.

use std::cmp::Ordering;
use std::fmt;

use chrono::Locale;

use crate::event::{Event, MISSING_HOUR};
use crate::locale::capitalize;
use crate::month_grid::YearMonth;
use crate::query::{month_prefix, year_prefix};

pub const REPORT_HEADER: [&str; 5] = ["Data", "Horário", "Título", "Descrição", "Participantes"];

pub const NO_DESCRIPTION: &str = "Sem descrição";
pub const NO_PARTICIPANTS: &str = "Nenhum";

/// Sort key used for events without an hour in year reports.
const HOUR_SORT_DEFAULT: &str = "00:00";

/// What a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    Month(YearMonth),
    Year(i32),
}

impl ReportScope {
    /// Id prefix selecting the events of this scope.
    pub fn prefix(&self) -> String {
        match self {
            ReportScope::Month(month) => month_prefix(*month),
            ReportScope::Year(year) => year_prefix(*year),
        }
    }

    pub fn title(&self, locale: Locale) -> String {
        match self {
            ReportScope::Month(month) => format!(
                "Relatório de Eventos - {} {}",
                capitalize(&month.name(locale)),
                month.year()
            ),
            ReportScope::Year(year) => format!("Relatório Anual de Eventos - {year}"),
        }
    }

    /// `Relatorio_<month>_<year>.pdf` or `Relatorio_Anual_<year>.pdf`.
    pub fn file_name(&self, locale: Locale) -> String {
        match self {
            ReportScope::Month(month) => {
                format!("Relatorio_{}_{}.pdf", month.name(locale), month.year())
            }
            ReportScope::Year(year) => format!("Relatorio_Anual_{year}.pdf"),
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            ReportScope::Month(_) => "Nenhum evento agendado para este mês.",
            ReportScope::Year(_) => "Nenhum evento agendado para este ano.",
        }
    }
}

impl fmt::Display for ReportScope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReportScope::Month(month) => write!(f, "{month}"),
            ReportScope::Year(year) => write!(f, "{year}"),
        }
    }
}

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub date: String,
    pub hour: String,
    pub title: String,
    pub description: String,
    pub participants: String,
}

impl ReportRow {
    pub fn from_event(event: &Event) -> Self {
        let participants = if event.participants.is_empty() {
            NO_PARTICIPANTS.to_string()
        } else {
            event
                .participants
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };

        ReportRow {
            date: event.date().format("%d/%m/%Y").to_string(),
            hour: event.hour.clone().unwrap_or_else(|| MISSING_HOUR.to_string()),
            title: event.title.clone(),
            description: event
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            participants,
        }
    }

    pub fn cells(&self) -> [&str; 5] {
        [
            self.date.as_str(),
            self.hour.as_str(),
            self.title.as_str(),
            self.description.as_str(),
            self.participants.as_str(),
        ]
    }
}

/// Everything the PDF renderer needs.
#[derive(Debug, Clone)]
pub struct Report {
    pub scope: ReportScope,
    pub title: String,
    pub file_name: String,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Sort `events` for `scope` and format one row per event.
    pub fn build(scope: ReportScope, mut events: Vec<Event>, locale: Locale) -> Self {
        sort_events(&mut events, scope);

        Report {
            scope,
            title: scope.title(locale),
            file_name: scope.file_name(locale),
            rows: events.iter().map(ReportRow::from_event).collect(),
        }
    }

    pub fn header(&self) -> [&'static str; 5] {
        REPORT_HEADER
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn empty_message(&self) -> &'static str {
        self.scope.empty_message()
    }
}

/// Chronological by the id's date. Year reports also order same-day events
/// by hour, with a missing hour counted as "00:00". The sort is stable.
pub fn sort_events(events: &mut [Event], scope: ReportScope) {
    match scope {
        ReportScope::Month(_) => events.sort_by_key(|e| e.date()),
        ReportScope::Year(_) => events.sort_by(compare_date_then_hour),
    }
}

fn compare_date_then_hour(a: &Event, b: &Event) -> Ordering {
    let hour = |e: &Event| e.hour.clone().unwrap_or_else(|| HOUR_SORT_DEFAULT.to_string());
    a.date().cmp(&b.date()).then_with(|| hour(a).cmp(&hour(b)))
}
