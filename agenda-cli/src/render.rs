//! Terminal rendering for agenda types.
//!
//! Extension traits that add colored output to agenda-core types using
//! owo_colors.

use agenda_core::Event;
use agenda_core::MonthGrid;
use agenda_core::locale::weekday_names;
use agenda_core::month_grid::{Cell, DayCell};
use chrono::Locale;
use owo_colors::OwoColorize;

/// Width of one grid column, including the event indicator.
const CELL_WIDTH: usize = 4;

const EVENT_INDICATOR: char = '•';

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let mut line = format!("{:>5}  {}", self.hour_label(), self.title.bold());

        if let Some(description) = &self.description {
            line.push_str(&format!("  {}", description.dimmed()));
        }
        if !self.participants.is_empty() {
            let names: Vec<_> = self.participants.iter().map(String::as_str).collect();
            line.push_str(&format!("  {}", format!("[{}]", names.join(", ")).cyan()));
        }

        format!("{}\n       {}", line, self.id.as_str().dimmed())
    }
}

/// Rendering that depends on the locale (month and weekday names).
pub trait LocalizedRender {
    fn render(&self, locale: Locale) -> String;
}

impl LocalizedRender for MonthGrid {
    fn render(&self, locale: Locale) -> String {
        let mut lines = Vec::new();

        let width = CELL_WIDTH * 7;
        lines.push(format!("{:^width$}", self.title(locale)).bold().to_string());

        let header: String = weekday_names(locale)
            .iter()
            .map(|name| format!("{:>3} ", name))
            .collect();
        lines.push(header.dimmed().to_string());

        for week in self.weeks() {
            let row: String = week.iter().map(render_cell).collect();
            lines.push(row.trim_end().to_string());
        }

        lines.join("\n")
    }
}

fn render_cell(cell: &Cell<'_>) -> String {
    match cell {
        Cell::Blank => " ".repeat(CELL_WIDTH),
        Cell::Day(day) => render_day(day),
    }
}

fn render_day(day: &DayCell) -> String {
    let number = format!("{:>3}", day.day());
    let number = if day.is_today {
        number.reversed().bold().to_string()
    } else {
        number
    };

    let indicator = if day.has_events {
        EVENT_INDICATOR.yellow().to_string()
    } else {
        " ".to_string()
    };

    format!("{number}{indicator}")
}
