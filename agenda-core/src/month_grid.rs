//! Month grid layout.
//!
//! A month is drawn as a Sunday-first week grid: blank cells up to the
//! weekday of the 1st, then one cell per day.

use std::fmt;

use chrono::{Datelike, Locale, Months, NaiveDate};

use crate::error::{AgendaError, AgendaResult};
use crate::event::Event;
use crate::locale;
use crate::query::date_prefix;

/// A calendar month (1-based month number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> AgendaResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self::of)
            .ok_or_else(|| AgendaError::InvalidDate(format!("{year:04}-{month:02} is not a month")))
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Constructed through `new`/`of`, so the 1st always exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Following month; December rolls over into January of the next year.
    pub fn next(&self) -> Self {
        self.first_day()
            .checked_add_months(Months::new(1))
            .map(Self::of)
            .unwrap_or(*self)
    }

    /// Preceding month; January rolls back into December of the previous year.
    pub fn prev(&self) -> Self {
        self.first_day()
            .checked_sub_months(Months::new(1))
            .map(Self::of)
            .unwrap_or(*self)
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(31)
    }

    /// Weekday of the 1st, 0 = Sunday .. 6 = Saturday.
    pub fn first_weekday(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    /// Localized month name, e.g. "outubro" for pt_BR.
    pub fn name(&self, locale: Locale) -> String {
        locale::month_name(self.first_day(), locale)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One day of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub has_events: bool,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// A grid cell: padding before the 1st, or a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Blank,
    Day(&'a DayCell),
}

/// Fully computed grid for one month.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    /// Lay out `month`, marking `today` and every day that has at least one
    /// event in `events` (ids are matched by their `YYYY-MM-DD` prefix).
    pub fn build(month: YearMonth, today: NaiveDate, events: &[Event]) -> Self {
        let days = (1..=month.days_in_month())
            .filter_map(|day| NaiveDate::from_ymd_opt(month.year(), month.month(), day))
            .map(|date| {
                let prefix = date_prefix(date);
                DayCell {
                    date,
                    is_today: date == today,
                    has_events: events.iter().any(|e| e.id.starts_with(&prefix)),
                }
            })
            .collect();

        MonthGrid {
            month,
            leading_blanks: month.first_weekday(),
            days,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.leading_blanks as usize + self.days.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell<'_>> {
        std::iter::repeat_n(Cell::Blank, self.leading_blanks as usize)
            .chain(self.days.iter().map(Cell::Day))
    }

    /// Cells chunked into rows of seven; the last row may be shorter.
    pub fn weeks(&self) -> Vec<Vec<Cell<'_>>> {
        let cells: Vec<_> = self.cells().collect();
        cells.chunks(7).map(|week| week.to_vec()).collect()
    }

    /// Heading such as "Outubro 2026".
    pub fn title(&self, locale: Locale) -> String {
        format!(
            "{} {}",
            locale::capitalize(&self.month.name(locale)),
            self.month.year()
        )
    }
}
