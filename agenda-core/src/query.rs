//! Date-prefix queries over the event store.
//!
//! Ids start with a fixed-width `YYYY-MM-DD`, so day, month and year
//! lookups are all prefix matches of different lengths over a full scan.

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::event::{DATE_FORMAT, Event};
use crate::month_grid::YearMonth;
use crate::store::EventStore;

pub fn date_prefix(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn month_prefix(month: YearMonth) -> String {
    format!("{:04}-{:02}", month.year(), month.month())
}

pub fn year_prefix(year: i32) -> String {
    format!("{year:04}")
}

/// Events among `events` whose id starts with `prefix`.
pub fn filter_by_prefix<'a>(events: &'a [Event], prefix: &'a str) -> impl Iterator<Item = &'a Event> {
    events.iter().filter(move |e| e.id.starts_with(prefix))
}

/// Linear scan of the store for ids starting with `prefix`.
pub async fn find_by_date_prefix<S: EventStore>(
    store: &S,
    prefix: &str,
) -> Result<Vec<Event>, StoreError> {
    let events = store.get_all().await?;
    Ok(filter_by_prefix(&events, prefix).cloned().collect())
}

pub async fn events_on<S: EventStore>(store: &S, date: NaiveDate) -> Result<Vec<Event>, StoreError> {
    find_by_date_prefix(store, &date_prefix(date)).await
}

pub async fn events_in_month<S: EventStore>(
    store: &S,
    month: YearMonth,
) -> Result<Vec<Event>, StoreError> {
    find_by_date_prefix(store, &month_prefix(month)).await
}

pub async fn events_in_year<S: EventStore>(store: &S, year: i32) -> Result<Vec<Event>, StoreError> {
    find_by_date_prefix(store, &year_prefix(year)).await
}
