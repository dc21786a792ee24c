//! Core of the agenda calendar.
//!
//! - `event`: the `Event` record and its date-prefixed `EventId`
//! - `store`: the persistent key-value event store
//! - `query`: date, month and year lookups by id prefix
//! - `month_grid`: month layout with today/has-events markers
//! - `form`: the add/edit form state machine
//! - `report` and `pdf`: month and year reports rendered to PDF
//! - `session`: the controller tying them together

pub mod config;
pub mod error;
pub mod event;
pub mod form;
pub mod locale;
pub mod month_grid;
pub mod pdf;
pub mod query;
pub mod report;
pub mod session;
pub mod store;

pub use error::{AgendaError, AgendaResult, StoreError};
pub use event::{Event, EventId};
pub use month_grid::{MonthGrid, YearMonth};
pub use session::Session;
