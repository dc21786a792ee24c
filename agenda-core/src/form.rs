//! Add/edit form state machine.
//!
//! The form is *closed* until a day is opened. Opening a day puts it in
//! *add* mode with that day's events listed; picking one of them switches
//! to *edit* mode with every field populated. Saving produces a validated
//! [`Draft`]; the caller persists it and closes the form.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::{AgendaError, AgendaResult};
use crate::event::{Event, EventId};

/// Shown when a save is attempted with a blank title.
pub const TITLE_REQUIRED: &str = "O título do evento é obrigatório!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    Add,
    Edit,
}

/// Raw, unvalidated field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub description: String,
    pub hour: String,
    pub participants: BTreeSet<String>,
}

impl FormFields {
    fn from_event(event: &Event) -> Self {
        FormFields {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            hour: event.hour.clone().unwrap_or_default(),
            participants: event.participants.clone(),
        }
    }
}

/// A validated form, ready to become an [`Event`] once it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    /// Present when editing; new events get an id minted for `date`.
    pub id: Option<EventId>,
    pub date: NaiveDate,
    pub title: String,
    pub description: Option<String>,
    pub hour: Option<String>,
    pub participants: BTreeSet<String>,
}

impl Draft {
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            hour: self.hour,
            participants: self.participants,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventForm {
    mode: FormMode,
    date: Option<NaiveDate>,
    id: Option<EventId>,
    listed: Vec<Event>,
    pub fields: FormFields,
}

impl Default for EventForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EventForm {
    pub fn new() -> Self {
        EventForm {
            mode: FormMode::Closed,
            date: None,
            id: None,
            listed: Vec::new(),
            fields: FormFields::default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// The day the form was opened on.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Events of the opened day, selectable for editing.
    pub fn listed(&self) -> &[Event] {
        &self.listed
    }

    pub fn can_delete(&self) -> bool {
        self.mode == FormMode::Edit && self.id.is_some()
    }

    /// Open on `date` in add mode, listing that day's `events`.
    pub fn open(&mut self, date: NaiveDate, events: Vec<Event>) {
        self.reset();
        self.date = Some(date);
        self.listed = events;
    }

    /// Clear every field and return to add mode. The listing is kept.
    pub fn reset(&mut self) {
        self.mode = FormMode::Add;
        self.id = None;
        self.fields = FormFields::default();
    }

    /// Populate the form from the listed event at `index` and switch to edit
    /// mode. Out-of-range indexes leave the form untouched.
    pub fn select(&mut self, index: usize) -> Option<&Event> {
        if self.mode == FormMode::Closed {
            return None;
        }
        let event = self.listed.get(index)?;

        self.fields = FormFields::from_event(event);
        self.id = Some(event.id.clone());
        self.mode = FormMode::Edit;
        Some(event)
    }

    /// Open straight into edit mode for one event.
    pub fn edit(&mut self, event: Event) {
        self.open(event.date(), vec![event]);
        self.select(0);
    }

    pub fn close(&mut self) {
        *self = Self::new();
    }

    /// Validate the fields. A blank title is rejected and nothing changes.
    pub fn draft(&self) -> AgendaResult<Draft> {
        let date = match (self.mode, self.date) {
            (FormMode::Closed, _) | (_, None) => return Err(AgendaError::FormClosed),
            (_, Some(date)) => date,
        };

        let title = self.fields.title.trim();
        if title.is_empty() {
            return Err(AgendaError::Validation(TITLE_REQUIRED.to_string()));
        }

        Ok(Draft {
            id: self.id.clone(),
            date,
            title: title.to_string(),
            description: non_blank(&self.fields.description),
            hour: non_blank(&self.fields.hour),
            participants: self
                .fields
                .participants
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect(),
        })
    }

    /// Id to delete, if an existing event is loaded.
    pub fn delete_target(&self) -> Option<&EventId> {
        if self.can_delete() { self.id.as_ref() } else { None }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
