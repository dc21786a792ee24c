use agenda_core::store::EventStore;
use agenda_core::{Session, YearMonth};
use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use super::FieldEdit;

pub async fn run<S: EventStore>(session: &mut Session<S>, date: NaiveDate, edit: FieldEdit) -> Result<()> {
    session.open_day(date).await?;
    edit.apply(&mut session.form_mut().fields);

    let event = session.save().await?;
    println!("{}", format!("  Created: {} ({})", event.title, event.id).green());

    session.go_to(YearMonth::of(event.date()));
    super::month::print(session).await
}
