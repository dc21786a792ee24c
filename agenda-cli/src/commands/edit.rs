use agenda_core::store::EventStore;
use agenda_core::{EventId, Session, YearMonth};
use anyhow::Result;
use owo_colors::OwoColorize;

use super::FieldEdit;

pub async fn run<S: EventStore>(session: &mut Session<S>, id: EventId, edit: FieldEdit) -> Result<()> {
    if !session.open_event(&id).await? {
        anyhow::bail!("Event '{}' not found", id);
    }
    edit.apply(&mut session.form_mut().fields);

    let event = session.save().await?;
    println!("{}", format!("  Updated: {}", event.title).yellow());

    session.go_to(YearMonth::of(event.date()));
    super::month::print(session).await
}
