use agenda_core::store::EventStore;
use agenda_core::{EventId, Session, YearMonth};
use anyhow::Result;
use owo_colors::OwoColorize;

pub async fn run<S: EventStore>(session: &mut Session<S>, id: EventId) -> Result<()> {
    // Unknown ids leave the form without a target, so the delete is a no-op.
    session.open_event(&id).await?;

    match session.delete().await? {
        Some(id) => println!("{}", format!("  Deleted: {}", id).red()),
        None => println!("{}", format!("  No event with id {}", id).dimmed()),
    }

    session.go_to(YearMonth::of(id.date()));
    super::month::print(session).await
}
