use agenda_core::Session;
use agenda_core::store::EventStore;
use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::render::Render;

pub async fn run<S: EventStore>(session: &Session<S>, date: NaiveDate) -> Result<()> {
    let events = session.events_on(date).await?;

    println!("{}", date.format("%d/%m/%Y").bold());

    if events.is_empty() {
        println!("{}", "  No events".dimmed());
        return Ok(());
    }

    for event in &events {
        println!("{}", event.render());
    }

    Ok(())
}
