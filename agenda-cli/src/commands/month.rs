use agenda_core::store::EventStore;
use agenda_core::{Session, YearMonth};
use anyhow::Result;

use crate::render::LocalizedRender;

pub async fn run<S: EventStore>(session: &mut Session<S>, month: YearMonth) -> Result<()> {
    session.go_to(month);
    print(session).await
}

/// Redraw the session's current month.
pub async fn print<S: EventStore>(session: &Session<S>) -> Result<()> {
    let grid = session.render().await?;
    println!("{}", grid.render(session.locale()));
    Ok(())
}
