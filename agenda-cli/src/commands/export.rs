use std::path::Path;

use agenda_core::Session;
use agenda_core::report::ReportScope;
use agenda_core::store::EventStore;
use anyhow::Result;
use owo_colors::OwoColorize;

pub async fn run<S: EventStore>(session: &Session<S>, scope: ReportScope, dir: &Path) -> Result<()> {
    let path = session.export(scope, dir).await?;
    println!("{}", format!("  Saved {}", path.display()).green());
    Ok(())
}
