//! Interactive month browser.
//!
//! Shows the current month, lets the user move between months, open a day,
//! pick or add an event and save/delete it through the form. Storage and
//! validation failures are reported and the loop carries on.

use agenda_core::config::AgendaConfig;
use agenda_core::report::ReportScope;
use agenda_core::store::EventStore;
use agenda_core::{AgendaError, Session};
use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::Input;
use owo_colors::OwoColorize;

use crate::prompt;

#[derive(Clone, Copy)]
enum MenuAction {
    NextMonth,
    PrevMonth,
    OpenDay,
    ExportMonth,
    ExportYear,
    Quit,
}

const MENU: [(&str, MenuAction); 6] = [
    ("Next month", MenuAction::NextMonth),
    ("Previous month", MenuAction::PrevMonth),
    ("Open a day", MenuAction::OpenDay),
    ("Export month to PDF", MenuAction::ExportMonth),
    ("Export year to PDF", MenuAction::ExportYear),
    ("Quit", MenuAction::Quit),
];

#[derive(Clone, Copy, PartialEq)]
enum FormAction {
    Save,
    Delete,
    Cancel,
}

impl std::fmt::Display for FormAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match self {
            FormAction::Save => "Save",
            FormAction::Delete => "Delete",
            FormAction::Cancel => "Cancel",
        };
        f.write_str(label)
    }
}

pub async fn run<S: EventStore>(session: &mut Session<S>, config: &AgendaConfig) -> Result<()> {
    let labels: Vec<&str> = MENU.iter().map(|(label, _)| *label).collect();

    loop {
        println!();
        if let Err(e) = super::month::print(session).await {
            report_error(&e);
        }
        println!();

        match MENU[prompt::choose("  What next?", &labels)?].1 {
            MenuAction::NextMonth => {
                session.next_month();
            }
            MenuAction::PrevMonth => {
                session.prev_month();
            }
            MenuAction::OpenDay => {
                let date = prompt_day(session)?;
                day_menu(session, date, config).await?;
            }
            MenuAction::ExportMonth => {
                let scope = ReportScope::Month(session.current_month());
                export(session, scope, config).await;
            }
            MenuAction::ExportYear => {
                let scope = ReportScope::Year(session.current_month().year());
                export(session, scope, config).await;
            }
            MenuAction::Quit => return Ok(()),
        }
    }
}

/// Ask for a day of the current month (or a full YYYY-MM-DD date).
fn prompt_day<S: EventStore>(session: &Session<S>) -> Result<NaiveDate> {
    let month = session.current_month();
    let prompt = format!("  Day (1-{}, or YYYY-MM-DD)", month.days_in_month());

    loop {
        let input: String = Input::new().with_prompt(&prompt).interact_text()?;
        let input = input.trim();

        let parsed = match input.parse::<u32>() {
            Ok(day) => NaiveDate::from_ymd_opt(month.year(), month.month(), day),
            Err(_) => super::parse_date(input).ok(),
        };

        match parsed {
            Some(date) => return Ok(date),
            None => eprintln!("  {}", format!("Not a day of {}: '{}'", month, input).red()),
        }
    }
}

/// List the day's events; pick one to edit or add a new one.
async fn day_menu<S: EventStore>(
    session: &mut Session<S>,
    date: NaiveDate,
    config: &AgendaConfig,
) -> Result<()> {
    if let Err(e) = session.open_day(date).await {
        report_error(&e.into());
        return Ok(());
    }

    loop {
        let listed = session.form().listed().len();
        let mut items: Vec<String> = session
            .form()
            .listed()
            .iter()
            .map(|e| e.list_label())
            .collect();
        items.push("+ New event".to_string());
        items.push("Back".to_string());

        let heading = format!("  {}", date.format("%d/%m/%Y"));
        let picked = prompt::choose(&heading, &items)?;

        if picked == listed + 1 {
            session.close_form();
            return Ok(());
        }
        if picked == listed {
            session.form_mut().reset();
        } else {
            session.form_mut().select(picked);
        }

        if edit_form(session, config).await? {
            return Ok(());
        }
    }
}

/// Fill and submit the form. Returns `true` once the form was saved or the
/// event deleted (the form is closed then).
async fn edit_form<S: EventStore>(session: &mut Session<S>, config: &AgendaConfig) -> Result<bool> {
    loop {
        prompt::fill_fields(&mut session.form_mut().fields, &config.participants)?;

        let mut actions = vec![FormAction::Save];
        if session.form().can_delete() {
            actions.push(FormAction::Delete);
        }
        actions.push(FormAction::Cancel);

        match actions[prompt::choose("  Action", &actions)?] {
            FormAction::Save => match session.save().await {
                Ok(event) => {
                    println!("{}", format!("  Saved: {}", event.title).green());
                    return Ok(true);
                }
                Err(AgendaError::Validation(message)) => {
                    eprintln!("  {}", message.red());
                }
                Err(e) => {
                    report_error(&e.into());
                    return Ok(false);
                }
            },
            FormAction::Delete => match session.delete().await {
                Ok(_) => {
                    println!("{}", "  Deleted".red());
                    return Ok(true);
                }
                Err(e) => {
                    report_error(&e.into());
                    return Ok(false);
                }
            },
            FormAction::Cancel => {
                session.form_mut().reset();
                return Ok(false);
            }
        }
    }
}

async fn export<S: EventStore>(session: &Session<S>, scope: ReportScope, config: &AgendaConfig) {
    match session.export(scope, &config.export_path()).await {
        Ok(path) => println!("{}", format!("  Saved {}", path.display()).green()),
        Err(e) => report_error(&e.into()),
    }
}

fn report_error(e: &anyhow::Error) {
    eprintln!("  {}", format!("{:#}", e).red());
}
