//! Interactive prompts for the event form.

use std::collections::BTreeSet;
use std::fmt::Display;

use agenda_core::form::FormFields;
use anyhow::Result;
use dialoguer::{Input, MultiSelect, Select};

/// Prompt for every form field, starting from the current values.
///
/// Blank input is accepted everywhere; the form decides what is valid.
pub fn fill_fields(fields: &mut FormFields, roster: &[String]) -> Result<()> {
    fields.title = text("  Title", &fields.title)?;
    fields.description = text("  Description (skip)", &fields.description)?;
    fields.hour = text("  Hour, e.g. 14:30 (skip)", &fields.hour)?;

    let options = participant_options(roster, &fields.participants);
    if !options.is_empty() {
        let defaults: Vec<bool> = options
            .iter()
            .map(|p| fields.participants.contains(p))
            .collect();
        let picked = MultiSelect::new()
            .with_prompt("  Participants (space to toggle, enter to confirm)")
            .items(&options)
            .defaults(&defaults)
            .interact()?;
        fields.participants = picked.into_iter().map(|i| options[i].clone()).collect();
    }

    Ok(())
}

/// Roster entries first, then tags already on the event that the roster lacks.
pub fn participant_options(roster: &[String], current: &BTreeSet<String>) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for name in roster.iter().chain(current.iter()) {
        if !options.contains(name) {
            options.push(name.clone());
        }
    }
    options
}

/// Pick one of `items`; returns its index.
pub fn choose<T: Display>(prompt: &str, items: &[T]) -> Result<usize> {
    Ok(Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?)
}

pub fn text(prompt: &str, initial: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?)
}
