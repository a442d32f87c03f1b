//! List command implementation.

use crate::error::{Error, Result};
use crate::model::Invitee;
use crate::sync::SyncEngine;
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
struct ListOutput {
    count: usize,
    invitees: Vec<Invitee>,
}

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the store does not exist or cannot be queried.
pub fn execute(engine: &SyncEngine, json: bool) -> Result<()> {
    let invitees = engine.list().map_err(Error::sync("List"))?;

    if json {
        let output = ListOutput {
            count: invitees.len(),
            invitees,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    print_invitee_list(&invitees);
    Ok(())
}

fn print_invitee_list(invitees: &[Invitee]) {
    if invitees.is_empty() {
        println!("No invitees stored.");
        return;
    }

    println!("Invitees ({} found):", invitees.len());
    println!();
    for invitee in invitees {
        let fields = &invitee.fields;
        let party = fields.party_size.as_deref().unwrap_or("?");
        println!(
            "[{:>4}] {} (party of {party})",
            invitee.id,
            fields.name.bold()
        );
        if let Some(ref card) = fields.name_on_card {
            println!("        Card:   {card}");
        }
        if let Some(ref events) = fields.events {
            println!("        Events: {events}");
        }
        if let Some(ref notes) = fields.notes {
            println!("        {}", notes.dimmed());
        }
    }
}
