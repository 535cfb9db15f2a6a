//! Party commands - create, show, edit, manage participants, launch

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::{Confirm, Input};
use rust_decimal::Decimal;

use super::{get_context, get_logger, log_event, require_user};
use crate::output;
use wichtel_core::services::LogEvent;
use wichtel_core::{Party, PartyStatus, SessionUser, WichtelContext};

#[derive(Subcommand)]
pub enum PartyCommands {
    /// Create a new party
    New {
        /// Party name
        #[arg(long)]
        name: Option<String>,
        /// Party description
        #[arg(long)]
        description: Option<String>,
        /// Minimum gift value in dollars
        #[arg(long)]
        min_value: Option<Decimal>,
        /// Participant as "Name <email>"; repeat for each person
        #[arg(long = "participant", value_name = "NAME <EMAIL>")]
        participants: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a party
    Show {
        /// Party ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit name, description, or minimum gift value (draft only)
    Edit {
        /// Party ID
        id: String,
        /// New party name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New minimum gift value
        #[arg(long)]
        min_value: Option<Decimal>,
        /// Drop the minimum gift value
        #[arg(long, conflicts_with = "min_value")]
        no_min_value: bool,
    },

    /// Add a participant and send their invitation (draft only)
    Invite {
        /// Party ID
        id: String,
        /// Participant name
        #[arg(long)]
        name: Option<String>,
        /// Participant email
        #[arg(long)]
        email: Option<String>,
    },

    /// Remove a participant (draft only)
    RemoveParticipant {
        /// Party ID
        id: String,
        /// Participant ID
        participant_id: String,
    },

    /// Draw assignments and activate the party; this cannot be undone
    Launch {
        /// Party ID
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub async fn run(command: PartyCommands) -> Result<()> {
    match command {
        PartyCommands::New { name, description, min_value, participants, json } => {
            run_new(name, description, min_value, participants, json).await
        }
        PartyCommands::Show { id, json } => run_show(&id, json).await,
        PartyCommands::Edit { id, name, description, min_value, no_min_value } => {
            run_edit(&id, name, description, min_value, no_min_value).await
        }
        PartyCommands::Invite { id, name, email } => run_invite(&id, name, email).await,
        PartyCommands::RemoveParticipant { id, participant_id } => {
            run_remove_participant(&id, &participant_id).await
        }
        PartyCommands::Launch { id, yes } => run_launch(&id, yes).await,
    }
}

/// Parse a participant argument of the form `Name <email>`
fn parse_person(raw: &str) -> Result<(String, String)> {
    let raw = raw.trim();
    if let (Some(open), true) = (raw.find('<'), raw.ends_with('>')) {
        let name = raw[..open].trim();
        let email = raw[open + 1..raw.len() - 1].trim();
        if !name.is_empty() && !email.is_empty() {
            return Ok((name.to_string(), email.to_string()));
        }
    }
    anyhow::bail!("Invalid participant '{}'. Use the form \"Name <email>\"", raw);
}

/// Prompt for participants until an empty name is entered
fn prompt_for_participants() -> Result<Vec<(String, String)>> {
    let mut people = Vec::new();
    println!("Add at least 2 participants (leave the name empty to finish).");
    loop {
        let name: String = Input::new()
            .with_prompt(format!("Participant {} name", people.len() + 1))
            .allow_empty(true)
            .interact_text()?;
        if name.trim().is_empty() {
            break;
        }
        let email: String = Input::new()
            .with_prompt(format!("{}'s email", name.trim()))
            .interact_text()?;
        people.push((name, email));
    }
    Ok(people)
}

async fn run_new(
    name: Option<String>,
    description: Option<String>,
    min_value: Option<Decimal>,
    participants: Vec<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let user = require_user(&ctx).await?;

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Party name").interact_text()?,
    };
    let description = match description {
        Some(d) => d,
        None => Input::new().with_prompt("Description").interact_text()?,
    };
    let people = if participants.is_empty() {
        prompt_for_participants()?
    } else {
        participants
            .iter()
            .map(|p| parse_person(p))
            .collect::<Result<Vec<_>>>()?
    };

    let party = ctx
        .party_service
        .create_party(&user, &name, &description, min_value, &people)
        .await?;
    log_event(&logger, LogEvent::new("party_created").with_command("party new"));

    if json {
        println!("{}", serde_json::to_string_pretty(&party)?);
        return Ok(());
    }

    output::success(&format!(
        "Party '{}' created with {} participants. Invitations recorded for everyone you added.",
        party.name,
        party.participants.len()
    ));
    println!("Party ID: {}", party.id.bold());
    println!(
        "Launch it with {} once everyone is in.",
        format!("wt party launch {}", party.id).bold()
    );
    Ok(())
}

async fn run_show(id: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = require_user(&ctx).await?;
    let party = ctx.party_service.view_party(id, &user).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&party)?);
        return Ok(());
    }

    print_party(&ctx, &party, &user).await?;
    Ok(())
}

async fn print_party(ctx: &WichtelContext, party: &Party, user: &SessionUser) -> Result<()> {
    println!("{} ({})", party.name.bold(), party.status.as_str());
    println!("{}", party.description);
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["ID", &party.id]);
    table.add_row(vec!["Created by", &party.created_by_name]);
    table.add_row(vec!["Participants", &party.participants.len().to_string()]);
    table.add_row(vec!["Min gift value", &output::format_min_value(party.min_value)]);
    if let Some(launched_at) = party.launched_at {
        table.add_row(vec!["Launched", &launched_at.format("%Y-%m-%d %H:%M UTC").to_string()]);
    }
    println!("{}", table);
    println!();

    println!("{}", "Participants".bold());
    let mut table = output::create_table();
    table.set_header(vec!["ID", "Name", "Email"]);
    for participant in &party.participant_details {
        let name = if participant.id == user.id {
            format!("{} (you)", participant.name)
        } else {
            participant.name.clone()
        };
        table.add_row(vec![participant.id.clone(), name, participant.email.clone()]);
    }
    println!("{}", table);

    if party.status == PartyStatus::Active {
        println!();
        match party.receiver_for(&user.id) {
            Some(target) => {
                output::success(&format!("You are buying a gift for: {}", target.name.bold()));
                let ideas = ctx
                    .suggestion_service
                    .suggestions_for_participant(&party.id, &target.id)
                    .await?;
                if !ideas.is_empty() {
                    println!("Gift ideas for {}:", target.name);
                    for idea in &ideas {
                        let price = idea
                            .price
                            .map(|p| format!(" (~${})", p))
                            .unwrap_or_default();
                        println!("  - {}{}", idea.title, price);
                    }
                }
            }
            None => output::info("Assignments are drawn, but you are not a giver in this party."),
        }
    } else if party.created_by == user.id {
        println!();
        if party.participants.len() >= wichtel_core::domain::MIN_LAUNCH_PARTICIPANTS {
            println!("Ready to launch: {}", format!("wt party launch {}", party.id).bold());
        } else {
            output::info("You need at least 3 participants to launch the party.");
        }
    }
    Ok(())
}

async fn run_edit(
    id: &str,
    name: Option<String>,
    description: Option<String>,
    min_value: Option<Decimal>,
    no_min_value: bool,
) -> Result<()> {
    let ctx = get_context()?;
    let user = require_user(&ctx).await?;
    let current = ctx.party_service.manage_party(id, &user).await?;

    // Unspecified fields keep their current values.
    let name = name.unwrap_or_else(|| current.name.clone());
    let description = description.unwrap_or_else(|| current.description.clone());
    let min_value = if no_min_value {
        None
    } else {
        min_value.or(current.min_value)
    };

    let updated = ctx
        .party_service
        .update_basic_info(id, &user, &name, &description, min_value)
        .await?;
    output::success(&format!("Party '{}' updated.", updated.name));
    Ok(())
}

async fn run_invite(id: &str, name: Option<String>, email: Option<String>) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let user = require_user(&ctx).await?;

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Participant name").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Participant email").interact_text()?,
    };

    let (party, invitation) = ctx
        .party_service
        .add_participant(id, &user, &name, &email)
        .await?;
    log_event(&logger, LogEvent::new("participant_invited").with_command("party invite"));

    output::success(&format!(
        "{} added to '{}' and invited ({} participants now).",
        name,
        party.name,
        party.participants.len()
    ));
    println!("Invitation ID: {}", invitation.id);
    Ok(())
}

async fn run_remove_participant(id: &str, participant_id: &str) -> Result<()> {
    let ctx = get_context()?;
    let user = require_user(&ctx).await?;

    let (party, removed) = ctx
        .party_service
        .remove_participant(id, &user, participant_id)
        .await?;
    if removed {
        output::success(&format!(
            "Participant removed ({} participants left).",
            party.participants.len()
        ));
    } else {
        output::info("No such participant in this party; nothing changed.");
    }
    Ok(())
}

async fn run_launch(id: &str, yes: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let user = require_user(&ctx).await?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(
                "Launch the party? Assignments will be drawn and participants can no longer change",
            )
            .default(false)
            .interact()?;
        if !confirmed {
            output::info("Launch cancelled.");
            return Ok(());
        }
    }

    let party = ctx.party_service.launch(id, &user).await?;
    log_event(&logger, LogEvent::new("party_launched").with_command("party launch"));

    output::success(&format!(
        "Party '{}' launched! Every participant now has a Secret Santa target.",
        party.name
    ));
    if let Some(target) = party.receiver_for(&user.id) {
        println!("You are buying a gift for: {}", target.name.bold());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_person() {
        let (name, email) = parse_person("Bob Ross <bob@example.com>").unwrap();
        assert_eq!(name, "Bob Ross");
        assert_eq!(email, "bob@example.com");

        assert!(parse_person("bob@example.com").is_err());
        assert!(parse_person("<bob@example.com>").is_err());
        assert!(parse_person("Bob <>").is_err());
    }
}
