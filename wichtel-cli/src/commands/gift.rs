//! Gift suggestion commands - add, remove, list

use anyhow::Result;
use clap::Subcommand;
use rust_decimal::Decimal;

use super::{get_context, get_logger, log_event, require_user};
use crate::output;
use wichtel_core::services::LogEvent;

#[derive(Subcommand)]
pub enum GiftCommands {
    /// Suggest a gift for a participant
    Add {
        /// Party ID
        party_id: String,
        /// Participant the gift is for
        #[arg(long = "for", value_name = "PARTICIPANT_ID")]
        participant_id: String,
        /// Short title for the idea
        #[arg(long)]
        title: String,
        /// Longer description
        #[arg(long)]
        description: Option<String>,
        /// Approximate price in dollars
        #[arg(long)]
        price: Option<Decimal>,
        /// Link to the product
        #[arg(long)]
        url: Option<String>,
    },

    /// Remove one of your own suggestions
    Remove {
        /// Suggestion ID
        id: String,
    },

    /// List gift suggestions for a party
    List {
        /// Party ID
        party_id: String,
        /// Only suggestions for this participant
        #[arg(long = "for", value_name = "PARTICIPANT_ID")]
        participant_id: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: GiftCommands) -> Result<()> {
    match command {
        GiftCommands::Add { party_id, participant_id, title, description, price, url } => {
            run_add(&party_id, &participant_id, &title, description, price, url).await
        }
        GiftCommands::Remove { id } => run_remove(&id).await,
        GiftCommands::List { party_id, participant_id, json } => {
            run_list(&party_id, participant_id.as_deref(), json).await
        }
    }
}

async fn run_add(
    party_id: &str,
    participant_id: &str,
    title: &str,
    description: Option<String>,
    price: Option<Decimal>,
    url: Option<String>,
) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let user = require_user(&ctx).await?;

    let suggestion = ctx
        .suggestion_service
        .add_suggestion(
            party_id,
            participant_id,
            title,
            description.as_deref(),
            price,
            url.as_deref(),
            &user,
        )
        .await?;
    log_event(&logger, LogEvent::new("suggestion_added").with_command("gift add"));

    output::success(&format!("Suggestion '{}' added.", suggestion.title));
    println!("Suggestion ID: {}", suggestion.id);
    Ok(())
}

async fn run_remove(id: &str) -> Result<()> {
    let ctx = get_context()?;
    let user = require_user(&ctx).await?;

    ctx.suggestion_service.remove_suggestion(id, &user).await?;
    output::success("Suggestion removed.");
    Ok(())
}

async fn run_list(party_id: &str, participant_id: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = require_user(&ctx).await?;

    // Listing goes through the party so membership is checked first.
    let party = ctx.party_service.view_party(party_id, &user).await?;
    let suggestions = match participant_id {
        Some(pid) => {
            ctx.suggestion_service
                .suggestions_for_participant(party_id, pid)
                .await?
        }
        None => ctx.suggestion_service.suggestions_for_party(party_id).await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        output::info("No gift suggestions yet.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "For", "Title", "Price", "URL"]);
    for suggestion in &suggestions {
        let target = party
            .participant(&suggestion.participant_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| suggestion.participant_id.clone());
        table.add_row(vec![
            suggestion.id.clone(),
            target,
            suggestion.title.clone(),
            suggestion
                .price
                .map(|p| format!("${}", p))
                .unwrap_or_else(|| "-".to_string()),
            suggestion.url.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{}", table);
    Ok(())
}
