//! Invitation commands - list, accept, decline

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::{get_context, get_logger, log_event, require_user};
use crate::output;
use wichtel_core::services::LogEvent;
use wichtel_core::InvitationStatus;

#[derive(Subcommand)]
pub enum InviteCommands {
    /// List your invitations
    List {
        /// Only show pending invitations
        #[arg(long)]
        pending: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Accept an invitation and join the party
    Accept {
        /// Invitation ID
        id: String,
    },

    /// Decline an invitation
    Decline {
        /// Invitation ID
        id: String,
    },
}

pub async fn run(command: InviteCommands) -> Result<()> {
    match command {
        InviteCommands::List { pending, json } => run_list(pending, json).await,
        InviteCommands::Accept { id } => run_accept(&id).await,
        InviteCommands::Decline { id } => run_decline(&id).await,
    }
}

async fn run_list(pending: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = require_user(&ctx).await?;

    let mut invitations = ctx.invitation_service.invitations_for(&user).await?;
    if pending {
        invitations.retain(|i| i.status == InvitationStatus::Pending);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&invitations)?);
        return Ok(());
    }

    if invitations.is_empty() {
        output::info("No invitations.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Party", "Invited by", "Status", "Received"]);
    for invitation in &invitations {
        let status = match invitation.status {
            InvitationStatus::Pending => "pending".yellow().to_string(),
            InvitationStatus::Accepted => "accepted".green().to_string(),
            InvitationStatus::Declined => "declined".red().to_string(),
        };
        table.add_row(vec![
            invitation.id.clone(),
            invitation.party_name.clone(),
            invitation.invited_by_name.clone(),
            status,
            invitation.created_at.format("%Y-%m-%d").to_string(),
        ]);
    }
    println!("{}", table);
    Ok(())
}

async fn run_accept(id: &str) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let user = require_user(&ctx).await?;

    let (invitation, party) = ctx.invitation_service.accept(id, &user).await?;
    log_event(&logger, LogEvent::new("invitation_accepted").with_command("invites accept"));

    output::success(&format!("You joined '{}'!", invitation.party_name));
    println!(
        "See the details with {}.",
        format!("wt party show {}", party.id).bold()
    );
    Ok(())
}

async fn run_decline(id: &str) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let user = require_user(&ctx).await?;

    let invitation = ctx.invitation_service.decline(id, &user).await?;
    log_event(&logger, LogEvent::new("invitation_declined").with_command("invites decline"));

    output::info(&format!("Invitation to '{}' declined.", invitation.party_name));
    Ok(())
}
