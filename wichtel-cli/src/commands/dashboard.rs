//! Dashboard command - my parties and my invitations at a glance

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::{get_context, require_user};
use crate::output;
use wichtel_core::{Invitation, InvitationStatus, Party};

#[derive(Debug, Serialize)]
struct Dashboard {
    parties: Vec<Party>,
    invitations: Vec<Invitation>,
}

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = require_user(&ctx).await?;

    let parties = ctx.party_service.list_for_user(&user).await?;
    let invitations = ctx.invitation_service.invitations_for(&user).await?;

    if json {
        let dashboard = Dashboard { parties, invitations };
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    println!("{}", format!("Welcome back, {}!", user.name).bold());
    println!();

    println!("{}", "My Parties".bold());
    if parties.is_empty() {
        println!("  No parties yet. Run {} to create one.", "wt party new".bold());
    } else {
        let mut table = output::create_table();
        table.set_header(vec!["ID", "Name", "Status", "Participants", "Min Gift"]);
        for party in &parties {
            table.add_row(vec![
                party.id.clone(),
                party.name.clone(),
                party.status.as_str().to_string(),
                party.participants.len().to_string(),
                output::format_min_value(party.min_value),
            ]);
        }
        println!("{}", table);
    }
    println!();

    let pending = invitations.iter().filter(|i| i.is_pending()).count();
    println!("{}", format!("Invitations ({} pending)", pending).bold());
    if invitations.is_empty() {
        println!("  No invitations.");
    } else {
        let mut table = output::create_table();
        table.set_header(vec!["ID", "Party", "Invited by", "Status"]);
        for invitation in &invitations {
            let status = match invitation.status {
                InvitationStatus::Pending => invitation.status.as_str().yellow().to_string(),
                InvitationStatus::Accepted => invitation.status.as_str().green().to_string(),
                InvitationStatus::Declined => invitation.status.as_str().red().to_string(),
            };
            table.add_row(vec![
                invitation.id.clone(),
                invitation.party_name.clone(),
                invitation.invited_by_name.clone(),
                status,
            ]);
        }
        println!("{}", table);
        if pending > 0 {
            println!(
                "Answer with {} or {}.",
                "wt invites accept <id>".bold(),
                "wt invites decline <id>".bold()
            );
        }
    }
    Ok(())
}
