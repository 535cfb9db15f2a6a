//! Auth commands - signup, login, logout, whoami

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};

use super::{backend_spinner, finish_spinner, get_context, get_logger, log_event};
use crate::output;
use wichtel_core::services::LogEvent;

pub async fn signup(name: Option<String>, email: Option<String>, password: Option<String>) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Your name").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let spinner = backend_spinner("Creating your account...");
    let result = ctx.identity_service.register(&name, &email, &password).await;
    finish_spinner(spinner);

    match result {
        Ok(session) => {
            log_event(&logger, LogEvent::new("signup").with_command("signup"));
            output::success(&format!("Welcome, {}! You are now logged in.", session.name));
            println!("Run {} to set up your first party.", "wt party new".bold());
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("signup_failed").with_command("signup").with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}

pub async fn login(email: Option<String>, password: Option<String>) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let spinner = backend_spinner("Signing you in...");
    let result = ctx.identity_service.authenticate(&email, &password).await;
    finish_spinner(spinner);

    match result {
        Ok(session) => {
            log_event(&logger, LogEvent::new("login").with_command("login"));
            output::success(&format!("Welcome back, {}!", session.name));
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("login_failed").with_command("login").with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}

pub async fn logout() -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();

    ctx.identity_service.end_session().await?;
    log_event(&logger, LogEvent::new("logout").with_command("logout"));
    output::success("Logged out.");
    Ok(())
}

pub async fn whoami(json: bool) -> Result<()> {
    let ctx = get_context()?;

    match ctx.identity_service.current_user().await? {
        Some(user) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                println!("{} <{}>", user.name.bold(), user.email);
            }
        }
        None => {
            if json {
                println!("null");
            } else {
                output::info("Not logged in.");
            }
        }
    }
    Ok(())
}
