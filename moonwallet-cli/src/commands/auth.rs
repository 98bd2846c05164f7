//! Auth commands - register, login, logout, reset-password

use anyhow::Result;
use moonwallet_core::LogEvent;

use super::{get_context, get_logger, log_event};
use crate::output;

pub async fn run_register(email: &str, password: &str) -> Result<()> {
    let logger = get_logger();
    let ctx = get_context().await?;

    match ctx.session_service.register(email, password).await {
        Ok(credential) => {
            log_event(&logger, LogEvent::new("user_registered").with_command("register"));
            output::success(&format!("Registered and logged in as {}", credential.email));
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("register_failed")
                    .with_command("register")
                    .with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}

pub async fn run_login(email: &str, password: &str) -> Result<()> {
    let logger = get_logger();
    let ctx = get_context().await?;

    match ctx.session_service.login(email, password).await {
        Ok(credential) => {
            log_event(&logger, LogEvent::new("user_logged_in").with_command("login"));
            output::success(&format!("Logged in as {}", credential.email));
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("login_failed")
                    .with_command("login")
                    .with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}

pub async fn run_logout() -> Result<()> {
    let logger = get_logger();
    let ctx = get_context().await?;

    if ctx.session_service.current_user().await.is_none() {
        output::info("No active session.");
        return Ok(());
    }

    ctx.session_service.logout().await;
    log_event(&logger, LogEvent::new("user_logged_out").with_command("logout"));
    output::success("Logged out");
    Ok(())
}

pub async fn run_reset_password(email: &str) -> Result<()> {
    let logger = get_logger();
    let ctx = get_context().await?;

    match ctx.session_service.reset_password(email).await {
        Ok(ack) => {
            log_event(
                &logger,
                LogEvent::new("password_reset_requested").with_command("reset-password"),
            );
            output::success(&format!("Password reset acknowledged for {}", ack.email));
            // Surface the stub honestly instead of pretending a mail went out
            output::warning("No credential was changed and no reset link was sent.");
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("password_reset_failed")
                    .with_command("reset-password")
                    .with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}
