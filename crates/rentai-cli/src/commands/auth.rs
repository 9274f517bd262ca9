use anyhow::{Context, Result};
use colored::Colorize;
use rentai_application::{AppServices, IngestionOutcome};
use rentai_core::session::token::decode_claims;
use url::Url;

/// Runs the callback URL through the router as the browser would.
pub fn callback(services: &AppServices, raw_url: &str) -> Result<()> {
    let url = Url::parse(raw_url).with_context(|| format!("Invalid URL: {}", raw_url))?;
    let outcome = services.router.open(&url);
    match outcome.ingestion {
        Some(IngestionOutcome::Ingested { persisted: false }) => {
            anyhow::bail!("Signed in for this run only: the token could not be saved")
        }
        Some(IngestionOutcome::CallbackFailed) => anyhow::bail!("No token found in {}", raw_url),
        _ => Ok(()),
    }
}

pub fn logout(services: &AppServices) -> Result<()> {
    services.session.logout()?;
    println!("{}", "Signed out.".green());
    Ok(())
}

pub fn whoami(services: &AppServices) -> Result<()> {
    let session = services.session.get();
    let Some(token) = session.token() else {
        println!("{}", "Not signed in.".yellow());
        return Ok(());
    };

    match session.user() {
        Some(user) => {
            println!("Signed in as {}", user.display_name().bold());
            if let Some(email) = &user.email {
                println!("  email: {}", email);
            }
            println!("  id: {}", user.id);
        }
        None => println!("Signed in {}", "(no profile in token)".dimmed()),
    }
    if let Some(expires_at) = decode_claims(token).and_then(|claims| claims.expires_at()) {
        println!("  token expires: {}", expires_at.to_rfc3339());
    }
    Ok(())
}
