use anyhow::{Context, Result};
use rentai_application::AppServices;
use url::Url;

/// Resolves a URL the way the app would on page load.
pub fn run(services: &AppServices, raw_url: &str) -> Result<()> {
    let url = Url::parse(raw_url).with_context(|| format!("Invalid URL: {}", raw_url))?;
    let outcome = services.router.open(&url);
    println!("{:?}", outcome.route);
    if let Some(ingestion) = outcome.ingestion {
        tracing::debug!("[Open] Ingestion: {:?}", ingestion);
    }
    Ok(())
}
