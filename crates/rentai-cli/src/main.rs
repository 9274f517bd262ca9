use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod bootstrap;
mod commands;
mod presenter;

use commands::feedback::FeedbackArgs;
use commands::history::HistoryAction;
use commands::recommend::RecommendArgs;

#[derive(Parser)]
#[command(name = "rentai")]
#[command(about = "RentAI CLI - rental recommendations and property search", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ~/.config/rentai/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign-in state
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Show or change the interface language
    Lang {
        #[command(subcommand)]
        action: Option<LangAction>,
    },
    /// Submit preferences and list recommended homes
    Recommend(RecommendArgs),
    /// Past recommendation sets (requires sign-in)
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Like or dislike a recommended property
    Feedback(FeedbackArgs),
    /// Search properties with key=value filters
    Search { filters: Vec<String> },
    /// Show one property
    Property { id: String },
    /// Save a search under a name (requires sign-in)
    SaveSearch {
        name: String,
        filters: Vec<String>,
    },
    /// Check both services
    Health,
    /// Resolve an app URL (token handoff, dashboard gating)
    Open { url: String },
    /// Map preview for a location
    Map {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Complete sign-in from a callback URL carrying a token
    Callback { url: String },
    /// Forget the stored token
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Subcommand)]
enum LangAction {
    Get,
    Set { code: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap::init_logging();
    let cli = Cli::parse();
    let services = bootstrap::build_services(cli.config)?;

    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Callback { url } => commands::auth::callback(&services, &url)?,
            AuthAction::Logout => commands::auth::logout(&services)?,
            AuthAction::Whoami => commands::auth::whoami(&services)?,
        },
        Commands::Lang { action } => match action {
            None | Some(LangAction::Get) => commands::lang::show(&services)?,
            Some(LangAction::Set { code }) => commands::lang::set(&services, &code)?,
        },
        Commands::Recommend(args) => commands::recommend::run(&services, args).await?,
        Commands::History { action } => commands::history::run(&services, action).await?,
        Commands::Feedback(args) => commands::feedback::run(&services, args).await?,
        Commands::Search { filters } => commands::search::search(&services, &filters).await?,
        Commands::Property { id } => commands::search::property(&services, &id).await?,
        Commands::SaveSearch { name, filters } => {
            commands::search::save(&services, &name, &filters).await?
        }
        Commands::Health => commands::health::run(&services).await?,
        Commands::Open { url } => commands::open::run(&services, &url)?,
        Commands::Map {
            latitude,
            longitude,
        } => commands::map::run(&services, latitude, longitude).await?,
    }

    Ok(())
}
