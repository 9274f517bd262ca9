use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use rentai_application::AppServices;
use rentai_core::presentation::present_recommendation;
use rentai_core::recommendation::RecommendationBatch;

use crate::presenter::print_recommendation;

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// Every recommendation set you have received
    Mine,
    /// The most recent set
    Latest,
    /// One set by tenant-preference id
    Get { id: String },
}

pub async fn run(services: &AppServices, action: HistoryAction) -> Result<()> {
    let dashboard = services.dashboard();
    match action {
        HistoryAction::Mine => {
            let batches = dashboard.history().await?;
            if batches.is_empty() {
                println!("{}", "No recommendations yet.".yellow());
            }
            for batch in &batches {
                print_summary(batch);
            }
        }
        HistoryAction::Latest => match dashboard.latest().await? {
            Some(batch) => print_batch(&batch),
            None => println!("{}", "No recommendations yet.".yellow()),
        },
        HistoryAction::Get { id } => print_batch(&dashboard.batch(&id).await?),
    }
    Ok(())
}

fn print_summary(batch: &RecommendationBatch) {
    println!(
        "{}  {} results  {}",
        batch
            .tenant_preference_id
            .as_deref()
            .unwrap_or("-")
            .bright_yellow(),
        batch.recommendations.len(),
        batch.created_at.as_deref().unwrap_or("").dimmed()
    );
}

fn print_batch(batch: &RecommendationBatch) {
    print_summary(batch);
    for (index, result) in batch.recommendations.iter().enumerate() {
        print_recommendation(index + 1, &present_recommendation(result));
    }
}
