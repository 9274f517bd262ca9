use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use rentai_application::{AppServices, FlowEvent, FlowPhase};
use rentai_core::language::Language;
use rentai_core::preference::HouseType;
use rentai_core::presentation::present_recommendation;
use tokio::sync::mpsc;

use crate::presenter::print_recommendation;

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Where you work or study
    #[arg(long)]
    pub location: String,
    /// Monthly salary in ETB
    #[arg(long)]
    pub salary: String,
    /// apartment, condominium, villa, studio or shared
    #[arg(long)]
    pub house_type: String,
    #[arg(long, default_value_t = 1)]
    pub family_size: u32,
    /// Repeat for several amenities
    #[arg(long = "amenity")]
    pub amenities: Vec<String>,
    /// Overrides the stored language for this request
    #[arg(long)]
    pub language: Option<String>,
}

pub async fn run(services: &AppServices, args: RecommendArgs) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let flow = services.recommendation_flow().with_events(tx);

    let progress = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                FlowEvent::StepChanged(step) => {
                    tracing::debug!("[Recommend] Step {}", step.number());
                }
                FlowEvent::PhaseChanged(FlowPhase::Loading) => {
                    eprintln!("{}", "Finding homes that match…".dimmed());
                }
                FlowEvent::Failed(message) => {
                    tracing::debug!("[Recommend] Failed: {}", message);
                }
                _ => {}
            }
        }
    });

    let house_type = HouseType::from_str(&args.house_type)
        .with_context(|| format!("Unknown house type '{}'", args.house_type))?;
    let language = args.language.as_deref().map(Language::parse).transpose()?;

    flow.edit(|form| {
        form.set_job_school_location(args.location.as_str());
        form.set_salary(args.salary.as_str());
    });
    flow.next()?;

    flow.edit(|form| {
        form.select_house_type(house_type);
        form.select_family_size(args.family_size)
    })?;
    flow.next()?;

    flow.edit(|form| {
        for amenity in &args.amenities {
            form.toggle_amenity(amenity);
        }
        if let Some(language) = language {
            form.set_language(language);
        }
    });

    let outcome = flow.submit().await;
    drop(flow);
    let _ = progress.await;
    let batch = outcome?;

    if batch.recommendations.is_empty() {
        println!("{}", "No recommendations matched these preferences.".yellow());
        return Ok(());
    }
    for (index, result) in batch.recommendations.iter().enumerate() {
        print_recommendation(index + 1, &present_recommendation(result));
    }
    if let Some(id) = &batch.tenant_preference_id {
        println!();
        println!(
            "{}",
            format!("Rate a result with: rentai feedback <property-id> like --preference-id {}", id)
                .dimmed()
        );
    }
    Ok(())
}
