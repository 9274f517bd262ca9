use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use rentai_application::{AppServices, FeedbackOutcome, FeedbackTracker};
use rentai_core::recommendation::FeedbackChoice;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Choice {
    Like,
    Dislike,
}

impl From<Choice> for FeedbackChoice {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::Like => FeedbackChoice::Like,
            Choice::Dislike => FeedbackChoice::Dislike,
        }
    }
}

#[derive(Args, Debug)]
pub struct FeedbackArgs {
    pub property_id: String,
    #[arg(value_enum)]
    pub choice: Choice,
    /// Recommendation set the property came from; defaults to your latest
    #[arg(long)]
    pub preference_id: Option<String>,
}

pub async fn run(services: &AppServices, args: FeedbackArgs) -> Result<()> {
    let preference_id = match args.preference_id {
        Some(id) => Some(id),
        None if services.session.get().is_authenticated() => services
            .dashboard()
            .latest()
            .await?
            .and_then(|batch| batch.tenant_preference_id),
        None => None,
    };

    let tracker = FeedbackTracker::new(services.clients.recommendation.clone(), preference_id);
    match tracker.record(&args.property_id, args.choice.into()).await? {
        FeedbackOutcome::Recorded { delivered: true } => {
            println!("{}", "Thanks for the feedback.".green());
        }
        FeedbackOutcome::Recorded { delivered: false } => {
            println!("{}", "Feedback noted, but it could not be sent.".yellow());
        }
        FeedbackOutcome::AlreadyRecorded(choice) => {
            println!("Already rated this property ({:?}).", choice);
        }
    }
    Ok(())
}
