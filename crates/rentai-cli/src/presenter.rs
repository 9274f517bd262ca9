//! Terminal rendering of notifications, navigation and cards.

use colored::Colorize;
use rentai_core::navigation::Navigator;
use rentai_core::notification::{Notification, NotificationLevel, Notifier};
use rentai_core::presentation::{ListingCard, RecommendationCard};

pub struct CliNotifier;

impl Notifier for CliNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => eprintln!("{} {}", "✓".green(), notification.message.green()),
            NotificationLevel::Info => eprintln!("{} {}", "ℹ".cyan(), notification.message),
            NotificationLevel::Error => eprintln!("{} {}", "✗".red(), notification.message.red()),
        }
    }
}

/// Prints every move; a terminal has no address bar to update.
pub struct CliNavigator;

impl Navigator for CliNavigator {
    fn replace_url(&self, url: &str) {
        eprintln!("{} {}", "url:".dimmed(), url.dimmed());
    }

    fn navigate(&self, path: &str) {
        eprintln!("{} {}", "→".bright_blue(), path.bright_blue());
    }
}

pub fn print_recommendation(rank: usize, card: &RecommendationCard) {
    println!(
        "{} {} {}",
        format!("#{}", rank).bright_yellow(),
        card.title.bold(),
        format!("[{}]", card.property_id).dimmed()
    );
    println!("   {} · {} · {}", card.location, card.house_type, card.distance);
    println!("   {}", card.price.green());
    if let Some(cost) = &card.transport_cost {
        println!("   transport: {}", cost);
    }
    if let Some(affordability) = &card.affordability {
        println!("   affordability: {}", affordability);
    }
    println!("   {}", card.reason.italic());
    if !card.amenities.is_empty() {
        println!("   amenities: {}", card.amenities.join(", "));
    }
    if let Some(map_url) = &card.map_url {
        println!("   map: {}", map_url.underline());
    }
}

pub fn print_listing(card: &ListingCard) {
    println!("{} {}", card.title.bold(), format!("[{}]", card.id).dimmed());
    println!("   {} · {} · {}", card.location, card.house_type, card.distance);
    println!("   {}", card.price.green());
    if !card.amenities.is_empty() {
        println!("   amenities: {}", card.amenities.join(", "));
    }
    println!("   image: {}", card.image.dimmed());
}

pub fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}
