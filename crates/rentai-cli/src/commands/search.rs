use anyhow::Result;
use colored::Colorize;
use rentai_application::{AppServices, DetailView, ListingView};
use rentai_core::property::SearchQuery;

use crate::presenter::{print_json, print_listing};

const SEARCH_DISABLED: &str = "Property search is not configured (set RENTAI_SEARCH_API_URL).";

pub async fn search(services: &AppServices, filters: &[String]) -> Result<()> {
    let query = SearchQuery::from_pairs(filters)?;
    match services.listing_flow().browse(&query).await? {
        ListingView::Hidden => println!("{}", SEARCH_DISABLED.yellow()),
        ListingView::Empty => println!("{}", "No properties found.".yellow()),
        ListingView::Results(cards) => {
            for card in &cards {
                print_listing(card);
            }
            println!("{}", format!("{} properties", cards.len()).dimmed());
        }
    }
    Ok(())
}

pub async fn property(services: &AppServices, id: &str) -> Result<()> {
    match services.listing_flow().detail(Some(id)).await? {
        DetailView::Hidden => println!("{}", SEARCH_DISABLED.yellow()),
        DetailView::Idle => println!("{}", "No property selected.".yellow()),
        DetailView::NotFound => println!("{}", format!("Property {} not found.", id).yellow()),
        DetailView::Loaded(card) => print_listing(&card),
    }
    Ok(())
}

pub async fn save(services: &AppServices, name: &str, filters: &[String]) -> Result<()> {
    let query = SearchQuery::from_pairs(filters)?;
    let saved = services.dashboard().save_search(name, &query).await?;
    println!("{}", format!("Saved search '{}'.", name).green());
    if !saved.is_null() {
        print_json(&saved);
    }
    Ok(())
}
