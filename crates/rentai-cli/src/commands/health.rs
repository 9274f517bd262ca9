use anyhow::Result;
use colored::Colorize;
use rentai_application::AppServices;
use rentai_core::RentaiError;
use serde_json::Value;

use crate::presenter::print_json;

pub async fn run(services: &AppServices) -> Result<()> {
    report("recommendation", services.clients.recommendation.health().await);
    match &services.clients.search {
        Some(search) => report("search", search.health().await),
        None => println!("{}  {}", "search".bold(), "not configured".dimmed()),
    }
    Ok(())
}

fn report(service: &str, result: Result<Value, RentaiError>) {
    match result {
        Ok(body) => {
            println!("{}  {}", service.bold(), "up".green());
            if !body.is_null() {
                print_json(&body);
            }
        }
        Err(e) => println!("{}  {} ({})", service.bold(), "down".red(), e),
    }
}
