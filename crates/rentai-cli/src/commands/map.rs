use anyhow::Result;
use colored::Colorize;
use rentai_application::{AppServices, Coordinates, MapView};

pub async fn run(services: &AppServices, latitude: f64, longitude: f64) -> Result<()> {
    let coordinates = Coordinates {
        latitude,
        longitude,
    };
    match services.map_panel().render(coordinates).await {
        MapView::Rendered { provider, content } => {
            println!("{}", content.underline());
            println!("{}", format!("via {}", provider).dimmed());
        }
        MapView::Static { coordinates } => {
            println!("{}", "Map unavailable".yellow());
            println!("  {}", coordinates);
        }
        MapView::Unconfigured { message } => {
            println!("{}", message.yellow());
            println!("  {}", coordinates);
        }
    }
    Ok(())
}
