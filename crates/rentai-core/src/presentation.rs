//! Display mapping for listings and recommendations.
//!
//! All fallbacks for absent fields live in [`DEFAULTS`] so the policy can be
//! audited in one place.
//!
//! | Field        | Default                      |
//! |--------------|------------------------------|
//! | `title`      | `Untitled property`          |
//! | `location`   | `Addis Ababa`                |
//! | `price`      | `Price on request`           |
//! | `house_type` | `Not specified`              |
//! | `distance`   | `Distance unknown`           |
//! | `image`      | `/placeholder-property.jpg`  |
//! | `reason`     | `Matches your preferences`   |

use serde::Serialize;

use crate::property::PropertyListing;
use crate::recommendation::RecommendationResult;

/// Field → default table.
#[derive(Debug, Clone, Copy)]
pub struct FieldDefaults {
    pub title: &'static str,
    pub location: &'static str,
    pub price: &'static str,
    pub house_type: &'static str,
    pub distance: &'static str,
    pub image: &'static str,
    pub reason: &'static str,
}

pub const DEFAULTS: FieldDefaults = FieldDefaults {
    title: "Untitled property",
    location: "Addis Ababa",
    price: "Price on request",
    house_type: "Not specified",
    distance: "Distance unknown",
    image: "/placeholder-property.jpg",
    reason: "Matches your preferences",
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingCard {
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: String,
    pub image: String,
    pub amenities: Vec<String>,
    pub house_type: String,
    pub distance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationCard {
    pub property_id: String,
    pub title: String,
    pub location: String,
    pub price: String,
    pub transport_cost: Option<String>,
    pub affordability: Option<String>,
    pub reason: String,
    pub map_url: Option<String>,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub house_type: String,
    pub distance: String,
}

/// `ETB 12,500`; whole birr only.
pub fn format_price(amount: f64) -> String {
    let rounded = amount.round().max(0.0) as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("ETB {}", grouped)
}

/// `3.2 km`
pub fn format_distance(km: f64) -> String {
    format!("{:.1} km", km)
}

/// Scores arrive either as a 0–1 fraction or already as a percentage.
pub fn format_affordability(score: f64) -> String {
    let percent = if score <= 1.0 { score * 100.0 } else { score };
    format!("{:.0}%", percent.clamp(0.0, 100.0))
}

fn text_or(value: Option<&String>, default: &str) -> String {
    match value.map(|s| s.trim()) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

fn humanize_amenity(raw: &str) -> String {
    raw.split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn present_listing(listing: &PropertyListing) -> ListingCard {
    ListingCard {
        id: listing.id.clone(),
        title: text_or(listing.title.as_ref(), DEFAULTS.title),
        location: text_or(listing.location.as_ref(), DEFAULTS.location),
        price: listing
            .price
            .map(format_price)
            .unwrap_or_else(|| DEFAULTS.price.to_string()),
        image: text_or(listing.image_url.as_ref(), DEFAULTS.image),
        amenities: listing.amenities.iter().map(|a| humanize_amenity(a)).collect(),
        house_type: text_or(listing.house_type.as_ref(), DEFAULTS.house_type),
        distance: listing
            .distance
            .map(format_distance)
            .unwrap_or_else(|| DEFAULTS.distance.to_string()),
    }
}

pub fn present_recommendation(result: &RecommendationResult) -> RecommendationCard {
    let mut images = result.images.clone();
    if images.is_empty() {
        images.push(DEFAULTS.image.to_string());
    }
    RecommendationCard {
        property_id: result.property_id.clone(),
        title: text_or(result.title.as_ref(), DEFAULTS.title),
        location: text_or(result.location.as_ref(), DEFAULTS.location),
        price: result
            .price
            .map(format_price)
            .unwrap_or_else(|| DEFAULTS.price.to_string()),
        transport_cost: result.transport_cost.map(format_price),
        affordability: result.affordability_score.map(format_affordability),
        reason: text_or(result.reason.as_ref(), DEFAULTS.reason),
        map_url: result.map_url.clone().filter(|url| !url.trim().is_empty()),
        images,
        amenities: result.amenities.iter().map(|a| humanize_amenity(a)).collect(),
        house_type: text_or(result.house_type.as_ref(), DEFAULTS.house_type),
        distance: result
            .distance
            .map(format_distance)
            .unwrap_or_else(|| DEFAULTS.distance.to_string()),
    }
}
