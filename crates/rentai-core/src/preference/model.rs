//! Tenant preference wire model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Housing categories offered in the form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HouseType {
    Apartment,
    Condominium,
    Villa,
    Studio,
    Shared,
}

/// Amenity labels offered in the form, as shown to the user.
pub const AMENITY_LABELS: [&str; 8] = [
    "Parking",
    "Water Supply",
    "Security",
    "Internet",
    "Furnished",
    "Generator",
    "Garden",
    "Near Transport",
];

/// Separator replacing whitespace in normalized amenity labels.
pub const AMENITY_SEPARATOR: &str = "_";

/// Lowercases a label and joins its words with [`AMENITY_SEPARATOR`].
///
/// `"Water  Supply"` becomes `"water_supply"`.
pub fn normalize_amenity(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(AMENITY_SEPARATOR)
}

/// Body of `POST /recommendations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantPreference {
    pub job_school_location: String,
    pub salary: f64,
    pub house_type: String,
    pub family_size: u32,
    pub preferred_amenities: Vec<String>,
    pub language: String,
}
