//! Tenant preference domain module.

mod form;
mod model;

pub use form::{FormStep, PreferenceForm};
pub use model::{
    AMENITY_LABELS, AMENITY_SEPARATOR, HouseType, TenantPreference, normalize_amenity,
};
