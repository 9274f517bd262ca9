//! Three-step tenant preference form.
//!
//! Step 1 collects location and salary, step 2 house type and family size,
//! step 3 amenities and language. Moving forward requires the current step's
//! required fields; moving back is always allowed and keeps every field.

use std::collections::BTreeSet;

use super::model::{HouseType, TenantPreference, normalize_amenity};
use crate::error::{RentaiError, Result};
use crate::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormStep {
    /// Location and salary.
    Location,
    /// House type and family size.
    Household,
    /// Amenities and language.
    Extras,
}

impl FormStep {
    /// 1-based step number.
    pub fn number(&self) -> u8 {
        match self {
            FormStep::Location => 1,
            FormStep::Household => 2,
            FormStep::Extras => 3,
        }
    }

    fn next(&self) -> Option<Self> {
        match self {
            FormStep::Location => Some(FormStep::Household),
            FormStep::Household => Some(FormStep::Extras),
            FormStep::Extras => None,
        }
    }

    fn previous(&self) -> Option<Self> {
        match self {
            FormStep::Location => None,
            FormStep::Household => Some(FormStep::Location),
            FormStep::Extras => Some(FormStep::Household),
        }
    }
}

/// Draft tenant preference. Values are kept as entered until submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceForm {
    step: FormStep,
    job_school_location: String,
    salary: String,
    house_type: Option<HouseType>,
    family_size: Option<u32>,
    preferred_amenities: BTreeSet<String>,
    language: Language,
}

impl Default for PreferenceForm {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl PreferenceForm {
    /// Empty draft starting at step 1.
    pub fn new(language: Language) -> Self {
        Self {
            step: FormStep::Location,
            job_school_location: String::new(),
            salary: String::new(),
            house_type: None,
            family_size: None,
            preferred_amenities: BTreeSet::new(),
            language,
        }
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn job_school_location(&self) -> &str {
        &self.job_school_location
    }

    pub fn salary(&self) -> &str {
        &self.salary
    }

    pub fn house_type(&self) -> Option<HouseType> {
        self.house_type
    }

    pub fn family_size(&self) -> Option<u32> {
        self.family_size
    }

    pub fn preferred_amenities(&self) -> &BTreeSet<String> {
        &self.preferred_amenities
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_job_school_location(&mut self, location: impl Into<String>) {
        self.job_school_location = location.into();
    }

    pub fn set_salary(&mut self, salary: impl Into<String>) {
        self.salary = salary.into();
    }

    pub fn select_house_type(&mut self, house_type: HouseType) {
        self.house_type = Some(house_type);
    }

    /// Family size must be at least 1.
    pub fn select_family_size(&mut self, family_size: u32) -> Result<()> {
        if family_size == 0 {
            return Err(RentaiError::validation("family size must be at least 1"));
        }
        self.family_size = Some(family_size);
        Ok(())
    }

    /// Adds the amenity if absent, removes it otherwise. Returns whether it is
    /// now selected.
    ///
    /// Labels are kept in normalized form, so "Water Supply" and
    /// "water supply" toggle the same entry. Blank labels are ignored.
    pub fn toggle_amenity(&mut self, label: &str) -> bool {
        let key = normalize_amenity(label);
        if key.is_empty() {
            return false;
        }
        if self.preferred_amenities.remove(&key) {
            false
        } else {
            self.preferred_amenities.insert(key);
            true
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Checks the required fields of the current step.
    pub fn validate_step(&self) -> Result<()> {
        match self.step {
            FormStep::Location => {
                if self.job_school_location.trim().is_empty() {
                    return Err(RentaiError::validation("job/school location is required"));
                }
                if self.salary.trim().is_empty() {
                    return Err(RentaiError::validation("salary is required"));
                }
                Ok(())
            }
            FormStep::Household => {
                if self.house_type.is_none() {
                    return Err(RentaiError::validation("house type is required"));
                }
                if self.family_size.is_none() {
                    return Err(RentaiError::validation("family size is required"));
                }
                Ok(())
            }
            FormStep::Extras => Ok(()),
        }
    }

    pub fn can_advance(&self) -> bool {
        self.step.next().is_some() && self.validate_step().is_ok()
    }

    /// Moves forward one step. On a validation failure the step is unchanged.
    pub fn next(&mut self) -> Result<FormStep> {
        self.validate_step()?;
        let next = self
            .step
            .next()
            .ok_or_else(|| RentaiError::validation("already at the last step"))?;
        self.step = next;
        Ok(next)
    }

    /// Moves back one step; stays put on step 1.
    pub fn back(&mut self) -> FormStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Produces the request body. Only valid on the last step.
    ///
    /// Amenity labels are normalized and numeric fields coerced here.
    pub fn to_preference(&self) -> Result<TenantPreference> {
        if self.step != FormStep::Extras {
            return Err(RentaiError::validation(format!(
                "form is at step {}, submission requires step 3",
                self.step.number()
            )));
        }

        let location = self.job_school_location.trim();
        if location.is_empty() {
            return Err(RentaiError::validation("job/school location is required"));
        }
        let salary = parse_salary(&self.salary)?;
        let house_type = self
            .house_type
            .ok_or_else(|| RentaiError::validation("house type is required"))?;
        let family_size = self
            .family_size
            .ok_or_else(|| RentaiError::validation("family size is required"))?;

        Ok(TenantPreference {
            job_school_location: location.to_string(),
            salary,
            house_type: house_type.to_string(),
            family_size,
            preferred_amenities: self.preferred_amenities.iter().cloned().collect(),
            language: self.language.preference_value().to_string(),
        })
    }
}

/// Accepts `"15000"`, `"15,000"` and `"15 000.50"`.
fn parse_salary(raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    let salary: f64 = cleaned
        .parse()
        .map_err(|_| RentaiError::validation(format!("salary '{}' is not a number", raw)))?;
    if !salary.is_finite() || salary < 0.0 {
        return Err(RentaiError::validation("salary must be a non-negative number"));
    }
    Ok(salary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_form() -> PreferenceForm {
        let mut form = PreferenceForm::new(Language::Amharic);
        form.set_job_school_location("Bole, Addis Ababa");
        form.set_salary("15,000");
        form.next().unwrap();
        form.select_house_type(HouseType::Apartment);
        form.select_family_size(3).unwrap();
        form.next().unwrap();
        form.toggle_amenity("Water Supply");
        form.toggle_amenity("Parking");
        form
    }

    #[test]
    fn test_empty_step_one_does_not_advance() {
        let mut form = PreferenceForm::default();
        assert!(form.next().is_err());
        assert_eq!(form.step(), FormStep::Location);
        assert!(!form.can_advance());
    }

    #[test]
    fn test_step_one_requires_both_fields() {
        let mut form = PreferenceForm::default();
        form.set_job_school_location("Piassa");
        assert!(form.next().is_err());
        form.set_salary("   ");
        assert!(form.next().is_err());
        assert_eq!(form.step(), FormStep::Location);

        form.set_salary("8000");
        assert_eq!(form.next().unwrap(), FormStep::Household);
    }

    #[test]
    fn test_step_two_requires_house_type_and_family_size() {
        let mut form = PreferenceForm::default();
        form.set_job_school_location("Piassa");
        form.set_salary("8000");
        form.next().unwrap();

        form.select_house_type(HouseType::Studio);
        assert!(form.next().is_err());
        assert_eq!(form.step(), FormStep::Household);

        form.select_family_size(1).unwrap();
        assert_eq!(form.next().unwrap(), FormStep::Extras);
    }

    #[test]
    fn test_zero_family_size_rejected() {
        let mut form = PreferenceForm::default();
        assert!(form.select_family_size(0).is_err());
        assert!(form.family_size().is_none());
    }

    #[test]
    fn test_back_keeps_data() {
        let mut form = completed_form();
        assert_eq!(form.back(), FormStep::Household);
        assert_eq!(form.back(), FormStep::Location);
        assert_eq!(form.back(), FormStep::Location);

        assert_eq!(form.job_school_location(), "Bole, Addis Ababa");
        assert_eq!(form.salary(), "15,000");
        assert_eq!(form.house_type(), Some(HouseType::Apartment));
        assert_eq!(form.family_size(), Some(3));
        assert_eq!(form.preferred_amenities().len(), 2);
    }

    #[test]
    fn test_to_preference_normalizes_and_coerces() {
        let preference = completed_form().to_preference().unwrap();
        assert_eq!(preference.job_school_location, "Bole, Addis Ababa");
        assert_eq!(preference.salary, 15000.0);
        assert_eq!(preference.house_type, "apartment");
        assert_eq!(preference.family_size, 3);
        assert_eq!(
            preference.preferred_amenities,
            vec!["parking".to_string(), "water_supply".to_string()]
        );
        assert_eq!(preference.language, "amharic");
    }

    #[test]
    fn test_to_preference_requires_last_step() {
        let mut form = completed_form();
        form.back();
        assert!(form.to_preference().unwrap_err().is_validation());
    }

    #[test]
    fn test_non_numeric_salary_fails_at_submission() {
        let mut form = completed_form();
        form.set_salary("a lot");
        assert!(form.to_preference().is_err());
    }

    #[test]
    fn test_toggle_amenity() {
        let mut form = PreferenceForm::default();
        assert!(form.toggle_amenity("Garden"));
        assert!(!form.toggle_amenity("Garden"));
        assert!(form.preferred_amenities().is_empty());
    }

    #[test]
    fn test_amenity_labels_differing_in_case_are_one_entry() {
        let mut form = PreferenceForm::default();
        assert!(form.toggle_amenity("Water Supply"));
        assert!(!form.toggle_amenity(" water  supply "));
        assert!(form.preferred_amenities().is_empty());

        form.toggle_amenity("Water Supply");
        form.toggle_amenity("Parking");
        assert!(!form.toggle_amenity("   "));
        assert!(!form.toggle_amenity(""));
        assert_eq!(
            form.preferred_amenities().iter().cloned().collect::<Vec<_>>(),
            vec!["parking".to_string(), "water_supply".to_string()]
        );
    }
}
