//! Recommendation service models.

use serde::{Deserialize, Serialize};

use crate::wire::{deserialize_id, deserialize_opt_id, null_as_default, serialize_id};

/// One ranked recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecommendationResult {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub property_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub transport_cost: Option<f64>,
    #[serde(default)]
    pub affordability_score: Option<f64>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub house_type: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
}

/// A set of recommendations tied to the preference that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecommendationBatch {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub tenant_preference_id: Option<String>,
    #[serde(default, alias = "results", deserialize_with = "null_as_default")]
    pub recommendations: Vec<RecommendationResult>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response of `POST /recommendations`: either a bare list or a batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecommendationResponse {
    List(Vec<RecommendationResult>),
    Batch(RecommendationBatch),
}

impl RecommendationResponse {
    pub fn into_batch(self) -> RecommendationBatch {
        match self {
            RecommendationResponse::List(recommendations) => RecommendationBatch {
                recommendations,
                ..Default::default()
            },
            RecommendationResponse::Batch(batch) => batch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackChoice {
    Like,
    Dislike,
}

impl FeedbackChoice {
    pub fn liked(&self) -> bool {
        matches!(self, FeedbackChoice::Like)
    }
}

/// Body of `POST /recommendations/feedback`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRequest {
    #[serde(serialize_with = "serialize_id")]
    pub tenant_preference_id: String,
    #[serde(serialize_with = "serialize_id")]
    pub property_id: String,
    pub liked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl FeedbackRequest {
    pub fn new(
        tenant_preference_id: impl Into<String>,
        property_id: impl Into<String>,
        choice: FeedbackChoice,
    ) -> Self {
        Self {
            tenant_preference_id: tenant_preference_id.into(),
            property_id: property_id.into(),
            liked: choice.liked(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
