//! Like/dislike capture for rendered recommendations.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rentai_core::recommendation::{FeedbackChoice, FeedbackRequest};
use rentai_core::{RentaiError, Result};
use rentai_interaction::RecommendationApi;

/// Replaces the default feedback request when a parent view wants to handle
/// feedback itself.
#[async_trait]
pub trait FeedbackHandler: Send + Sync {
    async fn on_feedback(&self, property_id: &str, choice: FeedbackChoice) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackOutcome {
    /// Choice recorded. `delivered` is false when the submission failed; the
    /// choice stays recorded either way.
    Recorded { delivered: bool },
    /// A choice was already made for this listing; nothing was sent.
    AlreadyRecorded(FeedbackChoice),
}

enum Delivery<'a> {
    Handler(&'a Arc<dyn FeedbackHandler>),
    Request(&'a str),
}

/// One choice per listing per render.
pub struct FeedbackTracker {
    api: RecommendationApi,
    tenant_preference_id: Option<String>,
    handler: Option<Arc<dyn FeedbackHandler>>,
    choices: Mutex<HashMap<String, FeedbackChoice>>,
}

impl FeedbackTracker {
    pub fn new(api: RecommendationApi, tenant_preference_id: Option<String>) -> Self {
        Self {
            api,
            tenant_preference_id,
            handler: None,
            choices: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_handler(mut self, handler: Arc<dyn FeedbackHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn choice(&self, property_id: &str) -> Option<FeedbackChoice> {
        self.choices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(property_id)
            .copied()
    }

    /// Records `choice` for `property_id` and delivers it.
    ///
    /// Without a handler the default request needs the result set's
    /// tenant-preference id; when it is unknown this fails with
    /// `MissingContext` and records nothing.
    pub async fn record(&self, property_id: &str, choice: FeedbackChoice) -> Result<FeedbackOutcome> {
        let target = match (&self.handler, &self.tenant_preference_id) {
            (Some(handler), _) => Delivery::Handler(handler),
            (None, Some(preference_id)) => Delivery::Request(preference_id),
            (None, None) => {
                return Err(RentaiError::missing_context(format!(
                    "no recommendation set to attach feedback for property {} to",
                    property_id
                )));
            }
        };

        {
            let mut choices = self
                .choices
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(existing) = choices.get(property_id) {
                return Ok(FeedbackOutcome::AlreadyRecorded(*existing));
            }
            choices.insert(property_id.to_string(), choice);
        }

        let delivery = match target {
            Delivery::Handler(handler) => handler.on_feedback(property_id, choice).await,
            Delivery::Request(preference_id) => {
                let request = FeedbackRequest::new(preference_id, property_id, choice);
                self.api.submit_feedback(&request).await.map(|_| ())
            }
        };

        let delivered = match delivery {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "[FeedbackTracker] Feedback for property {} not delivered: {}",
                    property_id,
                    e
                );
                false
            }
        };
        Ok(FeedbackOutcome::Recorded { delivered })
    }
}
