//! Three-step preference form, single submission, ranked results.

use std::sync::{Mutex, MutexGuard};

use rentai_core::language::Language;
use rentai_core::preference::{FormStep, PreferenceForm};
use rentai_core::recommendation::RecommendationBatch;
use rentai_core::{RentaiError, Result};
use rentai_interaction::RecommendationApi;
use tokio::sync::mpsc;

use crate::feedback::FeedbackTracker;

const SUBMISSION_IN_PROGRESS: &str = "A recommendation request is already in progress";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    /// Filling in the form.
    Form,
    /// One submission outstanding.
    Loading,
    /// Results of the last successful submission are shown.
    Results,
}

/// Observable flow transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    StepChanged(FormStep),
    PhaseChanged(FlowPhase),
    ResultsReady {
        count: usize,
        tenant_preference_id: Option<String>,
    },
    Failed(String),
}

struct FlowState {
    form: PreferenceForm,
    phase: FlowPhase,
    results: Option<RecommendationBatch>,
    error: Option<String>,
}

pub struct RecommendationFlow {
    api: RecommendationApi,
    state: Mutex<FlowState>,
    events: Option<mpsc::UnboundedSender<FlowEvent>>,
}

impl RecommendationFlow {
    pub fn new(api: RecommendationApi, language: Language) -> Self {
        Self {
            api,
            state: Mutex::new(FlowState {
                form: PreferenceForm::new(language),
                phase: FlowPhase::Form,
                results: None,
                error: None,
            }),
            events: None,
        }
    }

    pub fn with_events(mut self, events: mpsc::UnboundedSender<FlowEvent>) -> Self {
        self.events = Some(events);
        self
    }

    fn state(&self) -> MutexGuard<'_, FlowState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, event: FlowEvent) {
        if let Some(events) = &self.events {
            // A dropped receiver just means nobody is watching.
            let _ = events.send(event);
        }
    }

    pub fn form(&self) -> PreferenceForm {
        self.state().form.clone()
    }

    /// Applies `edit` to the draft.
    pub fn edit<R>(&self, edit: impl FnOnce(&mut PreferenceForm) -> R) -> R {
        edit(&mut self.state().form)
    }

    pub fn phase(&self) -> FlowPhase {
        self.state().phase
    }

    pub fn results(&self) -> Option<RecommendationBatch> {
        self.state().results.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// Advances the form. A step with missing fields stays put and the
    /// validation error is returned; nothing is sent or notified.
    pub fn next(&self) -> Result<FormStep> {
        let step = self.state().form.next()?;
        self.emit(FlowEvent::StepChanged(step));
        Ok(step)
    }

    pub fn back(&self) -> FormStep {
        let step = self.state().form.back();
        self.emit(FlowEvent::StepChanged(step));
        step
    }

    /// Sends the completed form as exactly one request.
    ///
    /// Rejected while another submission is outstanding. Success replaces the
    /// results; failure clears them, keeps the message and returns to the form.
    pub async fn submit(&self) -> Result<RecommendationBatch> {
        let preference = {
            let mut state = self.state();
            if state.phase == FlowPhase::Loading {
                return Err(RentaiError::validation(SUBMISSION_IN_PROGRESS));
            }
            let preference = state.form.to_preference()?;
            state.phase = FlowPhase::Loading;
            state.error = None;
            preference
        };
        self.emit(FlowEvent::PhaseChanged(FlowPhase::Loading));
        tracing::info!(
            house_type = %preference.house_type,
            family_size = preference.family_size,
            "[RecommendationFlow] Submitting preferences"
        );

        match self.api.submit(&preference).await {
            Ok(batch) => {
                {
                    let mut state = self.state();
                    state.results = Some(batch.clone());
                    state.phase = FlowPhase::Results;
                }
                self.emit(FlowEvent::ResultsReady {
                    count: batch.recommendations.len(),
                    tenant_preference_id: batch.tenant_preference_id.clone(),
                });
                self.emit(FlowEvent::PhaseChanged(FlowPhase::Results));
                Ok(batch)
            }
            Err(e) => {
                let message = e.user_message();
                {
                    let mut state = self.state();
                    state.results = None;
                    state.error = Some(message.clone());
                    state.phase = FlowPhase::Form;
                }
                self.emit(FlowEvent::Failed(message));
                self.emit(FlowEvent::PhaseChanged(FlowPhase::Form));
                Err(e)
            }
        }
    }

    /// Feedback tracker bound to the current result set.
    pub fn feedback_tracker(&self) -> FeedbackTracker {
        let preference_id = self
            .state()
            .results
            .as_ref()
            .and_then(|batch| batch.tenant_preference_id.clone());
        FeedbackTracker::new(self.api.clone(), preference_id)
    }
}
