mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{app, fill_form};
use rentai_application::{FeedbackHandler, FeedbackOutcome, FlowEvent, FlowPhase};
use rentai_core::preference::FormStep;
use rentai_core::recommendation::FeedbackChoice;
use rentai_core::{RentaiError, Result};
use serde_json::json;
use std::sync::Mutex;
use tokio::sync::mpsc;

fn drain(rx: &mut mpsc::UnboundedReceiver<FlowEvent>) -> Vec<FlowEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn phases(events: &[FlowEvent]) -> Vec<FlowPhase> {
    events
        .iter()
        .filter_map(|e| match e {
            FlowEvent::PhaseChanged(phase) => Some(*phase),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_empty_first_step_does_not_advance() {
    let app = app(false);
    let flow = app.services.recommendation_flow();

    let err = flow.next().unwrap_err();

    assert!(err.is_validation());
    assert_eq!(flow.form().step(), FormStep::Location);
    assert_eq!(app.transport.request_count(), 0);
    assert!(app.notifier.notifications().is_empty());
}

#[tokio::test]
async fn test_back_keeps_entered_data() {
    let app = app(false);
    let flow = app.services.recommendation_flow();
    fill_form(&flow);

    assert_eq!(flow.back(), FormStep::Household);
    assert_eq!(flow.back(), FormStep::Location);
    assert_eq!(flow.form().job_school_location(), "Addis Ababa University");
    assert_eq!(flow.form().family_size(), Some(3));
}

#[tokio::test]
async fn test_successful_submission() {
    let app = app(false);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let flow = app.services.recommendation_flow().with_events(tx);
    fill_form(&flow);
    drain(&mut rx);
    app.transport.push_json(
        200,
        json!({
            "tenant_preference_id": 41,
            "recommendations": [
                {"property_id": 1, "title": "Bole two-bedroom"},
                {"property_id": 2}
            ]
        }),
    );

    let batch = flow.submit().await.unwrap();

    assert_eq!(batch.recommendations.len(), 2);
    assert_eq!(app.transport.request_count(), 1);
    let body = app.transport.last_request().unwrap().body.unwrap();
    assert_eq!(body["salary"], 18000.0);
    assert_eq!(body["family_size"], 3);
    assert_eq!(body["house_type"], "apartment");
    assert_eq!(body["preferred_amenities"], json!(["parking_space"]));
    assert_eq!(body["language"], "english");

    assert_eq!(flow.phase(), FlowPhase::Results);
    assert_eq!(
        phases(&drain(&mut rx)),
        vec![FlowPhase::Loading, FlowPhase::Results]
    );
}

#[tokio::test]
async fn test_failed_submission_returns_to_form() {
    let app = app(false);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let flow = app.services.recommendation_flow().with_events(tx);
    fill_form(&flow);
    app.transport
        .push_json(200, json!([{"property_id": 5}]));
    flow.submit().await.unwrap();
    drain(&mut rx);

    app.transport
        .push_json(500, json!({"detail": "Recommendation engine unavailable"}));
    assert!(flow.submit().await.is_err());

    assert_eq!(flow.phase(), FlowPhase::Form);
    assert!(flow.results().is_none());
    assert_eq!(
        flow.error().as_deref(),
        Some("Recommendation engine unavailable")
    );
    let events = drain(&mut rx);
    assert_eq!(phases(&events), vec![FlowPhase::Loading, FlowPhase::Form]);
    assert!(events.contains(&FlowEvent::Failed(
        "Recommendation engine unavailable".to_string()
    )));
    assert_eq!(flow.form().step(), FormStep::Extras);
}

#[tokio::test]
async fn test_submit_before_last_step_sends_nothing() {
    let app = app(false);
    let flow = app.services.recommendation_flow();

    assert!(flow.submit().await.unwrap_err().is_validation());
    assert_eq!(app.transport.request_count(), 0);
    assert_eq!(flow.phase(), FlowPhase::Form);
}

#[tokio::test]
async fn test_only_one_submission_in_flight() {
    let app = app(false);
    let flow = Arc::new(app.services.recommendation_flow());
    fill_form(&flow);
    app.transport.hold();
    app.transport.push_json(200, json!([]));

    let first = {
        let flow = flow.clone();
        tokio::spawn(async move { flow.submit().await })
    };
    while app.transport.request_count() == 0 {
        tokio::task::yield_now().await;
    }

    assert_eq!(flow.phase(), FlowPhase::Loading);
    let second = flow.submit().await;
    assert!(second.unwrap_err().is_validation());

    app.transport.release();
    first.await.unwrap().unwrap();
    assert_eq!(app.transport.request_count(), 1);
    assert_eq!(flow.phase(), FlowPhase::Results);
}

#[tokio::test]
async fn test_feedback_is_sent_once_per_listing() {
    let app = app(false);
    let flow = app.services.recommendation_flow();
    fill_form(&flow);
    app.transport.push_json(
        200,
        json!({"tenant_preference_id": "41", "recommendations": [{"property_id": 9}]}),
    );
    flow.submit().await.unwrap();
    let tracker = flow.feedback_tracker();

    let first = tracker.record("9", FeedbackChoice::Like).await.unwrap();
    let second = tracker.record("9", FeedbackChoice::Dislike).await.unwrap();

    assert_eq!(first, FeedbackOutcome::Recorded { delivered: true });
    assert_eq!(second, FeedbackOutcome::AlreadyRecorded(FeedbackChoice::Like));
    assert_eq!(app.transport.request_count(), 2);
    let body = app.transport.last_request().unwrap().body.unwrap();
    assert_eq!(body, json!({"tenant_preference_id": 41, "property_id": 9, "liked": true}));
}

#[tokio::test]
async fn test_feedback_without_preference_id_is_missing_context() {
    let app = app(false);
    let flow = app.services.recommendation_flow();
    fill_form(&flow);
    app.transport.push_json(200, json!([{"property_id": 9}]));
    flow.submit().await.unwrap();
    let tracker = flow.feedback_tracker();

    let err = tracker.record("9", FeedbackChoice::Like).await.unwrap_err();

    assert!(matches!(err, RentaiError::MissingContext(_)));
    assert!(tracker.choice("9").is_none());
    assert_eq!(app.transport.request_count(), 1);
}

#[tokio::test]
async fn test_failed_feedback_keeps_choice() {
    let app = app(false);
    let flow = app.services.recommendation_flow();
    fill_form(&flow);
    app.transport.push_json(
        200,
        json!({"tenant_preference_id": 3, "recommendations": [{"property_id": 9}]}),
    );
    flow.submit().await.unwrap();
    app.transport.push_network_error("connection reset");
    let tracker = flow.feedback_tracker();

    let outcome = tracker.record("9", FeedbackChoice::Dislike).await.unwrap();

    assert_eq!(outcome, FeedbackOutcome::Recorded { delivered: false });
    assert_eq!(tracker.choice("9"), Some(FeedbackChoice::Dislike));
}

#[derive(Default)]
struct CapturingHandler {
    calls: Mutex<Vec<(String, FeedbackChoice)>>,
}

#[async_trait]
impl FeedbackHandler for CapturingHandler {
    async fn on_feedback(&self, property_id: &str, choice: FeedbackChoice) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((property_id.to_string(), choice));
        Ok(())
    }
}

#[tokio::test]
async fn test_handler_replaces_default_request() {
    let app = app(false);
    let handler = Arc::new(CapturingHandler::default());
    let tracker = app
        .services
        .recommendation_flow()
        .feedback_tracker()
        .with_handler(handler.clone());

    tracker.record("7", FeedbackChoice::Like).await.unwrap();
    tracker.record("7", FeedbackChoice::Like).await.unwrap();

    assert_eq!(
        *handler.calls.lock().unwrap(),
        vec![("7".to_string(), FeedbackChoice::Like)]
    );
    assert_eq!(app.transport.request_count(), 0);
}
