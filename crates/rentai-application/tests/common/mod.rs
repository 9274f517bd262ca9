#![allow(dead_code)]

use std::sync::Arc;

use rentai_application::AppServices;
use rentai_core::config::AppConfig;
use rentai_core::preference::HouseType;
use rentai_core::session::UserProfile;
use rentai_core::testing::{RecordingNavigator, RecordingNotifier};
use rentai_infrastructure::MemoryStorage;
use rentai_interaction::testing::FakeTransport;

pub const RECOMMENDATION_BASE: &str = "http://reco.test/api/v1";
pub const SEARCH_BASE: &str = "http://search.test/api/v1";

pub struct TestApp {
    pub services: AppServices,
    pub transport: Arc<FakeTransport>,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn app(search_enabled: bool) -> TestApp {
    let config = AppConfig {
        recommendation_api_url: RECOMMENDATION_BASE.to_string(),
        search_api_url: search_enabled.then(|| SEARCH_BASE.to_string()),
        ..Default::default()
    };
    let transport = FakeTransport::new();
    let storage = Arc::new(MemoryStorage::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let services = AppServices::new(
        config,
        storage.clone(),
        transport.clone(),
        navigator.clone(),
        notifier.clone(),
    );
    TestApp {
        services,
        transport,
        storage,
        navigator,
        notifier,
    }
}

pub fn sign_in(app: &TestApp) {
    app.services
        .session
        .login(
            UserProfile {
                id: "u-1".to_string(),
                email: Some("hana@example.com".to_string()),
                name: Some("Hana".to_string()),
            },
            "tok-1".to_string(),
        )
        .unwrap();
}

/// Fills all three steps, leaving the flow on step 3.
pub fn fill_form(flow: &rentai_application::RecommendationFlow) {
    flow.edit(|form| {
        form.set_job_school_location("Addis Ababa University");
        form.set_salary("18,000");
    });
    flow.next().unwrap();
    flow.edit(|form| {
        form.select_house_type(HouseType::Apartment);
        form.select_family_size(3).unwrap();
    });
    flow.next().unwrap();
    flow.edit(|form| {
        form.toggle_amenity("Parking Space");
    });
}
