//! Application layer for RentAI.
//!
//! Use cases that coordinate the session and language stores with the service
//! clients: token handoff, routing, the recommendation form, feedback,
//! property browsing, the dashboard and the map panel.

pub mod dashboard;
pub mod feedback;
pub mod listing_flow;
pub mod map_panel;
pub mod query_cache;
pub mod recommendation_flow;
pub mod router;
pub mod services;
pub mod token_ingestion;

pub use dashboard::Dashboard;
pub use feedback::{FeedbackHandler, FeedbackOutcome, FeedbackTracker};
pub use listing_flow::{DetailView, ListingFlow, ListingView};
pub use map_panel::{Coordinates, MapPanel, MapProvider, MapView};
pub use query_cache::QueryCache;
pub use recommendation_flow::{FlowEvent, FlowPhase, RecommendationFlow};
pub use router::{RouteOutcome, Router};
pub use services::AppServices;
pub use token_ingestion::{IngestionOutcome, TokenIngestion};
