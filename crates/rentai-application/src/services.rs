//! Composition root shared by the front ends.

use std::sync::Arc;

use rentai_core::config::AppConfig;
use rentai_core::language::LanguageStore;
use rentai_core::navigation::Navigator;
use rentai_core::notification::Notifier;
use rentai_core::session::SessionStore;
use rentai_core::storage::DurableStorage;
use rentai_infrastructure::{LanguageStoreImpl, SessionStoreImpl};
use rentai_interaction::{ApiClients, ClientContext, HttpTransport};

use crate::dashboard::Dashboard;
use crate::listing_flow::ListingFlow;
use crate::map_panel::{MapPanel, OpenStreetMapProvider, StaticMapLinkProvider};
use crate::recommendation_flow::RecommendationFlow;
use crate::router::Router;
use crate::token_ingestion::TokenIngestion;

pub struct AppServices {
    pub config: AppConfig,
    pub session: Arc<dyn SessionStore>,
    pub language: Arc<dyn LanguageStore>,
    pub clients: ApiClients,
    pub router: Router,
}

impl AppServices {
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn DurableStorage>,
        transport: Arc<dyn HttpTransport>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let session: Arc<dyn SessionStore> = Arc::new(SessionStoreImpl::new(storage.clone()));
        let language: Arc<dyn LanguageStore> = Arc::new(LanguageStoreImpl::new(storage));

        let clients = ApiClients::from_config(
            &config,
            ClientContext {
                transport,
                session: session.clone(),
                navigator: navigator.clone(),
                notifier: notifier.clone(),
            },
        );

        let ingestion = TokenIngestion::new(session.clone(), navigator.clone(), notifier);
        let router = Router::new(session.clone(), navigator, ingestion);

        tracing::info!(
            search_enabled = clients.search_enabled(),
            map_enabled = config.map_enabled(),
            "[AppServices] Initialized"
        );

        Self {
            config,
            session,
            language,
            clients,
            router,
        }
    }

    /// Fresh form seeded with the stored language.
    pub fn recommendation_flow(&self) -> RecommendationFlow {
        RecommendationFlow::new(self.clients.recommendation.clone(), self.language.get())
    }

    pub fn listing_flow(&self) -> ListingFlow {
        ListingFlow::new(self.clients.search.clone(), self.config.query_retries)
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(
            self.session.clone(),
            self.clients.recommendation.clone(),
            self.clients.search.clone(),
        )
    }

    pub fn map_panel(&self) -> MapPanel {
        let key = self.config.map_api_key.clone().unwrap_or_default();
        MapPanel::from_config(
            &self.config,
            Arc::new(StaticMapLinkProvider::new(key)),
            Some(Arc::new(OpenStreetMapProvider)),
        )
    }
}
