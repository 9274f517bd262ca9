//! Map panel: primary provider, alternate provider, static card.
//!
//! Each provider runs in its own task under a fixed readiness timeout, so a
//! slow, failing or panicking provider only ever costs a fallback.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rentai_core::Result;
use rentai_core::config::AppConfig;
use tokio::time::timeout;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.5}°{} {:.5}°{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

/// Renders a map for a location.
#[async_trait]
pub trait MapProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the rendered map (a URL or embed markup). Readiness is the
    /// future completing.
    async fn render(&self, coordinates: Coordinates) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapView {
    Rendered { provider: String, content: String },
    /// Both providers failed; coordinates only.
    Static { coordinates: Coordinates },
    /// No map key configured.
    Unconfigured { message: String },
}

pub const UNCONFIGURED_MESSAGE: &str =
    "Map preview is unavailable because no map provider key is configured.";

pub struct MapPanel {
    primary: Option<Arc<dyn MapProvider>>,
    alternate: Option<Arc<dyn MapProvider>>,
    ready_timeout: Duration,
}

impl MapPanel {
    pub fn new(
        primary: Option<Arc<dyn MapProvider>>,
        alternate: Option<Arc<dyn MapProvider>>,
        ready_timeout: Duration,
    ) -> Self {
        Self {
            primary,
            alternate,
            ready_timeout,
        }
    }

    /// Panel for `config`. Without a map key the primary provider is left out
    /// and the panel explains why instead of rendering.
    pub fn from_config(
        config: &AppConfig,
        primary: Arc<dyn MapProvider>,
        alternate: Option<Arc<dyn MapProvider>>,
    ) -> Self {
        let primary = config.map_enabled().then_some(primary);
        Self::new(
            primary,
            alternate,
            Duration::from_secs(config.map_ready_timeout_secs),
        )
    }

    pub async fn render(&self, coordinates: Coordinates) -> MapView {
        let Some(primary) = &self.primary else {
            return MapView::Unconfigured {
                message: UNCONFIGURED_MESSAGE.to_string(),
            };
        };

        for provider in std::iter::once(primary).chain(self.alternate.as_ref()) {
            if let Some(content) = self.supervise(provider.clone(), coordinates).await {
                return MapView::Rendered {
                    provider: provider.name().to_string(),
                    content,
                };
            }
        }

        tracing::info!("[MapPanel] Falling back to static card for {}", coordinates);
        MapView::Static { coordinates }
    }

    async fn supervise(&self, provider: Arc<dyn MapProvider>, coordinates: Coordinates) -> Option<String> {
        let name = provider.name().to_string();
        let mut task = tokio::spawn(async move { provider.render(coordinates).await });

        match timeout(self.ready_timeout, &mut task).await {
            Ok(Ok(Ok(content))) => Some(content),
            Ok(Ok(Err(e))) => {
                tracing::warn!("[MapPanel] {} failed: {}", name, e);
                None
            }
            Ok(Err(join_error)) => {
                tracing::warn!("[MapPanel] {} crashed: {}", name, join_error);
                None
            }
            Err(_) => {
                task.abort();
                tracing::warn!(
                    "[MapPanel] {} not ready within {:?}",
                    name,
                    self.ready_timeout
                );
                None
            }
        }
    }
}

/// Static-map link provider keyed by the configured map key.
pub struct StaticMapLinkProvider {
    api_key: String,
}

impl StaticMapLinkProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl MapProvider for StaticMapLinkProvider {
    fn name(&self) -> &str {
        "google-static"
    }

    async fn render(&self, c: Coordinates) -> Result<String> {
        Ok(format!(
            "https://maps.googleapis.com/maps/api/staticmap?center={lat},{lon}&zoom=15&size=640x320&markers={lat},{lon}&key={key}",
            lat = c.latitude,
            lon = c.longitude,
            key = self.api_key
        ))
    }
}

/// Keyless OpenStreetMap link.
pub struct OpenStreetMapProvider;

#[async_trait]
impl MapProvider for OpenStreetMapProvider {
    fn name(&self) -> &str {
        "openstreetmap"
    }

    async fn render(&self, c: Coordinates) -> Result<String> {
        Ok(format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=16/{lat}/{lon}",
            lat = c.latitude,
            lon = c.longitude
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentai_core::RentaiError;

    const BOLE: Coordinates = Coordinates {
        latitude: 8.9806,
        longitude: 38.7578,
    };

    enum Behavior {
        Ready,
        Fail,
        Panic,
        Hang,
    }

    struct Scripted(&'static str, Behavior);

    #[async_trait]
    impl MapProvider for Scripted {
        fn name(&self) -> &str {
            self.0
        }

        async fn render(&self, _c: Coordinates) -> Result<String> {
            match self.1 {
                Behavior::Ready => Ok(format!("{}-map", self.0)),
                Behavior::Fail => Err(RentaiError::network("tile server down")),
                Behavior::Panic => panic!("widget exploded"),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(String::new())
                }
            }
        }
    }

    fn panel(primary: Behavior, alternate: Option<Behavior>) -> MapPanel {
        MapPanel::new(
            Some(Arc::new(Scripted("primary", primary))),
            alternate.map(|b| Arc::new(Scripted("alternate", b)) as Arc<dyn MapProvider>),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_primary_renders() {
        let view = panel(Behavior::Ready, Some(Behavior::Ready)).render(BOLE).await;
        assert_eq!(
            view,
            MapView::Rendered {
                provider: "primary".to_string(),
                content: "primary-map".to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_primary_hands_off_to_alternate() {
        let view = panel(Behavior::Hang, Some(Behavior::Ready)).render(BOLE).await;
        assert!(matches!(view, MapView::Rendered { provider, .. } if provider == "alternate"));
    }

    #[tokio::test]
    async fn test_panicking_provider_is_contained() {
        let view = panel(Behavior::Panic, Some(Behavior::Fail)).render(BOLE).await;
        assert_eq!(view, MapView::Static { coordinates: BOLE });
    }

    #[tokio::test]
    async fn test_no_alternate_gives_static_card() {
        let view = panel(Behavior::Fail, None).render(BOLE).await;
        assert_eq!(view, MapView::Static { coordinates: BOLE });
    }

    #[tokio::test]
    async fn test_missing_key_is_unconfigured() {
        let config = AppConfig::default();
        let view = MapPanel::from_config(
            &config,
            Arc::new(StaticMapLinkProvider::new("")),
            Some(Arc::new(OpenStreetMapProvider)),
        )
        .render(BOLE)
        .await;
        assert!(matches!(view, MapView::Unconfigured { .. }));
    }

    #[test]
    fn test_coordinates_display() {
        let c = Coordinates {
            latitude: -1.5,
            longitude: 38.75,
        };
        assert_eq!(c.to_string(), "1.50000°S 38.75000°E");
    }
}
