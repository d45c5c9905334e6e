//! Web server module.

mod handlers;

use crate::config::ServerConfig;
use crate::service::QuakeService;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub service: Arc<QuakeService>,
}

/// Web server for the earthquake pages.
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a new server over a fully built dataset.
    pub fn new(config: ServerConfig, service: Arc<QuakeService>) -> Self {
        Self {
            state: AppState { config, service },
        }
    }

    /// Build the router with all routes.
    fn routes(&self) -> Router {
        Router::new()
            .route("/quakes/", get(handlers::handle_overview))
            .route("/quakes/{region}", get(handlers::handle_region))
            // Trailing-slash variants redirect to the canonical pages.
            .route("/quakes", get(handlers::redirect_trailing_slash))
            .route("/quakes/{region}/", get(handlers::redirect_trailing_slash))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the server on the configured port.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let router = self.routes();

        tracing::info!("Web server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quake::{decode_collection, TrailingSegment};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const FEED: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {"generated": 1677715200000, "url": "https://example.test/query?a=1&b=2", "title": "USGS Earthquakes", "status": 200, "count": 4},
        "features": [
            {"type": "Feature", "id": "ak1", "properties": {"mag": 3.0, "place": "5km N of Anchorage, Alaska", "time": 1677701000000, "alert": null}, "geometry": {"type": "Point", "coordinates": [-149.9, 61.2, 30.0]}},
            {"type": "Feature", "id": "pr1", "properties": {"mag": 2.0, "place": "10 km S of Ponce, Puerto Rico", "time": 1677702000000}, "geometry": {"type": "Point", "coordinates": [-66.6, 17.9, 12.0]}},
            {"type": "Feature", "id": "ak2", "properties": {"mag": 1.0, "place": "Kenai Peninsula, Alaska", "time": 1677703000000}, "geometry": {"type": "Point", "coordinates": [-151.0, 60.5, 40.0]}},
            {"type": "Feature", "id": "fj1", "properties": {"mag": 6.0, "place": "Fiji <region>", "time": 1677704000000, "alert": "yellow"}, "geometry": {"type": "Point", "coordinates": [178.0, -18.0, 550.0]}}
        ]
    }"#;

    fn router() -> Router {
        let collection = decode_collection(FEED.as_bytes()).unwrap();
        let service = QuakeService::new(collection, &TrailingSegment).unwrap();
        Server::new(ServerConfig::default(), Arc::new(service)).routes()
    }

    async fn get_page(uri: &str) -> (StatusCode, String) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_overview_page() {
        let (status, body) = get_page("/quakes/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>USGS Earthquakes</h1>"));
        assert!(body.contains("3.00"));
        assert!(body.contains(r#"<a href="/quakes/Alaska">Alaska</a> (2 events)"#));
        assert!(body.contains("/quakes/Puerto%20Rico"));
        assert!(body.contains("5km N of Anchorage, Alaska"));
        assert!(body.contains("Kenai Peninsula, Alaska"));
        assert!(body.contains("https://example.test/query?a=1&amp;b=2"));
        assert!(body.contains("[[61.2,-149.9],[17.9,-66.6],[60.5,-151.0],[-18.0,178.0]]"));
    }

    #[tokio::test]
    async fn test_overview_escapes_places() {
        let (_, body) = get_page("/quakes/").await;
        assert!(body.contains("Fiji &lt;region&gt;"));
        assert!(!body.contains("Fiji <region>"));
    }

    #[tokio::test]
    async fn test_region_page() {
        let (status, body) = get_page("/quakes/Alaska").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Earthquakes in Alaska</h1>"));
        assert!(body.contains("Events in Alaska (2)"));
        assert!(body.contains("5km N of Anchorage, Alaska"));
        assert!(body.contains("Kenai Peninsula, Alaska"));
        assert!(!body.contains("Ponce"));
        assert!(body.contains(r#"<tr class="selected">"#));
        // Statistics are those of the full dataset.
        assert!(body.contains("3.00"));
    }

    #[tokio::test]
    async fn test_region_page_percent_decoded() {
        let (status, body) = get_page("/quakes/Puerto%20Rico").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Events in Puerto Rico (1)"));
        assert!(body.contains("10 km S of Ponce, Puerto Rico"));
    }

    #[tokio::test]
    async fn test_region_page_unknown_region() {
        let (status, body) = get_page("/quakes/Atlantis").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Events in Atlantis (0)"));
        assert!(body.contains("No earthquakes recorded for this selection."));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _) = get_page("/elsewhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_trailing_slash_redirects() {
        for (uri, target) in [
            ("/quakes", "/quakes/"),
            ("/quakes/Alaska/", "/quakes/Alaska"),
            ("/quakes/Puerto%20Rico/", "/quakes/Puerto%20Rico"),
        ] {
            let response = router()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY, "{}", uri);
            assert_eq!(response.headers()["location"], target, "{}", uri);
        }
    }
}
