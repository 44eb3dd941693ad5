//! CORS middleware configuration.

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

fn permissive(methods: [Method; 5]) -> CorsLayer {
    CorsLayer::new()
        .allow_methods(methods)
        .allow_headers(Any)
        .allow_origin(Any)
}

/// Create a CORS layer from the configured origins.
///
/// An empty list, or one with no parseable origin, allows any origin.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    if parsed_origins.is_empty() {
        return permissive(methods);
    }

    CorsLayer::new()
        .allow_methods(methods)
        .allow_headers([CONTENT_TYPE, ACCEPT])
        .allow_origin(parsed_origins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn preflight(layer: CorsLayer, origin: &str) -> Option<String> {
        let app = Router::new().route("/items", get(|| async { "ok" })).layer(layer);
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/items")
            .header("origin", origin)
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_empty_origins_allow_any() {
        let allowed = preflight(create_cors_layer(&[]), "http://elsewhere.test").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_listed_origin_is_echoed() {
        let origins = vec!["http://localhost:5173".to_string()];
        let allowed = preflight(create_cors_layer(&origins), "http://localhost:5173").await;
        assert_eq!(allowed.as_deref(), Some("http://localhost:5173"));
    }

    #[tokio::test]
    async fn test_unlisted_origin_is_rejected() {
        let origins = vec!["http://localhost:5173".to_string()];
        let allowed = preflight(create_cors_layer(&origins), "http://evil.test").await;
        assert!(allowed.is_none());
    }

    #[tokio::test]
    async fn test_invalid_origins_fall_back_to_any() {
        let origins = vec!["bad\norigin".to_string()];
        let allowed = preflight(create_cors_layer(&origins), "http://elsewhere.test").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }
}
