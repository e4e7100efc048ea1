//! CORS for the browser client.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::warn;

use hourbook_core::config::CorsConfig;

/// Builds the CORS layer. Entries that do not parse are logged and skipped.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_all::<HeaderValue>("origin", &config.allowed_origins))
    };

    let headers = if config.allowed_headers.iter().any(|h| h == "*") {
        AllowHeaders::any()
    } else {
        AllowHeaders::list(parse_all::<HeaderName>("header", &config.allowed_headers))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_headers(headers)
        .allow_methods(parse_all::<Method>("method", &config.allowed_methods))
        .max_age(Duration::from_secs(config.max_age_seconds))
}

fn parse_all<T: std::str::FromStr>(what: &str, values: &[String]) -> Vec<T> {
    values
        .iter()
        .filter_map(|v| match v.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                warn!(value = %v, "Ignoring unparseable CORS {what}");
                None
            }
        })
        .collect()
}
