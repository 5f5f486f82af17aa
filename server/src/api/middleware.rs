//! HTTP middleware (CORS, request tracing, 404 handler)

use axum::extract::Request;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::IntoResponse;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::config::is_all_interfaces;

/// Browser origins permitted to call the player API
#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    origins: Vec<String>,
}

impl AllowedOrigins {
    /// Origins served by the configured listener
    pub fn new(host: &str, port: u16) -> Self {
        let mut hosts: Vec<String> = match host {
            "localhost" | "127.0.0.1" => vec!["localhost".into(), "127.0.0.1".into()],
            h if is_all_interfaces(h) => vec!["localhost".into(), "127.0.0.1".into()],
            h => vec![h.to_string()],
        };

        if is_all_interfaces(host)
            && let Ok(interfaces) = local_ip_address::list_afinet_netifas()
        {
            hosts.extend(
                interfaces
                    .into_iter()
                    .filter(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())
                    .map(|(_, ip)| ip.to_string()),
            );
        }

        let origins = hosts
            .iter()
            .map(|h| format!("http://{}:{}", h, port))
            .collect();
        Self { origins }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o == origin)
    }

    fn header_values(&self) -> Vec<HeaderValue> {
        self.origins.iter().filter_map(|o| o.parse().ok()).collect()
    }
}

pub fn cors(allowed: &AllowedOrigins) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed.header_values()))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
}

/// Request tracing; debug mode records request headers on the span
pub fn trace(debug: bool) -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    let level = if debug { Level::INFO } else { Level::DEBUG };
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(level).include_headers(debug))
        .on_response(DefaultOnResponse::new().level(level))
}

/// Unknown routes; logged at debug level
pub async fn handle_404(req: Request) -> impl IntoResponse {
    tracing::debug!(method = %req.method(), uri = %req.uri(), "[404] no route");
    (
        StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({
            "error": "not_found",
            "code": "ROUTE_NOT_FOUND",
            "message": format!("No route for {} {}", req.method(), req.uri().path()),
        })),
    )
}
