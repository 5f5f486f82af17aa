//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{health, players};
use crate::data::types::{Player, Profession, Race};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Guildhall API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Player registry for an online role-playing game"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "players", description = "Player records")
    ),
    paths(
        health::health,
        players::list_players,
        players::count_players,
        players::create_player,
        players::get_player,
        players::update_player,
        players::delete_player,
    ),
    components(schemas(
        health::HealthResponse,
        Player,
        Race,
        Profession,
        players::types::PlayerRequest,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Guildhall API</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="docs"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        SwaggerUIBundle({ url: "/api/openapi.json", dom_id: "#docs" });
    </script>
</body>
</html>"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_player_routes() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/rest/players"));
        assert!(paths.contains_key("/rest/players/count"));
        assert!(paths.contains_key("/rest/players/{id}"));
        assert!(paths.contains_key("/api/v1/health"));

        let item = &paths["/rest/players/{id}"];
        assert!(item.get("get").is_some());
        assert!(item.get("post").is_some());
        assert!(item.get("delete").is_some());

        let schemas = doc["components"]["schemas"].as_object().unwrap();
        assert!(schemas.contains_key("Player"));
        assert!(schemas.contains_key("PlayerRequest"));
    }

    #[tokio::test]
    async fn test_swagger_ui_points_at_document() {
        let Html(page) = swagger_ui_html().await;
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.trim_end().ends_with("</html>"));
        assert!(page.contains(r#"url: "/api/openapi.json""#));
        assert!(page.contains(r##"dom_id: "#docs""##));
        assert!(page.contains(r#"<div id="docs"></div>"#));
    }
}
