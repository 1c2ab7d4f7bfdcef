use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, response::Html, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::ServerConfig;
use crate::pipeline::WeatherService;
use crate::render::{escape_html, render_error, render_loading};

/// Shown by the page script when the API cannot be reached
const UNREACHABLE_MESSAGE: &str = "Unable to fetch weather data.";

/// Router for the page shell, the API and the static assets
pub fn app(service: Arc<WeatherService>, assets_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .nest("/api", api::router())
        .nest_service("/static", ServeDir::new(assets_dir))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run(config: &ServerConfig, service: Arc<WeatherService>) -> Result<()> {
    let app = app(service, &config.assets_dir);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// The page always starts in the loading state; its script runs the location flow
async fn index() -> Html<String> {
    Html(page())
}

/// Full page: search form, locate button, dashboard container
#[must_use]
pub fn page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Skycast</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <div class="container">
        <form class="search-box" id="searchForm" autocomplete="off">
            <input type="text" id="cityInput" name="city" placeholder="{placeholder}">
            <button type="submit" id="searchButton">Search</button>
            <button type="button" id="locateButton" title="Use my location">📍</button>
        </form>
        <div id="dashboard" class="dashboard">{loading}</div>
    </div>
    <template id="loadingTemplate">{loading}</template>
    <template id="errorTemplate">{unreachable}</template>
    <script src="/static/dashboard.js"></script>
</body>
</html>
"#,
        placeholder = escape_html("Enter city name..."),
        loading = render_loading(),
        unreachable = render_error(UNREACHABLE_MESSAGE),
    )
}
