use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::Result;
use crate::location_resolver::{PositionError, ReportedPosition, validate_city};
use crate::models::Coordinate;
use crate::pipeline::{DashboardData, WeatherService};
use crate::render::View;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub city: String,
}

/// Failure codes reported by the browser geolocation API
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BrowserPositionError {
    Denied,
    Unavailable,
    Unsupported,
}

/// Body of `POST /api/locate`: either a fix or the reason there is none
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LocateRequest {
    Position { latitude: f64, longitude: f64 },
    Failure { error: BrowserPositionError },
}

impl From<LocateRequest> for ReportedPosition {
    fn from(request: LocateRequest) -> Self {
        let reading = match request {
            LocateRequest::Position {
                latitude,
                longitude,
            } => Ok(Coordinate::new(latitude, longitude)),
            LocateRequest::Failure { error } => Err(match error {
                BrowserPositionError::Denied => PositionError::PermissionDenied,
                BrowserPositionError::Unavailable => PositionError::Unavailable,
                BrowserPositionError::Unsupported => PositionError::Unsupported,
            }),
        };
        ReportedPosition(reading)
    }
}

/// API routes. Every request runs its own flow and answers with that flow's view;
/// nothing is kept between requests.
pub fn router() -> Router<Arc<WeatherService>> {
    Router::new()
        .route("/search", post(search))
        .route("/locate", post(locate))
}

fn view_response(result: Result<DashboardData>) -> Response {
    if let Err(e) = &result {
        warn!("Request failed: {} ({})", e, e.detail().unwrap_or("no detail"));
    }
    Html(View::from(result).render()).into_response()
}

async fn search(
    State(service): State<Arc<WeatherService>>,
    Form(form): Form<SearchForm>,
) -> Response {
    let city = match validate_city(&form.city) {
        Ok(city) => city,
        Err(e) => return (StatusCode::UNPROCESSABLE_ENTITY, e.user_message()).into_response(),
    };
    info!("Searching weather for '{}'", city);
    view_response(service.for_city(city).await)
}

async fn locate(
    State(service): State<Arc<WeatherService>>,
    Json(request): Json<LocateRequest>,
) -> Response {
    if let LocateRequest::Position {
        latitude,
        longitude,
    } = request
    {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return (StatusCode::BAD_REQUEST, "Coordinates out of range").into_response();
        }
    }

    let source = ReportedPosition::from(request);
    view_response(service.for_sensor(&source).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_request_position() {
        let request: LocateRequest =
            serde_json::from_str(r#"{"latitude": 48.2, "longitude": 16.37}"#).unwrap();
        assert_eq!(
            ReportedPosition::from(request),
            ReportedPosition(Ok(Coordinate::new(48.2, 16.37)))
        );
    }

    #[test]
    fn test_locate_request_failures() {
        let denied: LocateRequest = serde_json::from_str(r#"{"error": "denied"}"#).unwrap();
        assert_eq!(
            ReportedPosition::from(denied),
            ReportedPosition(Err(PositionError::PermissionDenied))
        );

        let unsupported: LocateRequest =
            serde_json::from_str(r#"{"error": "unsupported"}"#).unwrap();
        assert_eq!(
            ReportedPosition::from(unsupported),
            ReportedPosition(Err(PositionError::Unsupported))
        );

        assert!(serde_json::from_str::<LocateRequest>(r#"{"error": "sideways"}"#).is_err());
    }
}
