//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{Coordinate, DomainError};
use crate::geocode::{GeocodeError, SearchParams};
use crate::planner::{PlanError, Planner};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/hubs", get(list_hubs))
        .route("/places/search", get(search_places))
        .route("/places/reverse", get(reverse_place))
        .route("/itineraries/plan", post(plan_itineraries))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the hub registry.
async fn list_hubs(State(state): State<AppState>) -> Json<HubListResponse> {
    Json(HubListResponse::from_registry(state.locator.registry()))
}

/// Search places by name, optionally biased towards a point.
async fn search_places(
    State(state): State<AppState>,
    Query(req): Query<PlaceSearchRequest>,
) -> Result<Json<PlaceSearchResponse>, AppError> {
    let near = match (req.lat, req.lng) {
        (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)?),
        (None, None) => None,
        _ => {
            return Err(AppError::BadRequest {
                message: "lat and lng must be given together".to_string(),
            });
        }
    };

    let params = SearchParams::default()
        .with_near(near)
        .with_limit(req.limit.unwrap_or(8).clamp(1, 20));

    let places = state.geocoder.search(&req.q, &params).await?;

    Ok(Json(PlaceSearchResponse {
        places: places.iter().map(PlaceResult::from).collect(),
    }))
}

/// Name for a coordinate.
async fn reverse_place(
    State(state): State<AppState>,
    Query(req): Query<ReverseRequest>,
) -> Result<Json<ReverseResponse>, AppError> {
    let coordinate = Coordinate::new(req.lat, req.lng)?;
    let name = state.geocoder.reverse(coordinate).await?;
    Ok(Json(ReverseResponse { name }))
}

/// Plan itineraries between two places.
async fn plan_itineraries(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanItinerariesResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanItinerariesRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid plan request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    // Reject bad options before any geocoding or routing
    let options = req.plan_options()?;
    let depart_at = req.departure_time()?;

    let origin = resolve_place(&state, &req.origin, None).await?;
    let destination = resolve_place(&state, &req.destination, Some(origin)).await?;

    let planner = Planner::new(state.directions.as_ref(), &state.locator, &state.config);
    let result = planner
        .plan_itineraries(origin, destination, &options)
        .await?;

    Ok(Json(PlanItinerariesResponse::from_result(
        &result,
        state.locator.registry(),
        depart_at,
    )))
}

/// Turn a place input into a coordinate, geocoding names and taking the
/// best match.
async fn resolve_place(
    state: &AppState,
    input: &PlaceInput,
    near: Option<Coordinate>,
) -> Result<Coordinate, AppError> {
    match input {
        PlaceInput::Point { lat, lng } => Ok(Coordinate::new(*lat, *lng)?),
        PlaceInput::Query { query } => {
            let params = SearchParams::default().with_near(near);
            let places = state.geocoder.search(query, &params).await?;
            places
                .first()
                .map(|place| place.coordinate)
                .ok_or_else(|| AppError::BadRequest {
                    message: format!("No place found for {query:?}"),
                })
        }
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidPriority(_) | PlanError::InvalidOptions(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            PlanError::ProviderUnavailable { .. } => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        AppError::BadGateway {
            message: format!("geocoding failed: {e}"),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::{DirectionsBackend, StraightLineDirections};
    use crate::geocode::{GeocodeClient, GeocodeConfig};
    use crate::hubs::{HubLocator, HubRegistry, dhaka_hubs};
    use crate::planner::PlannerConfig;

    fn state_with(registry: HubRegistry) -> AppState {
        // Geocoder pointed at an unroutable address: tests never reach it
        let geocoder = GeocodeClient::new(
            GeocodeConfig::new().with_base_urls("http://127.0.0.1:9", "http://127.0.0.1:9"),
        )
        .unwrap();
        AppState::new(
            DirectionsBackend::Offline(StraightLineDirections::new()),
            HubLocator::new(registry),
            PlannerConfig::default(),
            geocoder,
        )
    }

    fn body(json: &str) -> Bytes {
        Bytes::from(json.to_string())
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn lists_hubs() {
        let Json(response) = list_hubs(State(state_with(dhaka_hubs()))).await;
        assert_eq!(response.hubs.len(), 6);
    }

    #[tokio::test]
    async fn plans_between_points() {
        let state = state_with(dhaka_hubs());
        let Json(response) = plan_itineraries(
            State(state),
            body(
                r#"{
                    "origin": {"lat": 23.7300, "lng": 90.4170},
                    "destination": {"lat": 23.8700, "lng": 90.3900},
                    "depart_at": "09:00"
                }"#,
            ),
        )
        .await
        .unwrap();

        assert_eq!(response.candidates_attempted, 36);
        assert_eq!(response.candidates_assembled, 36);
        assert!(!response.itineraries.is_empty());
        assert!(response.itineraries.len() <= 5);
        assert_eq!(response.itineraries[0].label, "Recommended");
        assert_eq!(response.itineraries[0].departure_time.as_deref(), Some("09:00"));
        assert!(response.itineraries[0].arrival_time.is_some());
    }

    #[tokio::test]
    async fn empty_registry_is_empty_success() {
        let state = state_with(HubRegistry::empty());
        let Json(response) = plan_itineraries(
            State(state),
            body(
                r#"{"origin": {"lat": 23.73, "lng": 90.41}, "destination": {"lat": 23.87, "lng": 90.39}}"#,
            ),
        )
        .await
        .unwrap();

        assert!(response.itineraries.is_empty());
        assert_eq!(response.candidates_attempted, 0);
    }

    #[tokio::test]
    async fn bad_requests_are_rejected() {
        let cases = [
            "not json",
            r#"{"origin": {"lat": 123.0, "lng": 90.41}, "destination": {"lat": 23.87, "lng": 90.39}}"#,
            r#"{"origin": {"lat": 23.73, "lng": 90.41}, "destination": {"lat": 23.87, "lng": 90.39}, "priority": "vibes"}"#,
            r#"{"origin": {"lat": 23.73, "lng": 90.41}, "destination": {"lat": 23.87, "lng": 90.39}, "top_k": 0}"#,
        ];

        for case in cases {
            let result = plan_itineraries(State(state_with(dhaka_hubs())), body(case)).await;
            assert!(
                matches!(result, Err(AppError::BadRequest { .. })),
                "expected bad request for {case}"
            );
        }
    }

    #[test]
    fn error_status_codes() {
        let bad = AppError::BadRequest {
            message: "nope".to_string(),
        };
        assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);

        let unavailable: AppError = PlanError::ProviderUnavailable {
            attempted: 4,
            last_error: "unauthorized".to_string(),
        }
        .into();
        assert_eq!(unavailable.into_response().status(), StatusCode::BAD_GATEWAY);

        let geocode: AppError = GeocodeError::RateLimited.into();
        assert_eq!(geocode.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn plan_errors_map_to_bad_request() {
        let err: AppError =
            PlanError::InvalidOptions("top_k must be at least 1".to_string()).into();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}
