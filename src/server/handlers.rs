use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::location::{Coordinate, NamedLocation};
use crate::sky::{QueryPhase, QueryState, SkyQueryController};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

/// Resolve a required `query` parameter; validation errors become 400.
fn resolve_param(state: &AppState, query: Option<&str>) -> Result<Coordinate, ApiError> {
    let query = query.ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Missing 'query' parameter"))?;
    state
        .resolver
        .resolve(query)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))
}

// ─── GET /api/cities ─────────────────────────────────────────────

pub(super) async fn city_list(State(state): State<Arc<AppState>>) -> Json<&'static [NamedLocation]> {
    Json(state.resolver.directory())
}

// ─── GET /api/suggest ────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct SuggestQuery {
    pub q: Option<String>,
}

pub(super) async fn suggest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestQuery>,
) -> Json<Vec<&'static str>> {
    Json(state.resolver.suggest(params.q.as_deref().unwrap_or("")))
}

// ─── GET /api/resolve ────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct LocationQuery {
    pub query: Option<String>,
}

pub(super) async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationQuery>,
) -> Result<Json<Coordinate>, ApiError> {
    resolve_param(&state, params.query.as_deref()).map(Json)
}

// ─── GET /api/sky ────────────────────────────────────────────────

pub(super) async fn sky(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationQuery>,
) -> Result<Json<QueryState>, ApiError> {
    let start = Instant::now();
    let at = resolve_param(&state, params.query.as_deref())?;

    let mut controller = SkyQueryController::with_shared(Arc::clone(&state.service));
    let result = controller.run(at).await;

    info!(
        query = params.query.as_deref().unwrap_or(""),
        phase = %result.phase,
        count = result.objects.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/sky"
    );

    match result.phase {
        QueryPhase::Success => Ok(Json(result)),
        _ => Err(api_error(
            StatusCode::BAD_GATEWAY,
            result.error_message.unwrap_or_else(|| "Sky query did not complete".into()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::super::build_router;
    use crate::location::Coordinate;
    use crate::sky::{ObjectKind, QueryFailure, SkyObject, SkyService};
    use serde_json::Value;
    use std::sync::Arc;

    struct Fixed(Result<Vec<SkyObject>, QueryFailure>);

    impl SkyService for Fixed {
        fn fetch(&self, _at: Coordinate) -> Result<Vec<SkyObject>, QueryFailure> {
            self.0.clone()
        }
    }

    fn vega() -> SkyObject {
        SkyObject {
            name: "Vega".into(),
            kind: ObjectKind::Star,
            constellation: "Lyra".into(),
            altitude_deg: 70.0,
            azimuth_deg: 300.0,
            magnitude: Some(0.03),
            phase_percent: None,
        }
    }

    async fn serve(service: Fixed) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = build_router(Arc::new(service));
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// GET `url`, returning status and JSON body for both success and error codes.
    async fn get_json(url: String) -> (u16, Value) {
        tokio::task::spawn_blocking(move || match ureq::get(&url).call() {
            Ok(resp) => (resp.status(), resp.into_json().unwrap()),
            Err(ureq::Error::Status(code, resp)) => (code, resp.into_json().unwrap()),
            Err(e) => panic!("transport error: {e}"),
        })
        .await
        .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_cities_and_suggest() {
        let base = serve(Fixed(Ok(vec![]))).await;

        let (code, body) = get_json(format!("{base}/api/cities")).await;
        assert_eq!(code, 200);
        assert_eq!(body.as_array().unwrap().len(), 8);
        assert_eq!(body[0]["name"], "London");

        let (code, body) = get_json(format!("{base}/api/suggest?q=PR")).await;
        assert_eq!(code, 200);
        assert_eq!(body, serde_json::json!(["Prague"]));

        let (_, body) = get_json(format!("{base}/api/suggest")).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_resolve_endpoint() {
        let base = serve(Fixed(Ok(vec![]))).await;

        let (code, body) = get_json(format!("{base}/api/resolve?query=New%20York")).await;
        assert_eq!(code, 200);
        assert_eq!(body["latitude"], 40.7128);

        let (code, body) = get_json(format!("{base}/api/resolve?query=91,0")).await;
        assert_eq!(code, 400);
        assert_eq!(body["error"], "Invalid coordinates range");

        let (code, _) = get_json(format!("{base}/api/resolve")).await;
        assert_eq!(code, 400);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_sky_endpoint_success() {
        let base = serve(Fixed(Ok(vec![vega()]))).await;
        let (code, body) = get_json(format!("{base}/api/sky?query=Rome")).await;
        assert_eq!(code, 200);
        assert_eq!(body["phase"], "success");
        assert_eq!(body["objects"][0]["name"], "Vega");
        assert_eq!(body["objects"][0]["type"], "star");
        assert_eq!(body["coordinate"]["latitude"], 41.9028);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_sky_endpoint_failures() {
        let base = serve(Fixed(Err(QueryFailure::Status(500)))).await;

        let (code, body) = get_json(format!("{base}/api/sky?query=10,10")).await;
        assert_eq!(code, 502);
        assert_eq!(body["error"], "Failed to fetch sky objects (HTTP 500)");

        let (code, body) = get_json(format!("{base}/api/sky?query=Atlantis")).await;
        assert_eq!(code, 400);
        assert_eq!(body["error"], "Please enter a valid city or coordinates");
    }
}
