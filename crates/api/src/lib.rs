//! Car Price Prediction API Server
//!
//! Thin HTTP layer over a pre-fitted price pipeline: validate the request,
//! rename fields to the training-time column names, predict, serialize.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod error;
mod routes;

pub use config::ApiConfig;
pub use error::{ApiError, ErrorBody};

use data_validator::Validator;
use inference_engine::PricePipeline;

/// Application state shared across handlers
///
/// The pipeline is loaded once at startup and read-only afterwards, so it
/// is shared without locking.
pub struct AppState {
    /// Loaded prediction pipeline
    pub pipeline: PricePipeline,
    /// Domain validator for incoming records
    pub validator: Validator,
    /// Version string
    pub version: String,
}

impl AppState {
    /// Create application state around a loaded pipeline
    pub fn new(pipeline: PricePipeline) -> Self {
        Self {
            pipeline,
            validator: Validator::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Welcome response for the root endpoint
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub available_versions: Vec<String>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Create the application router
///
/// The prediction route is defined once and mounted both unversioned and
/// under `/v1`.
pub fn create_router(state: Arc<AppState>) -> Router {
    let predict_routes = Router::new().route("/predict", post(routes::predict::predict_price));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(predict_routes.clone())
        .nest("/v1", predict_routes)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Root endpoint handler
async fn root_handler() -> Json<WelcomeResponse> {
    info!("root endpoint accessed");
    Json(WelcomeResponse {
        message: "Welcome to Car Price Prediction API!".to_string(),
        available_versions: vec![
            "/predict (default)".to_string(),
            "/v1/predict".to_string(),
        ],
    })
}

/// Health check handler
///
/// Deliberately static: artifact load failure is fatal before the listener
/// binds, so a serving process always has a loaded pipeline.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "API is running".to_string(),
    })
}

/// Map a panic escaping any handler to a 500 with the shared error shape
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unhandled panic".to_string()
    };

    tracing::error!(%detail, "unexpected error escaped a handler");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            detail: format!("Unexpected error: {}", detail),
        }),
    )
        .into_response()
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server until shutdown
pub async fn run_server(addr: &str, pipeline: PricePipeline) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(pipeline));
    let app = create_router(state);

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::predict::PredictResponse;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use inference_engine::{Coefficient, PipelineArtifact};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(Arc::new(AppState::new(PricePipeline::demo())))
    }

    fn corolla() -> Value {
        json!({
            "Make": "Toyota",
            "Model": "Corolla",
            "Year": 2018,
            "Engine_Size": 1.8,
            "Mileage": 45000.0,
            "Fuel_Type": "Petrol",
            "Transmission": "Automatic"
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_returns_welcome() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Welcome to Car Price Prediction API!");
    }

    #[tokio::test]
    async fn test_health_is_static_ok() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body, json!({"status": "ok", "message": "API is running"}));
    }

    #[tokio::test]
    async fn test_predict_happy_path() {
        let response = app().oneshot(post_json("/predict", corolla())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let price = body["predicted_price"].as_f64().unwrap();
        assert!((price - 24_841.5).abs() < 1e-6);
        // Rounded to 2 decimal places
        assert!((price * 100.0).fract().abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_versioned_predict_matches_default() {
        let default = app().oneshot(post_json("/predict", corolla())).await.unwrap();
        let versioned = app()
            .oneshot(post_json("/v1/predict", corolla()))
            .await
            .unwrap();

        assert_eq!(default.status(), StatusCode::OK);
        assert_eq!(versioned.status(), StatusCode::OK);
        assert_eq!(body_json(default).await, body_json(versioned).await);
    }

    #[tokio::test]
    async fn test_year_out_of_range_rejected() {
        let mut body = corolla();
        body["Year"] = json!(1979);

        let response = app().oneshot(post_json("/predict", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("Year"));
    }

    #[tokio::test]
    async fn test_bad_fuel_type_lists_allowed_set() {
        let mut body = corolla();
        body["Fuel_Type"] = json!("Gasoline");

        let response = app().oneshot(post_json("/predict", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let detail = body_json(response).await["detail"]
            .as_str()
            .unwrap()
            .to_string();
        for allowed in ["Petrol", "Diesel", "Hybrid", "Electric"] {
            assert!(detail.contains(allowed));
        }
    }

    #[tokio::test]
    async fn test_bad_transmission_lists_allowed_set() {
        let mut body = corolla();
        body["Transmission"] = json!("CVT");

        let response = app().oneshot(post_json("/predict", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let detail = body_json(response).await["detail"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(detail.contains("Manual"));
        assert!(detail.contains("Automatic"));
    }

    #[tokio::test]
    async fn test_multiple_violations_reported_together() {
        let mut body = corolla();
        body["Year"] = json!(1900);
        body["Engine_Size"] = json!(20.0);
        body["Fuel_Type"] = json!("Coal");

        let response = app().oneshot(post_json("/predict", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let detail = body_json(response).await["detail"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(detail.contains("Year"));
        assert!(detail.contains("Engine_Size"));
        assert!(detail.contains("Fuel_Type"));
    }

    #[tokio::test]
    async fn test_missing_field_rejected() {
        let body = json!({"Make": "Toyota", "Model": "Corolla"});
        let response = app().oneshot(post_json("/predict", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["detail"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_artifact_unknown_feature_maps_to_500() {
        let mut artifact = PipelineArtifact::demo();
        artifact.coefficients.push(Coefficient {
            feature: "Fuel_Pressure".to_string(),
            weight: 1.0,
        });
        let state = Arc::new(AppState::new(PricePipeline::from_artifact(artifact)));

        let response = create_router(state)
            .oneshot(post_json("/predict", corolla()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("Prediction failed"));
    }

    #[tokio::test]
    async fn test_non_finite_prediction_maps_to_500() {
        let mut artifact = PipelineArtifact::demo();
        artifact.intercept = f64::INFINITY;
        let state = Arc::new(AppState::new(PricePipeline::from_artifact(artifact)));

        let response = create_router(state)
            .oneshot(post_json("/predict", corolla()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("finite"));
    }

    #[tokio::test]
    async fn test_schema_mismatch_maps_to_400() {
        let error = ApiError::Inference(inference_engine::InferenceError::SchemaMismatch {
            expected: vec!["Engine Size".to_string()],
            actual: vec!["Engine_Size".to_string()],
        });
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("Engine_Size"));
    }

    #[tokio::test]
    async fn test_panic_in_handler_returns_500() {
        async fn boom() -> Json<PredictResponse> {
            panic!("artifact state corrupted")
        }

        let app: Router = Router::new()
            .route("/predict", post(boom))
            .layer(CatchPanicLayer::custom(handle_panic));

        let response = app.oneshot(post_json("/predict", corolla())).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.contains("Unexpected error"));
        assert!(detail.contains("artifact state corrupted"));
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
