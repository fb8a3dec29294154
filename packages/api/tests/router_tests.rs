//! End-to-end tests for the HTTP surface.
//!
//! Each test builds the router in-process against fixture files in a
//! temporary directory and drives it with `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use flight_delay_api::airports::AirportRepository;
use flight_delay_api::construct_router;
use flight_delay_api::model::{ClassProbabilities, DelayClassifier, Features, ModelError, ModelGateway};
use flight_delay_api::state::State;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const AIRPORTS_CSV: &str = "AirportID,AirportName\n3,Denver Intl\n1,Atlanta Intl\n2,Boston Logan\n";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().unwrap(),
        };
        fixture.write("airports.csv", AIRPORTS_CSV);
        fixture.write(
            "flight_delay_model.json",
            r#"{"coefficients": [0.04, 0.00002], "intercept": -1.5, "classes": [0, 1]}"#,
        );
        fixture
    }

    fn write(&self, name: &str, contents: &str) {
        std::fs::write(self.path(name), contents).unwrap();
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn router(&self) -> Router {
        let state = State::from_paths(
            self.path("flight_delay_model.json"),
            self.path("airports.csv"),
        );
        construct_router(Arc::new(state))
    }

    fn router_with_model(&self, model: ModelGateway) -> Router {
        let state = State::new(model, AirportRepository::new(self.path("airports.csv")));
        construct_router(Arc::new(state))
    }
}

struct FailingClassifier;

impl DelayClassifier for FailingClassifier {
    fn predict_proba(&self, _features: &Features) -> Result<ClassProbabilities, ModelError> {
        Err(ModelError::Scoring("feature matrix has wrong shape".to_string()))
    }
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn test_predict_success() {
    let fixture = Fixture::new();
    let app = fixture.router();

    let (status, body) = get(&app, "/predict?day_of_week=3&airport_id=10397").await;
    assert_eq!(status, StatusCode::OK);

    let delay = body["delay_probability"].as_f64().unwrap();
    let confidence = body["confidence"].as_f64().unwrap();
    let z: f64 = 0.04 * 3.0 + 0.00002 * 10397.0 - 1.5;
    let expected = 1.0 / (1.0 + (-z).exp());
    assert!((delay - expected).abs() < 1e-9);
    assert_eq!(confidence, delay.max(1.0 - delay));
}

#[tokio::test]
async fn test_predict_confidence_invariant_for_all_days() {
    let fixture = Fixture::new();
    let app = fixture.router();

    for day in 1..=7 {
        for airport in [10140, 10397, 12892, 13930, 14771] {
            let uri = format!("/predict?day_of_week={}&airport_id={}", day, airport);
            let (status, body) = get(&app, &uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);

            let delay = body["delay_probability"].as_f64().unwrap();
            let confidence = body["confidence"].as_f64().unwrap();
            assert!((0.0..=1.0).contains(&delay));
            assert!(confidence >= 0.5);
            assert_eq!(confidence, delay.max(1.0 - delay));
        }
    }
}

#[tokio::test]
async fn test_predict_rejects_day_out_of_range() {
    let fixture = Fixture::new();
    let app = fixture.router();

    for day in [-3, 0, 8, 100] {
        for airport in [0, 10397, -5] {
            let uri = format!("/predict?day_of_week={}&airport_id={}", day, airport);
            let (status, body) = get(&app, &uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(error_message(&body), "day_of_week must be between 1 and 7");
            assert_eq!(body["error"]["code"], "BAD_REQUEST");
        }
    }
}

#[tokio::test]
async fn test_predict_rejects_bad_day_before_checking_model() {
    let fixture = Fixture::new();
    let app = fixture.router_with_model(ModelGateway::unavailable("not loaded"));

    let (status, _) = get(&app, "/predict?day_of_week=9&airport_id=10397").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_predict_rejects_malformed_query() {
    let fixture = Fixture::new();
    let app = fixture.router();

    for uri in [
        "/predict",
        "/predict?day_of_week=3",
        "/predict?airport_id=10397",
        "/predict?day_of_week=monday&airport_id=10397",
        "/predict?day_of_week=3&airport_id=ATL",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn test_predict_scores_unknown_airport() {
    let fixture = Fixture::new();
    let app = fixture.router();

    let (status, body) = get(&app, "/predict?day_of_week=1&airport_id=424242").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["delay_probability"].is_f64());
}

#[tokio::test]
async fn test_predict_airport_id_beyond_i64_is_bad_request() {
    let fixture = Fixture::new();
    let app = fixture.router();

    let (status, body) = get(&app, "/predict?day_of_week=1&airport_id=99999999999999999999").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_model_missing_degrades_only_predict() {
    let fixture = Fixture::new();
    std::fs::remove_file(fixture.path("flight_delay_model.json")).unwrap();
    let app = fixture.router();

    for _ in 0..3 {
        let (status, body) = get(&app, "/predict?day_of_week=2&airport_id=10397").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_message(&body), "Model not available");
        assert!(body["error"]["id"].is_string());
    }

    let (status, _) = get(&app, "/airports").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["model_loaded"], false);
}

#[tokio::test]
async fn test_corrupt_model_degrades_predict() {
    let fixture = Fixture::new();
    fixture.write("flight_delay_model.json", "{\"coefficients\": [1.0]}");
    let app = fixture.router();

    let (status, body) = get(&app, "/predict?day_of_week=2&airport_id=10397").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(&body), "Model not available");
}

#[tokio::test]
async fn test_scoring_failure_reports_detail() {
    let fixture = Fixture::new();
    let app = fixture.router_with_model(ModelGateway::from_classifier(Arc::new(FailingClassifier)));

    let (status, body) = get(&app, "/predict?day_of_week=4&airport_id=10397").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        error_message(&body),
        "Prediction error: feature matrix has wrong shape"
    );
}

#[tokio::test]
async fn test_airports_sorted_by_name() {
    let fixture = Fixture::new();
    let app = fixture.router();

    let (status, body) = get(&app, "/airports").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": 1, "name": "Atlanta Intl"},
            {"id": 2, "name": "Boston Logan"},
            {"id": 3, "name": "Denver Intl"}
        ])
    );
}

#[tokio::test]
async fn test_airports_read_is_idempotent() {
    let fixture = Fixture::new();
    let app = fixture.router();

    let (_, first) = get(&app, "/airports").await;
    let (_, second) = get(&app, "/airports").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_airports_reread_on_every_request() {
    let fixture = Fixture::new();
    let app = fixture.router();

    let (_, before) = get(&app, "/airports").await;
    assert_eq!(before.as_array().unwrap().len(), 3);

    fixture.write("airports.csv", "AirportID,AirportName\n7,Chicago O'Hare\n");
    let (status, after) = get(&app, "/airports").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, json!([{"id": 7, "name": "Chicago O'Hare"}]));
}

#[tokio::test]
async fn test_airports_non_integer_id_fails_closed() {
    let fixture = Fixture::new();
    fixture.write(
        "airports.csv",
        "AirportID,AirportName\n1,Atlanta Intl\nXYZ,Broken Row\n3,Denver Intl\n",
    );
    let app = fixture.router();

    let (status, body) = get(&app, "/airports").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(&body), "Unable to load airports data");
}

#[tokio::test]
async fn test_airports_tolerates_trailing_comma() {
    let fixture = Fixture::new();
    fixture.write(
        "airports.csv",
        "AirportID,AirportName\n2,Boston Logan,\n1,Atlanta Intl\n",
    );
    let app = fixture.router();

    let (status, body) = get(&app, "/airports").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": 1, "name": "Atlanta Intl"},
            {"id": 2, "name": "Boston Logan"}
        ])
    );
}

#[tokio::test]
async fn test_error_body_carries_detail() {
    let fixture = Fixture::new();
    let app = fixture.router();

    let (status, body) = get(&app, "/predict?day_of_week=0&airport_id=10397").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "day_of_week must be between 1 and 7");
    assert_eq!(body["detail"], body["error"]["message"]);
}

#[tokio::test]
async fn test_airports_missing_or_empty_file() {
    let fixture = Fixture::new();
    fixture.write("airports.csv", "AirportID,AirportName\n");
    let app = fixture.router();

    let (status, body) = get(&app, "/airports").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(&body), "Unable to load airports data");

    std::fs::remove_file(fixture.path("airports.csv")).unwrap();
    let (status, body) = get(&app, "/airports").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(&body), "Unable to load airports data");
}

#[tokio::test]
async fn test_server_errors_carry_error_id_header() {
    let fixture = Fixture::new();
    std::fs::remove_file(fixture.path("airports.csv")).unwrap();
    let app = fixture.router();

    let response = app
        .oneshot(Request::builder().uri("/airports").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header = response.headers().get("x-error-id").unwrap().to_str().unwrap().to_string();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["id"], header.as_str());
}

#[tokio::test]
async fn test_root_info() {
    let fixture = Fixture::new();
    let app = fixture.router();

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Flight Delay Prediction API");
    assert!(body["endpoints"]["/predict"].is_string());
    assert!(body["endpoints"]["/airports"].is_string());
}

#[tokio::test]
async fn test_health_reports_loaded_model() {
    let fixture = Fixture::new();
    let app = fixture.router();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model_loaded"], true);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let fixture = Fixture::new();
    let app = fixture.router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/airports")
                .header("origin", "https://flights.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
