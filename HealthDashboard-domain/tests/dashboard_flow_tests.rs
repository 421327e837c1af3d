mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use serde_json::json;

use common::{initialize, DashboardFixtures, FakeApi};
use health_dashboard_data::models::MetricKind;
use health_dashboard_data::{ApiClient, ClientConfig, FileSessionStore, InMemorySessionStore, SessionStore};
use health_dashboard_domain::views::cards::build_summary_cards;
use health_dashboard_domain::views::time_of_day::{Lookback, TimeOfDayChart};
use health_dashboard_domain::views::trend::{BloodPressureChart, TimeRange};
use health_dashboard_domain::{
    AuthService, AuthServiceError, ChartState, Dashboard, JoinPolicy, LoginRequest, RegistrationRequest,
};

fn client(api: &FakeApi, store: Arc<dyn SessionStore>) -> ApiClient {
    let config = ClientConfig::default()
        .with_base_url(&api.base_url)
        .with_timeout(Duration::from_secs(5));
    ApiClient::new(&config, store).unwrap()
}

fn login_request() -> LoginRequest {
    LoginRequest {
        email: "a@b.com".to_string(),
        password: "x".to_string(),
    }
}

#[tokio::test]
async fn test_login_then_dashboard_sends_bearer_token() {
    initialize();
    let api = FakeApi::start().await;
    api.ok("/api/token/", json!({ "access": "tok123" }));
    api.serve_all_metrics();

    let store = Arc::new(InMemorySessionStore::new());
    let client = client(&api, store.clone());
    let auth = AuthService::new(client.clone());

    let session = auth.login(&login_request()).await.unwrap();
    assert_eq!(session.access_token, "tok123");
    assert!(auth.is_authenticated());
    assert_eq!(store.current_session().unwrap().access_token, "tok123");

    let token_request = &api.seen("/api/token/")[0];
    assert!(token_request.authorization.is_none());

    let dashboard = Dashboard::new(Arc::new(client));
    let state = dashboard.activate().await;

    assert!(!state.loading);
    assert!(state.failures.is_empty());
    assert_eq!(state.metrics.heart_rate.as_ref().unwrap().latest().unwrap().bpm, 72);

    for path in [
        "/api/blood-pressure/",
        "/api/heart-rate/",
        "/api/spo2/",
        "/api/daily-steps/",
        "/api/sleep-duration/",
    ] {
        let seen = api.seen(path);
        assert_eq!(seen.len(), 1, "{} fetched once", path);
        assert_eq!(seen[0].authorization.as_deref(), Some("Bearer tok123"));
    }

    let cards = build_summary_cards(&state.metrics, &Utc);
    assert!(cards.iter().all(|c| c.body.is_some()));
}

#[tokio::test]
async fn test_register_returns_created_profile() {
    initialize();
    let api = FakeApi::start().await;
    api.respond(
        "/api/register/",
        StatusCode::CREATED,
        json!({
            "user": { "id": 5, "first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com" },
            "message": "User created successfully"
        }),
    );

    let store = Arc::new(InMemorySessionStore::new());
    let auth = AuthService::new(client(&api, store.clone()));
    let request = RegistrationRequest {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        age: Some(36),
        gender: None,
        email: "ada@example.com".to_string(),
        password: "correct horse".to_string(),
    };

    let user = auth.register(&request).await.unwrap();
    assert_eq!(user.id, Some(5));
    assert_eq!(user.email, "ada@example.com");
    assert!(store.current_session().is_none());
}

#[tokio::test]
async fn test_rejected_login_stores_nothing() {
    initialize();
    let api = FakeApi::start().await;
    api.respond(
        "/api/token/",
        StatusCode::UNAUTHORIZED,
        json!({ "detail": "No active account found with the given credentials" }),
    );

    let store = Arc::new(InMemorySessionStore::new());
    let auth = AuthService::new(client(&api, store.clone()));

    let result = auth.login(&login_request()).await;
    match result {
        Err(AuthServiceError::Api(e)) => assert!(e.is_unauthorized()),
        other => panic!("expected unauthorized, got {:?}", other),
    }
    assert!(store.current_session().is_none());
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn test_token_without_access_is_rejected() {
    initialize();
    let api = FakeApi::start().await;
    api.ok("/api/token/", json!({ "access": "" }));

    let store = Arc::new(InMemorySessionStore::new());
    let auth = AuthService::new(client(&api, store.clone()));

    assert!(matches!(
        auth.login(&login_request()).await,
        Err(AuthServiceError::MissingToken)
    ));
    assert!(store.current_session().is_none());
}

#[tokio::test]
async fn test_logout_drops_authorization() {
    initialize();
    let api = FakeApi::start().await;
    api.ok("/api/token/", json!({ "access": "tok123" }));
    api.serve_all_metrics();

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSessionStore::new(dir.path().join("user.json")));
    let client = client(&api, store.clone());
    let auth = AuthService::new(client.clone());

    auth.login(&login_request()).await.unwrap();
    assert!(dir.path().join("user.json").exists());

    auth.logout().unwrap();
    assert!(!auth.is_authenticated());
    assert!(!dir.path().join("user.json").exists());

    // a second logout is harmless
    auth.logout().unwrap();

    Dashboard::new(Arc::new(client)).activate().await;
    assert!(api.seen("/api/heart-rate/")[0].authorization.is_none());
}

#[tokio::test]
async fn test_per_metric_dashboard_keeps_healthy_metrics() {
    initialize();
    let api = FakeApi::start().await;
    api.serve_all_metrics();
    api.respond("/api/spo2/", StatusCode::INTERNAL_SERVER_ERROR, json!({ "detail": "boom" }));

    let dashboard = Dashboard::with_policy(
        Arc::new(client(&api, Arc::new(InMemorySessionStore::new()))),
        JoinPolicy::PerMetric,
    );
    let state = dashboard.activate().await;

    assert!(!state.loading);
    assert_eq!(state.failures.len(), 1);
    assert_eq!(state.failures[0].metric, MetricKind::SpO2);
    assert!(state.metrics.spo2.is_none());
    assert!(state.metrics.blood_pressure.is_some());
    assert!(state.metrics.sleep_duration.is_some());

    let cards = build_summary_cards(&state.metrics, &Utc);
    assert!(cards[2].body.is_none());
    assert!(cards[0].body.is_some());
}

#[tokio::test]
async fn test_all_or_nothing_dashboard_blanks_on_failure() {
    initialize();
    let api = FakeApi::start().await;
    api.serve_all_metrics();
    api.respond("/api/daily-steps/", StatusCode::BAD_GATEWAY, json!({}));

    let dashboard = Dashboard::with_policy(
        Arc::new(client(&api, Arc::new(InMemorySessionStore::new()))),
        JoinPolicy::AllOrNothing,
    );
    let state = dashboard.activate().await;

    assert!(!state.loading);
    assert!(state.metrics.is_blank());
    assert_eq!(state.failures.len(), 1);
    assert_eq!(state.failures[0].metric, MetricKind::DailySteps);
}

#[tokio::test]
async fn test_trend_chart_requests_window() {
    initialize();
    let api = FakeApi::start().await;
    api.ok(
        "/api/blood-pressure/",
        json!({
            "count": 2,
            "results": [
                { "timestamp": "2024-03-14T08:00:00Z", "systolic": 118, "diastolic": 76 },
                { "timestamp": "2024-03-12T20:00:00Z", "systolic": 142, "diastolic": 91 }
            ]
        }),
    );

    let chart = BloodPressureChart::with_timezone(Arc::new(client(&api, Arc::new(InMemorySessionStore::new()))), Utc);
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
    let state = chart.load_at(TimeRange::Week, now).await;

    let view = state.ready().expect("trend ready");
    assert_eq!(view.points.len(), 2);

    let seen = &api.seen("/api/blood-pressure/")[0];
    assert_eq!(seen.query.get("timestamp_after").map(String::as_str), Some("2024-03-08T12:00:00.000Z"));
    assert_eq!(seen.query.get("timestamp_before").map(String::as_str), Some("2024-03-15T12:00:00.000Z"));
    assert_eq!(seen.query.get("ordering").map(String::as_str), Some("timestamp"));
}

#[tokio::test]
async fn test_trend_chart_empty_window() {
    initialize();
    let api = FakeApi::start().await;
    api.ok("/api/blood-pressure/", json!({ "count": 0, "results": [] }));

    let chart = BloodPressureChart::with_timezone(Arc::new(client(&api, Arc::new(InMemorySessionStore::new()))), Utc);
    let state = chart.load(TimeRange::Day).await;

    assert!(matches!(state, ChartState::Empty(_)));
}

#[tokio::test]
async fn test_time_of_day_chart_over_http() {
    initialize();
    let api = FakeApi::start().await;
    api.ok(
        "/api/blood-pressure/time_of_day_analysis/",
        json!({
            "morning_averages": { "avg_systolic": 131.2, "avg_diastolic": 85.0 },
            "evening_averages": { "avg_systolic": 123.0, "avg_diastolic": 79.4 },
            "pattern": {
                "type": "Morning Hypertension",
                "description": "Blood pressure is higher in the morning",
                "systolic_difference": 8.2
            }
        }),
    );

    let chart = TimeOfDayChart::new(Arc::new(client(&api, Arc::new(InMemorySessionStore::new()))));
    let state = chart.load(Lookback::Week).await;

    let view = state.ready().expect("time of day ready");
    assert_eq!(view.bars[0].systolic, 131);
    assert_eq!(view.pattern.as_ref().unwrap().systolic_difference, "+8 mmHg");

    let seen = &api.seen("/api/blood-pressure/time_of_day_analysis/")[0];
    assert_eq!(seen.query.get("days").map(String::as_str), Some("7"));
}

#[tokio::test]
async fn test_time_of_day_chart_surfaces_http_error() {
    initialize();
    let api = FakeApi::start().await;

    let chart = TimeOfDayChart::new(Arc::new(client(&api, Arc::new(InMemorySessionStore::new()))));
    let state = chart.load(Lookback::Month).await;

    match state {
        ChartState::Error(message) => assert!(message.contains("404")),
        other => panic!("expected error state, got {:?}", other),
    }
}
