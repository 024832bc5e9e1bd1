//! Router-level integration tests.
//!
//! Each test boots the full axum router over an in-memory database and
//! drives it with `tower::ServiceExt::oneshot`, covering the auth
//! boundary, establishment scoping and the HR flows end to end.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use hms_server::auth::JwtConfig;
use hms_server::core::{Config, ServerState};
use hms_server::db::DbService;
use shared::models::Role;

const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

async fn test_state() -> ServerState {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::raw_sql(include_str!("../migrations/0001_init.sql"))
        .execute(&pool)
        .await
        .unwrap();

    let config = Config {
        work_dir: ".".to_string(),
        http_port: 0,
        timezone: chrono_tz::Europe::Madrid,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiration_minutes: 60,
            issuer: "hms-server".to_string(),
            audience: "hms-clients".to_string(),
        },
        environment: "test".to_string(),
    };
    ServerState::new(config, DbService { pool })
}

fn token(state: &ServerState, user_id: i64, role: Role, establishment_id: Option<i64>) -> String {
    state
        .jwt_service
        .generate_token(user_id, "tester", role, establishment_id)
        .unwrap()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn seed_establishment(app: &Router, admin: &str, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/establishments",
        Some(admin),
        Some(json!({
            "name": name,
            "city": "Valencia",
            "address": "Calle Mayor 1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "seed establishment failed: {body}");
    body["id"].as_i64().unwrap()
}

async fn seed_employee(app: &Router, admin: &str, establishment_id: i64, email: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/employees",
        Some(admin),
        Some(json!({
            "first_name": "Ana",
            "last_name": "García",
            "email": email,
            "position": "Receptionist",
            "department": "Front Desk",
            "establishment_id": establishment_id,
            "hire_date": "2024-02-01",
            "contract_type": "PERMANENT",
            "base_salary": 1900.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "seed employee failed: {body}");
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let state = test_state().await;
    let app = hms_server::api::router(state);

    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn missing_and_malformed_tokens_rejected() {
    let state = test_state().await;
    let app = hms_server::api::router(state);

    let (status, body) = send(&app, "GET", "/api/establishments", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001); // NotAuthenticated

    let (status, body) = send(
        &app,
        "GET",
        "/api/establishments",
        Some("garbage.token.here"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004); // TokenInvalid
}

#[tokio::test]
async fn expired_token_rejected() {
    let state = test_state().await;

    // Issue from a service whose tokens are already expired (beyond the
    // validator's leeway), signed with the same secret
    let expired_issuer = hms_server::auth::JwtService::with_config(JwtConfig {
        secret: TEST_SECRET.to_string(),
        expiration_minutes: -10,
        issuer: "hms-server".to_string(),
        audience: "hms-clients".to_string(),
    });
    let token = expired_issuer
        .generate_token(1, "tester", Role::Admin, None)
        .unwrap();

    let app = hms_server::api::router(state);
    let (status, body) = send(&app, "GET", "/api/establishments", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1003); // TokenExpired
}

#[tokio::test]
async fn staff_cannot_reach_manager_routes() {
    let state = test_state().await;
    let admin = token(&state, 1, Role::Admin, None);
    let app = hms_server::api::router(state.clone());

    let est = seed_establishment(&app, &admin, "Mar Azul").await;
    let staff = token(&state, 10, Role::Staff, Some(est));

    // Establishment creation is admin-only
    let (status, body) = send(
        &app,
        "POST",
        "/api/establishments",
        Some(&staff),
        Some(json!({"name": "X", "city": "Y", "address": "Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003); // AdminRequired

    // Payroll generation is manager-tier
    let (status, body) = send(
        &app,
        "POST",
        "/api/payrolls/generate",
        Some(&staff),
        Some(json!({"year": 2025, "month": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002); // RoleRequired
}

#[tokio::test]
async fn cross_establishment_leave_create_denied() {
    let state = test_state().await;
    let admin = token(&state, 1, Role::Admin, None);
    let app = hms_server::api::router(state.clone());

    let est_a = seed_establishment(&app, &admin, "Mar Azul").await;
    let est_b = seed_establishment(&app, &admin, "Sierra Alta").await;
    let emp = seed_employee(&app, &admin, est_a, "ana@marazul.example").await;

    let leave_payload = json!({
        "employee_id": emp,
        "leave_type": "ANNUAL",
        "start_date": "2025-03-03",
        "end_date": "2025-03-07"
    });

    // Manager of B cannot link a leave to A's employee
    let manager_b = token(&state, 20, Role::Manager, Some(est_b));
    let (status, body) = send(
        &app,
        "POST",
        "/api/leaves",
        Some(&manager_b),
        Some(leave_payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2102); // CrossEstablishmentRelationship
    assert_eq!(body["details"]["parent_establishment_id"].as_i64(), Some(est_a));
    assert_eq!(body["details"]["caller_establishment_id"].as_i64(), Some(est_b));

    // Manager of A succeeds
    let manager_a = token(&state, 21, Role::Manager, Some(est_a));
    let (status, body) = send(
        &app,
        "POST",
        "/api/leaves",
        Some(&manager_a),
        Some(leave_payload),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["days"], 5);
    assert_eq!(body["status"], "PENDING");
}

#[tokio::test]
async fn leave_lifecycle_and_balance() {
    let state = test_state().await;
    let admin = token(&state, 1, Role::Admin, None);
    let app = hms_server::api::router(state.clone());

    let est = seed_establishment(&app, &admin, "Mar Azul").await;
    let emp = seed_employee(&app, &admin, est, "ana@marazul.example").await;
    let manager = token(&state, 21, Role::Manager, Some(est));

    let (status, leave) = send(
        &app,
        "POST",
        "/api/leaves",
        Some(&manager),
        Some(json!({
            "employee_id": emp,
            "leave_type": "ANNUAL",
            "start_date": "2025-03-03",
            "end_date": "2025-03-07"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let leave_id = leave["id"].as_i64().unwrap();

    let (status, approved) = send(
        &app,
        "POST",
        &format!("/api/leaves/{leave_id}/approve"),
        Some(&manager),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "APPROVED");
    assert_eq!(approved["approved_by"].as_i64(), Some(21));

    // Approving again is an invalid transition → 409
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/leaves/{leave_id}/approve"),
        Some(&manager),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6004); // LeaveInvalidTransition

    let (status, balance) = send(
        &app,
        "GET",
        &format!("/api/leaves/balance/{emp}?year=2025"),
        Some(&manager),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance["annual_used"], 5);
    assert_eq!(balance["annual_remaining"], 17);

    // An overlapping second request conflicts
    let (status, body) = send(
        &app,
        "POST",
        "/api/leaves",
        Some(&manager),
        Some(json!({
            "employee_id": emp,
            "leave_type": "SICK",
            "start_date": "2025-03-05",
            "end_date": "2025-03-09"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6002); // LeaveOverlap
}

#[tokio::test]
async fn payroll_generate_twice_is_idempotent() {
    let state = test_state().await;
    let admin = token(&state, 1, Role::Admin, None);
    let app = hms_server::api::router(state.clone());

    let est = seed_establishment(&app, &admin, "Mar Azul").await;
    seed_employee(&app, &admin, est, "ana@marazul.example").await;
    seed_employee(&app, &admin, est, "luis@marazul.example").await;

    let payload = json!({"year": 2025, "month": 1, "establishment_id": est});
    let (status, first) = send(
        &app,
        "POST",
        "/api/payrolls/generate",
        Some(&admin),
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first.as_array().unwrap().len(), 2);

    let (status, second) = send(
        &app,
        "POST",
        "/api/payrolls/generate",
        Some(&admin),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(second.as_array().unwrap().is_empty());

    let (status, summary) = send(
        &app,
        "GET",
        &format!("/api/payrolls/summary?year=2025&month=1&establishment_id={est}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["count"], 2);
    assert_eq!(summary["total_gross"], 3800.0);
}

#[tokio::test]
async fn duplicate_payroll_period_conflicts() {
    let state = test_state().await;
    let admin = token(&state, 1, Role::Admin, None);
    let app = hms_server::api::router(state.clone());

    let est = seed_establishment(&app, &admin, "Mar Azul").await;
    let emp = seed_employee(&app, &admin, est, "ana@marazul.example").await;

    let payload = json!({"employee_id": emp, "year": 2025, "month": 1});
    let (status, _) = send(&app, "POST", "/api/payrolls", Some(&admin), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/api/payrolls", Some(&admin), Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 7002); // PayrollPeriodExists
}

#[tokio::test]
async fn scoped_caller_sees_own_establishment_only() {
    let state = test_state().await;
    let admin = token(&state, 1, Role::Admin, None);
    let app = hms_server::api::router(state.clone());

    let est_a = seed_establishment(&app, &admin, "Mar Azul").await;
    let est_b = seed_establishment(&app, &admin, "Sierra Alta").await;
    let manager_a = token(&state, 21, Role::Manager, Some(est_a));

    // Listing is filtered to the caller's establishment
    let (status, page) = send(&app, "GET", "/api/establishments", Some(&manager_a), None).await;
    assert_eq!(status, StatusCode::OK);
    let data = page["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"].as_i64(), Some(est_a));

    // Direct reads of the foreign establishment are denied
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/establishments/{est_b}"),
        Some(&manager_a),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2101); // EstablishmentAccessDenied

    // Analytics over the foreign establishment are denied too
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/analytics/revenue?establishment_id={est_b}&from=2025-01-01&to=2025-01-31"),
        Some(&manager_a),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2101);
}

#[tokio::test]
async fn financial_summary_over_empty_establishment() {
    let state = test_state().await;
    let admin = token(&state, 1, Role::Admin, None);
    let app = hms_server::api::router(state.clone());

    let est = seed_establishment(&app, &admin, "Mar Azul").await;
    let (status, summary) = send(
        &app,
        "GET",
        &format!(
            "/api/analytics/financial-summary?establishment_id={est}&from=2025-01-01&to=2025-01-31"
        ),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["revenue"], 0.0);
    assert_eq!(summary["profit_margin"], 0.0);
    assert_eq!(summary["occupancy_rate"], 0.0);
}

#[tokio::test]
async fn comparison_report_for_global_caller() {
    let state = test_state().await;
    let admin = token(&state, 1, Role::Admin, None);
    let app = hms_server::api::router(state.clone());

    seed_establishment(&app, &admin, "Mar Azul").await;
    seed_establishment(&app, &admin, "Sierra Alta").await;

    let (status, report) = send(
        &app,
        "GET",
        "/api/reports/comparison?from=2025-01-01&to=2025-01-31",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["establishments"].as_array().unwrap().len(), 2);
}
