//! End-to-end tests for the REST transport against an in-process
//! backend: bearer attachment, the refresh-on-401 retry, and how
//! server error bodies surface.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{Value, json};

use lotus_client::api::{AuthApi, BookingApi, RestApi};
use lotus_client::config::ClientConfig;
use lotus_client::error::ClientError;
use lotus_client::session::TokenPair;
use shared::models::BookingCreate;

const ACCESS_FRESH: &str = "access-1";
const ACCESS_REFRESHED: &str = "access-2";
const REFRESH_VALID: &str = "refresh-1";

#[derive(Default)]
struct ServerState {
    profile_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
    last_auth_header: Mutex<Option<String>>,
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["username"] == "alice" && body["password"] == "hunter2" {
        Json(json!({"access": ACCESS_FRESH, "refresh": REFRESH_VALID})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        )
            .into_response()
    }
}

async fn refresh(State(state): State<Arc<ServerState>>, Json(body): Json<Value>) -> impl IntoResponse {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if body["refresh"] == REFRESH_VALID {
        Json(json!({"access": ACCESS_REFRESHED})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Token is invalid or expired"})),
        )
            .into_response()
    }
}

async fn profile(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> impl IntoResponse {
    state.profile_calls.fetch_add(1, Ordering::SeqCst);
    let token = bearer(&headers);
    *state.last_auth_header.lock().unwrap() = token.map(str::to_string);
    match token {
        Some(ACCESS_FRESH) | Some(ACCESS_REFRESHED) => Json(json!({
            "id": 1,
            "username": "alice",
            "email": "alice@example.com",
            "full_name": "Alice",
            "phone": null,
            "id_card": null,
            "address": null,
            "role": "customer",
            "is_active": true
        }))
        .into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Given token not valid for any token type"})),
        )
            .into_response(),
    }
}

async fn create_booking(Json(_body): Json<Value>) -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "message": "Dates overlap an existing booking",
            "error": "overlap"
        })),
    )
}

async fn spawn_backend() -> (SocketAddr, Arc<ServerState>) {
    let state = Arc::new(ServerState::default());
    let app = Router::new()
        .route("/api/auth/token/", post(login))
        .route("/api/auth/token/refresh/", post(refresh))
        .route("/users/profile/", get(profile))
        .route("/bookings/", post(create_booking))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

fn client_for(addr: SocketAddr) -> RestApi {
    RestApi::new(&ClientConfig::new(format!("http://{addr}"))).unwrap()
}

#[tokio::test]
async fn login_attaches_the_bearer_to_subsequent_requests() {
    let (addr, state) = spawn_backend().await;
    let api = client_for(addr);

    api.login("alice", "hunter2").await.unwrap();
    assert!(api.session().is_authenticated().await);

    let user = api.current_user().await.unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(
        state.last_auth_header.lock().unwrap().as_deref(),
        Some(ACCESS_FRESH)
    );
}

#[tokio::test]
async fn bad_credentials_surface_the_server_detail() {
    let (addr, _state) = spawn_backend().await;
    let api = client_for(addr);

    let err = api.login("alice", "wrong").await.unwrap_err();
    match err {
        ClientError::Unauthorized(msg) => {
            assert_eq!(msg, "No active account found with the given credentials");
        }
        other => panic!("expected Unauthorized, got {other}"),
    }
    assert!(!api.session().is_authenticated().await);
}

#[tokio::test]
async fn expired_access_token_is_refreshed_and_the_request_retried_once() {
    let (addr, state) = spawn_backend().await;
    let api = client_for(addr);
    api.session()
        .set_tokens(TokenPair {
            access: "stale".into(),
            refresh: REFRESH_VALID.into(),
        })
        .await
        .unwrap();

    let user = api.current_user().await.unwrap();
    assert_eq!(user.id, 1);

    // 401 once, refreshed once, retried once.
    assert_eq!(state.profile_calls.load(Ordering::SeqCst), 2);
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        api.session().access_token().await.as_deref(),
        Some(ACCESS_REFRESHED)
    );
}

#[tokio::test]
async fn rejected_refresh_ends_the_session() {
    let (addr, state) = spawn_backend().await;
    let api = client_for(addr);
    api.session()
        .set_tokens(TokenPair {
            access: "stale".into(),
            refresh: "revoked".into(),
        })
        .await
        .unwrap();

    let err = api.current_user().await.unwrap_err();
    match err {
        ClientError::Unauthorized(msg) => assert_eq!(msg, "Session expired"),
        other => panic!("expected Unauthorized, got {other}"),
    }
    assert!(!api.session().is_authenticated().await);
    // The original request is not retried after a failed refresh.
    assert_eq!(state.profile_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn anonymous_401_passes_through_without_a_refresh_attempt() {
    let (addr, state) = spawn_backend().await;
    let api = client_for(addr);

    let err = api.current_user().await.unwrap_err();
    match err {
        ClientError::Unauthorized(msg) => {
            assert_eq!(msg, "Given token not valid for any token type");
        }
        other => panic!("expected Unauthorized, got {other}"),
    }
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn validation_errors_prefer_the_message_field_over_error() {
    let (addr, _state) = spawn_backend().await;
    let api = client_for(addr);

    let req = BookingCreate {
        rooms: vec![1],
        check_in_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        check_out_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        guest_count: 2,
        special_requests: None,
        customer: None,
    };
    let err = api.create_booking(&req).await.unwrap_err();
    match err {
        ClientError::Validation(msg) => {
            assert_eq!(msg, "Dates overlap an existing booking");
        }
        other => panic!("expected Validation, got {other}"),
    }
}
