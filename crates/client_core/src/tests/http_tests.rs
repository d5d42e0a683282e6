use super::*;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::MarkState;
use tokio::{net::TcpListener, sync::Mutex};

use crate::config::parse_base_url;

#[derive(Clone, Default)]
struct FakeSession {
    submitted: Arc<Mutex<Vec<Value>>>,
    content_types: Arc<Mutex<Vec<String>>>,
}

fn snapshot_json(step: u32, guess: &str) -> Value {
    json!({
        "step": step,
        "suggestions": [guess.to_lowercase(), "soare"],
        "entropies": [5.91, 5.88],
        "suggestion_index": 0,
        "current_guess": guess,
        "current_entropy": 5.91,
        "remaining_count": 2315,
        "remaining_sorted": [],
        "top_remaining": null
    })
}

fn has_session_cookie(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|cookie| cookie.contains("session=abc"))
}

async fn record_content_type(state: &FakeSession, headers: &HeaderMap) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.content_types.lock().await.push(content_type);
}

async fn new_game(State(state): State<FakeSession>, headers: HeaderMap) -> Response {
    record_content_type(&state, &headers).await;
    (
        [(header::SET_COOKIE, "session=abc; Path=/")],
        Json(snapshot_json(1, "RAISE")),
    )
        .into_response()
}

async fn current_state(headers: HeaderMap) -> Response {
    if has_session_cookie(&headers) {
        Json(snapshot_json(2, "CLOTH")).into_response()
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "no session").into_response()
    }
}

async fn switch() -> Json<Value> {
    Json(snapshot_json(2, "TORCH"))
}

async fn inject(Json(body): Json<Value>) -> Response {
    let word = body["word"].as_str().unwrap_or_default().to_string();
    if word == "ZZZZZ" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"ok": false, "error": "Invalid word"})),
        )
            .into_response();
    }
    let mut reply = snapshot_json(2, &word.to_uppercase());
    reply["ok"] = json!(true);
    Json(reply).into_response()
}

async fn submit(
    State(state): State<FakeSession>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    record_content_type(&state, &headers).await;
    state.submitted.lock().await.push(body.clone());
    let mut reply = snapshot_json(3, "CRANE");
    if body["feedback"] == json!([2, 2, 2, 2, 2]) {
        reply["answer"] = json!("CRANE");
    }
    Json(reply)
}

async fn spawn_session_server() -> (HttpSessionService, FakeSession) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = FakeSession::default();
    let app = Router::new()
        .route("/api/state", get(current_state))
        .route("/api/new_game", post(new_game))
        .route("/api/switch", post(switch))
        .route("/api/inject", post(inject))
        .route("/api/submit", post(submit))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    let base_url = parse_base_url(&format!("http://{addr}")).expect("base url");
    let service = HttpSessionService::new(base_url, Duration::from_secs(5)).expect("client");
    (service, state)
}

async fn spawn_broken_server(request_timeout: Duration) -> HttpSessionService {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/api/state", get(|| async { "<html>not json</html>" }))
        .route(
            "/api/new_game",
            post(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({"error": "overloaded"})),
                )
            }),
        )
        .route(
            "/api/inject",
            post(|| async { (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") }),
        )
        .route(
            "/api/switch",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(snapshot_json(2, "LATER"))
            }),
        );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    let base_url = parse_base_url(&format!("http://{addr}")).expect("base url");
    HttpSessionService::new(base_url, request_timeout).expect("client")
}

#[tokio::test]
async fn new_game_decodes_snapshot_and_keeps_session_cookie() {
    let (service, fake) = spawn_session_server().await;

    let snapshot = service.new_game().await.expect("new game");
    assert_eq!(snapshot.step, 1);
    assert_eq!(snapshot.current_guess, "RAISE");
    assert_eq!(snapshot.entropies, vec![5.91, 5.88]);

    let state = service.fetch_state().await.expect("state with cookie");
    assert_eq!(state.current_guess, "CLOTH");

    assert_eq!(
        fake.content_types.lock().await.as_slice(),
        ["application/json".to_string()]
    );
}

#[tokio::test]
async fn state_without_session_is_a_status_error() {
    let (service, _fake) = spawn_session_server().await;
    let err = service.fetch_state().await.expect_err("no cookie yet");
    assert_eq!(
        err,
        ServiceError::Status {
            status: 500,
            message: "no session".into()
        }
    );
}

#[tokio::test]
async fn submit_posts_integer_feedback_and_reads_answer() {
    let (service, fake) = spawn_session_server().await;

    let reply = service
        .submit_feedback([MarkState::Correct; 5])
        .await
        .expect("submit");
    assert_eq!(reply.answer.as_deref(), Some("CRANE"));

    let reply = service
        .submit_feedback([
            MarkState::Correct,
            MarkState::Unset,
            MarkState::Unset,
            MarkState::Present,
            MarkState::Unset,
        ])
        .await
        .expect("submit");
    assert!(reply.answer.is_none());
    assert_eq!(reply.snapshot.step, 3);

    let submitted = fake.submitted.lock().await;
    assert_eq!(submitted[1], json!({"feedback": [2, 0, 0, 1, 0]}));
    assert!(fake
        .content_types
        .lock()
        .await
        .iter()
        .all(|ct| ct.starts_with("application/json")));
}

#[tokio::test]
async fn inject_distinguishes_acceptance_from_refusal() {
    let (service, _fake) = spawn_session_server().await;

    match service.inject_word("crane").await.expect("inject") {
        InjectReply::Accepted(snapshot) => assert_eq!(snapshot.current_guess, "CRANE"),
        other => panic!("expected acceptance, got {other:?}"),
    }
    assert_eq!(
        service.inject_word("ZZZZZ").await.expect("inject"),
        InjectReply::Rejected {
            reason: Some("Invalid word".into())
        }
    );
}

#[tokio::test]
async fn switch_returns_next_suggestion() {
    let (service, _fake) = spawn_session_server().await;
    let snapshot = service.switch_suggestion().await.expect("switch");
    assert_eq!(snapshot.current_guess, "TORCH");
}

#[tokio::test]
async fn broken_responses_map_to_soft_errors() {
    let service = spawn_broken_server(Duration::from_secs(5)).await;

    assert!(matches!(
        service.fetch_state().await,
        Err(ServiceError::Decode(_))
    ));
    assert_eq!(
        service.new_game().await,
        Err(ServiceError::Status {
            status: 503,
            message: "overloaded".into()
        })
    );
    assert!(matches!(
        service.inject_word("crane").await,
        Err(ServiceError::Status { status: 502, .. })
    ));
}

#[tokio::test]
async fn slow_service_hits_client_timeout() {
    let service = spawn_broken_server(Duration::from_millis(100)).await;
    assert!(matches!(
        service.switch_suggestion().await,
        Err(ServiceError::Transport(_))
    ));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let base_url = parse_base_url(&format!("http://{addr}")).expect("base url");
    let service = HttpSessionService::new(base_url, Duration::from_secs(2)).expect("client");
    assert!(matches!(
        service.new_game().await,
        Err(ServiceError::Transport(_))
    ));
}
