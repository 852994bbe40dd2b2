//! End-to-end tests: the real router on an ephemeral port, talking to a local
//! stand-in for the completions provider.

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use reqwest::Method;
use serde_json::{json, Value};

use todo_assistant::api::{self, AppState};
use todo_assistant::Config;

/// Requests seen by the fake provider: (authorization header, JSON body).
type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

#[derive(Clone)]
struct Upstream {
    seen: Seen,
    status: StatusCode,
    reply: Value,
}

async fn fake_completions(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    upstream.seen.lock().unwrap().push((auth, body));
    (upstream.status, Json(upstream.reply.clone()))
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_upstream(status: StatusCode, reply: Value) -> (String, Seen) {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route("/v1/chat/completions", post(fake_completions))
        .with_state(Upstream {
            seen: seen.clone(),
            status,
            reply,
        });
    (format!("{}/v1", spawn(app).await), seen)
}

fn completion(text: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": text}, "finish_reason": "stop"}
        ]
    })
}

async fn spawn_app(api_key: Option<&str>, base_url: &str) -> String {
    let mut config = Config::new(api_key.map(str::to_string));
    config.llm.base_url = base_url.to_string();
    let state = Arc::new(AppState::new(config));
    spawn(api::router(state)).await
}

async fn post_chat(app: &str, body: Value) -> (StatusCode, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{}/chat", app))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn root_and_health() {
    let app = spawn_app(None, "http://127.0.0.1:1").await;

    let root: Value = reqwest::get(format!("{}/", app)).await.unwrap().json().await.unwrap();
    assert_eq!(root, json!({"message": "AI Todo API", "version": "1.0"}));

    let health: Value = reqwest::get(format!("{}/health", app))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health, json!({"status": "healthy"}));
}

#[tokio::test]
async fn add_message_returns_new_task() {
    let (upstream, seen) = spawn_upstream(StatusCode::OK, completion("Added! ✅")).await;
    let app = spawn_app(Some("test-key"), &upstream).await;

    let (status, body) = post_chat(&app, json!({"message": "add buy milk", "tasks": []})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "response": "Added! ✅",
            "action": "add_task",
            "task": {
                "title": "buy milk",
                "description": "",
                "completed": false,
                "priority": "Medium",
                "category": "Personal",
                "dueDate": "",
                "repeat": "No Repeat"
            },
            "task_id": null
        })
    );

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, sent) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(sent["model"], "llama-3.3-70b-versatile");
    assert_eq!(sent["max_tokens"], 150);
    assert_eq!(sent["messages"][0]["role"], "system");
    assert!(sent["messages"][0]["content"]
        .as_str()
        .unwrap()
        .contains("No tasks yet"));
    assert_eq!(sent["messages"][1], json!({"role": "user", "content": "add buy milk"}));
}

#[tokio::test]
async fn delete_message_returns_task_id() {
    let (upstream, _seen) = spawn_upstream(StatusCode::OK, completion("Removed it.")).await;
    let app = spawn_app(Some("test-key"), &upstream).await;

    let (status, body) = post_chat(
        &app,
        json!({
            "message": "delete buy milk",
            "tasks": [
                {"id": 3, "title": "Walk dog", "completed": false},
                {"id": 7, "title": "Buy milk", "priority": "High"}
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "delete_task");
    assert_eq!(body["task_id"], 7);
    assert_eq!(body["task"], Value::Null);
}

#[tokio::test]
async fn plain_message_has_no_action() {
    let (upstream, _seen) =
        spawn_upstream(StatusCode::OK, completion("I'll add and delete whatever you like!")).await;
    let app = spawn_app(Some("test-key"), &upstream).await;

    let (_, body) = post_chat(
        &app,
        json!({"message": "what do I have today?", "tasks": [{"id": 1, "title": "Walk dog"}]}),
    )
    .await;
    assert_eq!(body["response"], "I'll add and delete whatever you like!");
    assert_eq!(body["action"], Value::Null);
    assert_eq!(body["task"], Value::Null);
    assert_eq!(body["task_id"], Value::Null);
}

#[tokio::test]
async fn missing_api_key_still_returns_reply() {
    let app = spawn_app(None, "http://127.0.0.1:1").await;

    let (status, body) = post_chat(&app, json!({"message": "add buy milk"})).await;
    assert_eq!(status, StatusCode::OK);
    let reply = body["response"].as_str().unwrap();
    assert!(reply.starts_with("Oops! Something went wrong:"));
    assert_eq!(body["action"], Value::Null);
    assert_eq!(body["task"], Value::Null);
    assert_eq!(body["task_id"], Value::Null);
}

#[tokio::test]
async fn upstream_error_still_returns_reply() {
    let (upstream, _seen) = spawn_upstream(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": {"message": "boom"}}),
    )
    .await;
    let app = spawn_app(Some("test-key"), &upstream).await;

    let (status, body) = post_chat(&app, json!({"message": "delete buy milk", "tasks": []})).await;
    assert_eq!(status, StatusCode::OK);
    let reply = body["response"].as_str().unwrap();
    assert!(reply.contains("500"));
    assert_eq!(body["action"], Value::Null);
}

#[tokio::test]
async fn options_chat_always_allows_cors() {
    let app = spawn_app(None, "http://127.0.0.1:1").await;
    let client = reqwest::Client::new();

    let plain = client
        .request(Method::OPTIONS, format!("{}/chat", app))
        .send()
        .await
        .unwrap();
    assert_eq!(plain.status(), StatusCode::OK);
    assert_eq!(plain.headers()["access-control-allow-origin"], "*");
    assert_eq!(plain.headers()["access-control-allow-methods"], "POST, OPTIONS");

    let preflight = client
        .request(Method::OPTIONS, format!("{}/chat", app))
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();
    assert_eq!(preflight.status(), StatusCode::OK);
    assert_eq!(preflight.headers()["access-control-allow-origin"], "*");
    assert_eq!(preflight.headers()["access-control-allow-headers"], "*");
}

#[tokio::test]
async fn preflight_on_other_routes_mirrors_origin() {
    let app = spawn_app(None, "http://127.0.0.1:1").await;

    let preflight = reqwest::Client::new()
        .request(Method::OPTIONS, format!("{}/health", app))
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "x-custom")
        .send()
        .await
        .unwrap();
    assert_eq!(preflight.status(), StatusCode::OK);
    let headers = preflight.headers();
    assert_eq!(headers["access-control-allow-origin"], "http://localhost:5173");
    assert_eq!(headers["access-control-allow-credentials"], "true");
    assert_eq!(headers["access-control-allow-headers"], "x-custom");
    assert_eq!(headers["access-control-max-age"], "3600");
}

#[tokio::test]
async fn cross_origin_post_gets_cors_headers() {
    let (upstream, _seen) = spawn_upstream(StatusCode::OK, completion("Hi!")).await;
    let app = spawn_app(Some("test-key"), &upstream).await;

    let resp = reqwest::Client::new()
        .post(format!("{}/chat", app))
        .header("Origin", "https://todo.example.com")
        .json(&json!({"message": "hello"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()["access-control-allow-origin"],
        "https://todo.example.com"
    );
}

#[tokio::test]
async fn missing_completion_still_returns_reply() {
    for reply in [
        json!({"choices": []}),
        json!({"choices": [{"message": {"role": "assistant", "content": null}}]}),
    ] {
        let (upstream, _seen) = spawn_upstream(StatusCode::OK, reply).await;
        let app = spawn_app(Some("test-key"), &upstream).await;

        let (status, body) = post_chat(&app, json!({"message": "add buy milk"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["response"],
            "Oops! Something went wrong: LLM provider returned no completion text"
        );
        assert_eq!(body["action"], Value::Null);
    }
}

#[tokio::test]
async fn empty_completion_text_keeps_action() {
    let (upstream, _seen) = spawn_upstream(StatusCode::OK, completion("")).await;
    let app = spawn_app(Some("test-key"), &upstream).await;

    let (status, body) = post_chat(&app, json!({"message": "add buy milk"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "");
    assert_eq!(body["action"], "add_task");
    assert_eq!(body["task"]["title"], "buy milk");
}

#[tokio::test]
async fn non_string_task_title_is_accepted() {
    let (upstream, seen) = spawn_upstream(StatusCode::OK, completion("Hello!")).await;
    let app = spawn_app(Some("test-key"), &upstream).await;

    let (status, body) =
        post_chat(&app, json!({"message": "hello", "tasks": [{"id": 1, "title": 5}]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Hello!");
    assert_eq!(body["action"], Value::Null);
    let prompt = seen.lock().unwrap()[0].1["messages"][0]["content"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.contains("- 5\n"));

    let (status, body) = post_chat(
        &app,
        json!({"message": "delete buy milk", "tasks": [{"id": 1, "title": 5}]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["response"],
        "Oops! Something went wrong: task title 5 is not a string"
    );
    assert_eq!(body["action"], Value::Null);
    assert_eq!(body["task_id"], Value::Null);
}
