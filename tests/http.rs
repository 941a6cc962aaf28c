use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct OutcomeResponse {
    outcome: String,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));
static BACKEND: Lazy<String> = Lazy::new(spawn_backend);

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn backend_router() -> Router {
    Router::new()
        .route(
            "/api/statistics",
            get(|| async {
                Json(json!({
                    "total_startups": 2,
                    "last_update": "17/10/2026 09:30",
                    "top_sectors": [{"name": "Fintech", "count": 2}],
                    "top_countries": [{"name": "Brasil", "count": 1}, {"name": "Chile", "count": 1}]
                }))
            }),
        )
        .route(
            "/api/startups",
            get(|| async {
                Json(json!([
                    {
                        "nome": "Acme",
                        "investidor": "Monashees",
                        "status": "Ativa",
                        "pais": "Brasil",
                        "tam": "1.5M",
                        "setor": "Fintech"
                    },
                    {"nome": "Moss"}
                ]))
            }),
        )
        .route("/api/chat", post(backend_chat))
}

async fn backend_chat(Json(body): Json<Value>) -> impl IntoResponse {
    if body["message"] == "fail" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "not found"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"answer": "X is Y.", "sources": [{"link": "https://a.example"}]})),
    )
}

/// Runs the mock backend on its own runtime so it outlives any single test.
fn spawn_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind backend port");
    let port = listener.local_addr().unwrap().port();
    listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("backend runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, backend_router()).await.unwrap();
        });
    });

    format!("http://127.0.0.1:{port}")
}

async fn wait_until(base_url: &str, ready: impl Fn(&str) -> bool) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/")).send().await {
            if resp.status().is_success() {
                if let Ok(body) = resp.text().await {
                    if ready(&body) {
                        return;
                    }
                }
            }
        }
        if Instant::now() > deadline {
            panic!("dashboard did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_inception_dashboard"))
        .env("PORT", port.to_string())
        .env("DASHBOARD_API_URL", BACKEND.as_str())
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn dashboard");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until(&base_url, |page| page.contains("<strong>Acme</strong>")).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn page(client: &Client, server: &TestServer) -> String {
    client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

async fn send_chat(client: &Client, server: &TestServer, message: &str) -> OutcomeResponse {
    client
        .post(format!("{}/ui/chat", server.base_url))
        .json(&json!({ "message": message }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_index_renders_backend_data() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let html = page(&client, &server).await;

    assert!(html.contains(r#"<span id="total-startups" class="value">2</span>"#));
    assert!(html.contains("Última atualização 17/10/2026 09:30"));
    assert!(html.contains(r#"<span class="rank">2°</span><span class="name">Chile</span>"#));
    assert!(html.contains("<td>€ 1.5M</td>"));
    assert!(html.contains("<td><strong>Moss</strong></td><td>Não informado</td><td>Não disponível</td>"));
    assert!(html.contains("<td>€ 0.00</td>"));
}

#[tokio::test]
async fn http_chat_answer_is_rendered_with_sources() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = send_chat(&client, &server, "What is X?").await;
    assert_eq!(response.outcome, "answered");

    let html = page(&client, &server).await;
    assert!(html.contains(r#"<div class="msg user">What is X?</div>"#));
    assert!(html.contains(r#"<div class="msg bot">X is Y.</div>"#));
    assert!(html.contains(r#"href="https://a.example""#));
    assert!(html.contains(">https://a.example</a>"));
    assert!(!html.contains("msg bot loading"));
}

#[tokio::test]
async fn http_chat_server_error_is_prefixed() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = send_chat(&client, &server, "fail").await;
    assert_eq!(response.outcome, "server_error");

    let html = page(&client, &server).await;
    assert!(html.contains(r#"<div class="msg bot">Erro: not found</div>"#));
}

#[tokio::test]
async fn http_blank_chat_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = page(&client, &server).await;
    let response = send_chat(&client, &server, "   ").await;
    assert_eq!(response.outcome, "rejected");
    assert_eq!(
        page(&client, &server).await.matches("msg user").count(),
        before.matches("msg user").count()
    );
}

#[tokio::test]
async fn http_suggestion_fills_input() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/ui/suggestion", server.base_url))
        .json(&json!({ "index": 0 }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    let label = body["label"].as_str().unwrap().to_string();
    assert!(!label.is_empty());

    let html = page(&client, &server).await;
    assert!(html.contains(&format!(r#"value="{label}""#)));

    let missing = client
        .post(format!("{}/ui/suggestion", server.base_url))
        .json(&json!({ "index": 99 }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_filter_off_triggers_refresh() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let on: Value = client
        .post(format!("{}/ui/filter", server.base_url))
        .json(&json!({ "enabled": true }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(on, json!({"enabled": true, "refresh": null}));

    let off: Value = client
        .post(format!("{}/ui/filter", server.base_url))
        .json(&json!({ "enabled": false }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(off, json!({"enabled": false, "refresh": "rendered"}));
}

#[tokio::test]
async fn http_manual_refresh_renders() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response: OutcomeResponse = client
        .post(format!("{}/ui/refresh", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(response.outcome, "rendered");
}
