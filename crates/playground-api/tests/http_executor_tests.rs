use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use playground_api::mock::{self, echo_responder, fixed_responder, Responder, RUN_ROUTE};
use playground_api::{ApiError, HttpExecutor, RunPayload};
use playground_core::{EditorSession, Executor, HostPage, Language, RunOutcome, RunRequest, SessionConfig};

async fn endpoint_for(responder: Responder) -> String {
    let addr = mock::spawn("127.0.0.1:0", responder).await.unwrap();
    format!("http://{}{}", addr, RUN_ROUTE)
}

fn closed_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, RUN_ROUTE)
}

fn request(language: Language, code: &str) -> RunRequest {
    RunRequest {
        language,
        source_text: code.to_string(),
    }
}

#[test]
fn http_executor_rejects_bad_endpoints() {
    assert!(matches!(
        HttpExecutor::new("not a url"),
        Err(ApiError::InvalidEndpoint { .. })
    ));
    assert!(matches!(
        HttpExecutor::new("ftp://example.com/run"),
        Err(ApiError::UnsupportedScheme(_))
    ));
    let executor = HttpExecutor::new("http://localhost:3000/api/run").unwrap();
    assert_eq!(executor.endpoint().path(), "/api/run");
}

#[test]
fn run_payload_uses_language_and_code_keys() {
    let payload = RunPayload::from(&request(Language::Cpp, "int main() {}"));
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "language": "cpp", "code": "int main() {}" })
    );
}

#[tokio::test]
async fn http_executor_returns_success_body_verbatim() {
    let endpoint = endpoint_for(fixed_responder(StatusCode::OK, "hello")).await;
    let executor = HttpExecutor::new(&endpoint).unwrap();
    let outcome = executor.execute(&request(Language::Python, "print(\"hello\")")).await;
    assert_eq!(outcome, RunOutcome::Success("hello".to_string()));
}

#[tokio::test]
async fn http_executor_keeps_execution_errors_as_success() {
    let endpoint = endpoint_for(fixed_responder(
        StatusCode::OK,
        "main.cpp:1:1: error: expected declaration",
    ))
    .await;
    let executor = HttpExecutor::new(&endpoint).unwrap();
    let outcome = executor.execute(&request(Language::Cpp, "int main( {")).await;
    assert_eq!(
        outcome,
        RunOutcome::Success("main.cpp:1:1: error: expected declaration".to_string())
    );
}

#[tokio::test]
async fn http_executor_maps_failure_status_to_service_error() {
    let endpoint = endpoint_for(fixed_responder(StatusCode::BAD_REQUEST, "syntax error")).await;
    let executor = HttpExecutor::new(&endpoint).unwrap();
    let outcome = executor.execute(&request(Language::Cpp, "")).await;
    assert_eq!(outcome, RunOutcome::ServiceError("syntax error".to_string()));
    assert_eq!(outcome.display_text(), "Error: syntax error");
}

#[tokio::test]
async fn http_executor_reports_unreachable_service() {
    let executor = HttpExecutor::new(&closed_endpoint()).unwrap();
    let outcome = executor.execute(&request(Language::Python, "print(1)")).await;
    match outcome {
        RunOutcome::TransportError(message) => assert!(!message.is_empty()),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn http_executor_posts_json_payload() {
    let seen: Arc<Mutex<Vec<RunPayload>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let responder: Responder = Arc::new(move |payload: &RunPayload| {
        sink.lock().unwrap().push(payload.clone());
        (StatusCode::OK, "ok".to_string())
    });
    let endpoint = endpoint_for(responder).await;
    let executor = HttpExecutor::new(&endpoint).unwrap();
    executor
        .execute(&request(Language::JavaScript, "console.log(1);"))
        .await;

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![RunPayload {
            language: "javascript".to_string(),
            code: "console.log(1);".to_string(),
        }]
    );
}

#[tokio::test]
async fn editor_session_runs_against_echo_service() {
    let endpoint = endpoint_for(echo_responder()).await;
    let executor = Arc::new(HttpExecutor::new(&endpoint).unwrap());
    let mut editor = EditorSession::new(HostPage::new(), executor, SessionConfig::default());

    editor.select_language(Language::Python);
    editor.run().await.unwrap();
    assert_eq!(
        editor.session().last_output(),
        Some("[python] received 1 line(s)\nprint(\"hello\")")
    );

    editor.set_source_text("   ");
    editor.run().await.unwrap();
    assert_eq!(editor.session().last_output(), Some("Error: empty source"));
    assert!(!editor.is_running());
}

#[tokio::test]
async fn editor_session_survives_transport_failure() {
    let executor = Arc::new(HttpExecutor::new(&closed_endpoint()).unwrap());
    let mut editor = EditorSession::new(HostPage::new(), executor, SessionConfig::default());

    editor.run().await.unwrap();
    let output = editor.session().last_output().unwrap().to_string();
    assert!(output.starts_with("Error: "));
    assert!(!editor.is_running());

    editor.toggle_dark_mode();
    assert!(editor.session().dark_mode());
}

#[tokio::test]
async fn mock_rejects_malformed_payload() {
    let endpoint = endpoint_for(echo_responder()).await;
    let response = reqwest::Client::new()
        .post(&endpoint)
        .json(&serde_json::json!({ "lang": "cpp" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn http_executor_reports_truncated_body_as_transport_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = stream.read(&mut buf).await;
        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nshort")
            .await
            .unwrap();
        let _ = stream.shutdown().await;
    });

    let executor = HttpExecutor::new(&format!("http://{}{}", addr, RUN_ROUTE)).unwrap();
    let outcome = executor.execute(&request(Language::Cpp, "int main() {}")).await;
    assert!(matches!(outcome, RunOutcome::TransportError(_)), "got {:?}", outcome);
    assert!(outcome.display_text().starts_with("Error: "));
}
