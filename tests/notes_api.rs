//! End-to-end tests: a real listener on an ephemeral port, driven over TCP.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, StatusCode};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use notes_server::config::{AppState, Config};
use notes_server::server;
use notes_server::store::Note;

struct TestServer {
    addr: SocketAddr,
    dir: TempDir,
    shutdown: Arc<Notify>,
    handle: JoinHandle<std::io::Result<()>>,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl TestServer {
    async fn start() -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.storage.cache_dir = dir.path().join("cache").display().to_string();
        config.storage.form_path = dir.path().join("UploadForm.html").display().to_string();
        config.logging.access_log = false;

        let state = Arc::new(AppState::open(config).await.unwrap());
        let listener = server::create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Arc::new(Notify::new());
        let handle = tokio::spawn(server::start_server_loop(
            listener,
            state,
            Arc::clone(&shutdown),
        ));

        Self {
            addr,
            dir,
            shutdown,
            handle,
            client: Client::builder(TokioExecutor::new()).build_http(),
        }
    }

    fn cache_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("cache")
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder()
            .method(method)
            .uri(format!("http://{}{path}", self.addr));
        if let Some(ct) = content_type {
            builder = builder.header("Content-Type", ct);
        }
        let req = builder
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap();

        let resp = self.client.request(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn stop(self) {
        self.shutdown.notify_one();
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_note_lifecycle_over_tcp() {
    let server = TestServer::start().await;

    let (status, body) = server
        .send(
            Method::POST,
            "/write",
            Some("application/json"),
            r#"{"note_name":"a.txt","note":"hello"}"#,
        )
        .await;
    assert_eq!((status, body.as_str()), (StatusCode::CREATED, "Note created"));

    let (status, body) = server.send(Method::GET, "/notes/a.txt", None, "").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "hello"));

    let (status, body) = server
        .send(Method::PUT, "/notes/a.txt", Some("text/plain"), "world")
        .await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "Note updated"));

    let (status, body) = server.send(Method::GET, "/notes/a.txt", None, "").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "world"));

    let (status, body) = server.send(Method::DELETE, "/notes/a.txt", None, "").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "Note deleted"));

    let (status, body) = server.send(Method::GET, "/notes/a.txt", None, "").await;
    assert_eq!((status, body.as_str()), (StatusCode::NOT_FOUND, "Not Found"));

    server.stop().await;
}

#[tokio::test]
async fn test_listing_matches_cache_directory() {
    let server = TestServer::start().await;
    std::fs::write(server.cache_dir().join("first"), "one").unwrap();
    std::fs::write(server.cache_dir().join("second"), "two\nlines").unwrap();

    let (status, body) = server.send(Method::GET, "/notes", None, "").await;
    assert_eq!(status, StatusCode::OK);

    let mut notes: Vec<Note> = serde_json::from_str(&body).unwrap();
    notes.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(
        notes,
        vec![
            Note { name: "first".into(), text: "one".into() },
            Note { name: "second".into(), text: "two\nlines".into() },
        ]
    );

    server.stop().await;
}

#[tokio::test]
async fn test_rejected_writes_leave_no_trace() {
    let server = TestServer::start().await;

    let (status, body) = server
        .send(Method::POST, "/write", Some("application/json"), r#"{"note":"orphan"}"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Bad Request: Missing note name or content");

    let (status, _) = server
        .send(Method::PUT, "/notes/never-created", Some("text/plain"), "text")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server.send(Method::DELETE, "/notes/never-created", None, "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(std::fs::read_dir(server.cache_dir()).unwrap().count(), 0);

    server.stop().await;
}

#[tokio::test]
async fn test_docs_are_served() {
    let server = TestServer::start().await;

    let (status, body) = server.send(Method::GET, "/docs/", None, "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("swagger-ui"));

    let (status, body) = server
        .send(Method::GET, "/docs/swagger-initializer.js", None, "")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/docs/openapi.json"));

    let (status, body) = server.send(Method::GET, "/docs/openapi.json", None, "").await;
    assert_eq!(status, StatusCode::OK);
    let doc: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(doc["info"]["title"], "Notes API");

    server.stop().await;
}
