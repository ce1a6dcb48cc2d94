//! Shared helpers: a scripted `GenerativeModel` and an in-process server.

#![allow(dead_code)]

use async_trait::async_trait;
use kalaconnect::infra::genai::{
    GenAiError, GenerateRequest, GenerateResponse, GenerativeModel, Part, ResponseFormat,
};
use kalaconnect::{transport, ActionService, JsonStore};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const TINY_PNG: &str = "data:image/png;base64,aGVsbG8=";
pub const ROOM_JPG: &str = "data:image/jpeg;base64,/9j/4AAQ";

type Reply = dyn Fn(&GenerateRequest) -> Result<GenerateResponse, GenAiError> + Send + Sync;

/// Records every request and answers with a scripted reply.
pub struct StubModel {
    requests: Mutex<Vec<GenerateRequest>>,
    reply: Box<Reply>,
}

impl StubModel {
    /// Answers like a well-behaved provider for every response format.
    pub fn happy() -> Self {
        Self::with_reply(|req| {
            let part = match req.format {
                ResponseFormat::Text => Part::text(format!("stub reply for {}", req.flow)),
                ResponseFormat::Json => Part::text(
                    "```json\n{\"socialMediaPost\": \"Stub post #handmade\", \"emailCampaign\": \"Dear patron, ...\"}\n```",
                ),
                ResponseFormat::Image => Part::media("data:image/png;base64,Y29tcG9zZWQ="),
            };
            Ok(GenerateResponse { parts: vec![part] })
        })
    }

    /// Fails every call the way an unreachable provider would.
    pub fn failing() -> Self {
        Self::with_reply(|_| Err(GenAiError::Transport("connection refused".to_string())))
    }

    pub fn with_reply(
        reply: impl Fn(&GenerateRequest) -> Result<GenerateResponse, GenAiError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            reply: Box::new(reply),
        }
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for StubModel {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GenAiError> {
        let reply = (self.reply)(&request);
        self.requests.lock().unwrap().push(request);
        reply
    }
}

/// A running server on an ephemeral port with its own data file.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub model: Arc<StubModel>,
    pub db_path: PathBuf,
    _dir: TempDir,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn start(model: StubModel) -> anyhow::Result<Self> {
        kalaconnect::infra::telemetry::init();

        let dir = tempfile::tempdir()?;
        let db_path = dir.path().join("db.json");
        let model = Arc::new(model);

        let app_state = transport::http::AppState {
            actions: Arc::new(ActionService::new(JsonStore::new(&db_path), model.clone())),
        };
        let router = transport::http::create_router(app_state);

        // Bind to an ephemeral port to avoid conflicts between tests.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            model,
            db_path,
            _dir: dir,
            handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> anyhow::Result<(u16, serde_json::Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        Ok((res.status().as_u16(), res.json().await?))
    }

    pub async fn post(&self, path: &str, body: serde_json::Value) -> anyhow::Result<(u16, serde_json::Value)> {
        let res = self.client.post(self.url(path)).json(&body).send().await?;
        Ok((res.status().as_u16(), res.json().await?))
    }

    pub async fn login(&self, role: &str) -> anyhow::Result<String> {
        let (status, body) = self
            .post("/api/session/login", serde_json::json!({ "role": role }))
            .await?;
        assert_eq!(status, 200, "login failed: {}", body);
        Ok(body["data"]["token"].as_str().unwrap_or_default().to_string())
    }

    pub async fn with_session(
        &self,
        method: reqwest::Method,
        path: &str,
        token: &str,
        body: Option<serde_json::Value>,
    ) -> anyhow::Result<(u16, serde_json::Value)> {
        let mut req = self
            .client
            .request(method, self.url(path))
            .header("x-session-id", token);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let res = req.send().await?;
        Ok((res.status().as_u16(), res.json().await?))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
