//! handler::http
//!
//! AI handler backed by an orchestration service over HTTP.
//!
//! # Design
//!
//! Each handler operation is a single JSON `POST` to the service:
//!
//! | operation            | endpoint                  |
//! |----------------------|---------------------------|
//! | `add`                | `{base}/add`              |
//! | `prompt`             | `{base}/prompt`           |
//! | `modify_ai_response` | `{base}/enhance-response` |
//!
//! The service does the heavy lifting (prompt construction, model calls,
//! README merging). This adapter resolves the project path, forwards the
//! options, relays progress messages to the output sink and maps HTTP
//! failures onto [`AiError`].
//!
//! There is no retry: a failed request is reported to the caller as-is.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{AiError, AiHandler, PromptRequest};
use crate::ui::OutputSink;

/// User-Agent header value for service requests.
const USER_AGENT_VALUE: &str = "devai-cli";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP-backed AI handler.
#[derive(Debug, Clone)]
pub struct HttpAiHandler {
    client: Client,
    /// Service base URL without trailing slash
    base_url: String,
    /// Directory used when no `--path` is given
    working_dir: PathBuf,
    /// Model name forwarded to the service
    model: Option<String>,
}

#[derive(Debug, Serialize)]
struct AddBody<'a> {
    description: &'a str,
    path: &'a Path,
    preview: bool,
    rewrite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct PromptBody<'a> {
    description: &'a str,
    path: &'a Path,
    rewrite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct EnhanceBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<&'a Path>,
    path: &'a Path,
}

#[derive(Debug, Deserialize)]
struct AddResponse {
    #[serde(default)]
    messages: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptResponse {
    system_prompt: String,
    user_prompt: String,
    #[serde(default)]
    messages: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EnhanceResponse {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorResponse {
    message: String,
}

impl HttpAiHandler {
    /// Create a handler for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `AiError::NotConfigured` if the URL is not http(s) or the
    /// HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        working_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Result<Self, AiError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AiError::NotConfigured(format!(
                "endpoint '{}' must start with http:// or https://",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers())
            .build()
            .map_err(|e| AiError::NotConfigured(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            working_dir: working_dir.into(),
            model: None,
        })
    }

    /// Forward `model` with every request.
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    /// Service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve the project directory for a request.
    ///
    /// Relative paths are taken relative to the working directory. Either
    /// way the result must be an existing directory.
    fn resolve_path(&self, path: Option<&Path>) -> Result<PathBuf, AiError> {
        let resolved = match path {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => self.working_dir.join(p),
            None => self.working_dir.clone(),
        };

        if !resolved.is_dir() {
            return Err(AiError::InvalidPath(format!(
                "'{}' is not a directory",
                resolved.display()
            )));
        }
        Ok(resolved)
    }

    fn url(&self, operation: &str) -> String {
        format!("{}/{}", self.base_url, operation)
    }

    /// POST a JSON body and decode the JSON answer.
    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        operation: &str,
        body: &B,
    ) -> Result<T, AiError> {
        let url = self.url(operation);
        debug!(%url, "sending AI service request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        handle_response(response).await
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers
}

/// Map a service response onto a decoded body or an `AiError`.
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, AiError> {
    let status = response.status();
    debug!(status = status.as_u16(), "AI service responded");

    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| AiError::InvalidResponse(e.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ServiceErrorResponse>(&body) {
        Ok(err) => err.message,
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body.trim().to_string(),
    };

    Err(AiError::ApiError {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl AiHandler for HttpAiHandler {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn add(
        &self,
        description: &str,
        path: Option<&Path>,
        preview: bool,
        rewrite: bool,
        sink: &dyn OutputSink,
    ) -> Result<(), AiError> {
        let project = self.resolve_path(path)?;
        let body = AddBody {
            description,
            path: &project,
            preview,
            rewrite,
            model: self.model.as_deref(),
        };

        let response: AddResponse = self.post("add", &body).await?;
        for message in &response.messages {
            sink.print(message);
        }
        Ok(())
    }

    async fn prompt(
        &self,
        description: &str,
        path: Option<&Path>,
        rewrite: bool,
        sink: &dyn OutputSink,
    ) -> Result<PromptRequest, AiError> {
        let project = self.resolve_path(path)?;
        let body = PromptBody {
            description,
            path: &project,
            rewrite,
            model: self.model.as_deref(),
        };

        let response: PromptResponse = self.post("prompt", &body).await?;
        for message in &response.messages {
            sink.print(message);
        }
        Ok(PromptRequest {
            system_prompt: response.system_prompt,
            user_prompt: response.user_prompt,
        })
    }

    async fn modify_ai_response(
        &self,
        file: Option<&Path>,
        path: Option<&Path>,
    ) -> Result<String, AiError> {
        let project = self.resolve_path(path)?;
        let body = EnhanceBody {
            file,
            path: &project,
        };

        let response: EnhanceResponse = self.post("enhance-response", &body).await?;
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::BufferSink;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn handler(server: &MockServer, dir: &TempDir) -> HttpAiHandler {
        HttpAiHandler::new(format!("{}/api/ai/", server.uri()), dir.path(), DEFAULT_TIMEOUT)
            .unwrap()
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = HttpAiHandler::new("ftp://example.com", "/", DEFAULT_TIMEOUT).unwrap_err();
        assert!(matches!(err, AiError::NotConfigured(_)));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let handler = HttpAiHandler::new("http://localhost:8080/ai/", "/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(handler.base_url(), "http://localhost:8080/ai");
        assert_eq!(handler.url("add"), "http://localhost:8080/ai/add");
    }

    #[tokio::test]
    async fn add_posts_options_and_relays_messages() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        Mock::given(method("POST"))
            .and(path("/api/ai/add"))
            .and(header("user-agent", USER_AGENT_VALUE))
            .and(body_json(json!({
                "description": "JPA",
                "path": dir.path(),
                "preview": true,
                "rewrite": false,
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "messages": ["Wrote README-ai-jpa.md"] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let sink = BufferSink::new();
        handler(&server, &dir)
            .add("JPA", None, true, false, &sink)
            .await
            .unwrap();

        assert_eq!(sink.lines(), vec!["Wrote README-ai-jpa.md"]);
    }

    #[tokio::test]
    async fn prompt_forwards_model_and_decodes_prompt() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        Mock::given(method("POST"))
            .and(path("/api/ai/prompt"))
            .and(body_json(json!({
                "description": "JPA",
                "path": dir.path(),
                "rewrite": true,
                "model": "gpt-4",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "systemPrompt": "You are a Spring expert",
                "userPrompt": "Add JPA",
            })))
            .mount(&server)
            .await;

        let prompt = handler(&server, &dir)
            .with_model(Some("gpt-4".into()))
            .prompt("JPA", Some(dir.path()), true, &BufferSink::new())
            .await
            .unwrap();

        assert_eq!(
            prompt,
            PromptRequest::new("You are a Spring expert", "Add JPA")
        );
    }

    #[tokio::test]
    async fn enhance_response_returns_content() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        Mock::given(method("POST"))
            .and(path("/api/ai/enhance-response"))
            .and(body_json(json!({ "file": "README-ai-jpa.md", "path": dir.path() })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "content": "# JPA\nenhanced" })),
            )
            .mount(&server)
            .await;

        let text = handler(&server, &dir)
            .modify_ai_response(Some(Path::new("README-ai-jpa.md")), None)
            .await
            .unwrap();

        assert_eq!(text, "# JPA\nenhanced");
    }

    #[tokio::test]
    async fn relative_path_is_resolved_against_working_dir() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("service")).unwrap();

        Mock::given(method("POST"))
            .and(path("/api/ai/enhance-response"))
            .and(body_json(json!({ "path": dir.path().join("service") })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": "ok" })))
            .expect(1)
            .mount(&server)
            .await;

        let text = handler(&server, &dir)
            .modify_ai_response(None, Some(Path::new("service")))
            .await
            .unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn missing_project_dir_is_invalid_path() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        let err = handler(&server, &dir)
            .add("JPA", Some(Path::new("does-not-exist")), false, false, &BufferSink::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::InvalidPath(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_working_dir_is_invalid_path() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        let handler = HttpAiHandler::new(
            format!("{}/api/ai", server.uri()),
            dir.path().join("gone"),
            DEFAULT_TIMEOUT,
        )
        .unwrap();

        let err = handler.modify_ai_response(None, None).await.unwrap_err();

        assert!(matches!(err, AiError::InvalidPath(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn error_status_uses_service_message() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(502).set_body_json(json!({ "message": "model unavailable" })),
            )
            .mount(&server)
            .await;

        let err = handler(&server, &dir)
            .prompt("JPA", None, false, &BufferSink::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AiError::ApiError {
                status: 502,
                message: "model unavailable".into()
            }
        );
    }

    #[tokio::test]
    async fn error_status_falls_back_to_raw_body() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad description"))
            .mount(&server)
            .await;

        let err = handler(&server, &dir)
            .add("JPA", None, false, false, &BufferSink::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AiError::ApiError {
                status: 400,
                message: "bad description".into()
            }
        );
    }

    #[tokio::test]
    async fn undecodable_success_body_is_invalid_response() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = handler(&server, &dir)
            .modify_ai_response(None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_service_is_network_error() {
        let dir = TempDir::new().unwrap();
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let handler = HttpAiHandler::new("http://127.0.0.1:9", dir.path(), DEFAULT_TIMEOUT).unwrap();

        let err = handler.modify_ai_response(None, None).await.unwrap_err();
        assert!(matches!(err, AiError::NetworkError(_)));
    }
}
