// Xyna Engine — OpenRouter Provider
// OpenAI-compatible chat completions. One non-streaming POST per request,
// wrapped in the shared retry loop and a per-provider circuit breaker.

use crate::atoms::error::EngineResult;
use crate::atoms::traits::{ChatProvider, ProviderError};
use crate::atoms::types::ChatRequest;
use crate::engine::config::OpenRouterConfig;
use crate::engine::http::{
    build_client, is_retryable_status, parse_retry_after, retry_delay, CircuitBreaker, MAX_RETRIES,
};
use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::Client;
use serde_json::Value;

pub struct OpenRouterProvider {
    client: Client,
    base_url: String,
    api_key: String,
    referer: String,
    circuit: CircuitBreaker,
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

impl OpenRouterProvider {
    pub fn new(config: &OpenRouterConfig) -> EngineResult<Self> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            referer: config.referer.clone(),
            circuit: CircuitBreaker::default(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// `choices[0].message.content` of a completion body.
    pub fn extract_content(body: &Value) -> Result<String, ProviderError> {
        body["choices"]
            .get(0)
            .and_then(|choice| choice["message"]["content"].as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ProviderError::Parse(format!(
                    "missing choices[0].message.content in {}",
                    truncate(&body.to_string(), 200)
                ))
            })
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::Auth("no OpenRouter API key configured".into()));
        }
        self.circuit.check()?;

        let url = self.endpoint();
        info!("[provider] OpenRouter request model={} messages={}", request.model, request.messages.len());

        let mut last_error = String::new();
        let mut last_status: u16 = 0;
        let mut retry_after: Option<u64> = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay = retry_delay(attempt - 1, retry_after.take()).await;
                warn!("[provider] Retry {}/{} after {}ms", attempt, MAX_RETRIES, delay.as_millis());
            }

            let sent = self
                .client
                .post(&url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .header("HTTP-Referer", &self.referer)
                .json(request)
                .send()
                .await;

            let response = match sent {
                Ok(r) => r,
                Err(e) => {
                    self.circuit.record_failure();
                    last_error = format!("HTTP request failed: {}", e);
                    last_status = 0;
                    if attempt < MAX_RETRIES {
                        continue;
                    }
                    return Err(ProviderError::Transport(last_error));
                }
            };

            let status = response.status().as_u16();
            if !response.status().is_success() {
                last_status = status;
                retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_retry_after);
                let body_text = response.text().await.unwrap_or_default();
                last_error = format!("API error {}: {}", status, truncate(&body_text, 200));
                error!("[provider] OpenRouter error {}: {}", status, truncate(&body_text, 500));
                self.circuit.record_failure();

                if status == 401 || status == 403 {
                    return Err(ProviderError::Auth(last_error));
                }
                if is_retryable_status(status) && attempt < MAX_RETRIES {
                    continue;
                }
                return if status == 429 {
                    Err(ProviderError::RateLimited { message: last_error, retry_after_secs: retry_after })
                } else {
                    Err(ProviderError::Api { status, message: last_error })
                };
            }

            let body: Value = response
                .json()
                .await
                .map_err(|e| ProviderError::Parse(format!("invalid completion body: {}", e)))?;
            self.circuit.record_success();
            return Self::extract_content(&body);
        }

        match last_status {
            0 => Err(ProviderError::Transport(last_error)),
            429 => Err(ProviderError::RateLimited { message: last_error, retry_after_secs: retry_after }),
            s => Err(ProviderError::Api { status: s, message: last_error }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::types::{Message, Role};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve canned responses in order on a local port; returns the base URL
    /// and a handle yielding every raw request received.
    async fn serve(responses: Vec<(u16, String)>) -> (String, tokio::task::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let mut seen = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                seen.push(read_request(&mut socket).await);
                let reply = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
            seen
        });
        (format!("http://{}", addr), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&data);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                if data.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    fn config(base_url: String) -> OpenRouterConfig {
        OpenRouterConfig { api_key: "sk-test".into(), base_url, ..OpenRouterConfig::default() }
    }

    fn request() -> ChatRequest {
        ChatRequest {
            model: "openai/gpt-4o-mini".into(),
            messages: vec![Message::text(Role::User, "hello")],
            temperature: 0.7,
            max_tokens: 1000,
        }
    }

    #[test]
    fn extracts_first_choice() {
        let body = serde_json::json!({"choices": [{"message": {"content": "hi there"}}]});
        assert_eq!(OpenRouterProvider::extract_content(&body).unwrap(), "hi there");
        let empty = serde_json::json!({"choices": []});
        assert!(matches!(OpenRouterProvider::extract_content(&empty), Err(ProviderError::Parse(_))));
    }

    #[tokio::test]
    async fn posts_openai_body_with_headers() {
        let (url, handle) = serve(vec![(200, r#"{"choices":[{"message":{"content":"Hello!"}}]}"#.into())]).await;
        let provider = OpenRouterProvider::new(&config(url)).unwrap();
        assert_eq!(provider.complete(&request()).await.unwrap(), "Hello!");

        let raw = handle.await.unwrap().remove(0);
        let lower = raw.to_lowercase();
        assert!(raw.starts_with("POST /chat/completions"));
        assert!(lower.contains("authorization: bearer sk-test"));
        assert!(lower.contains("http-referer:"));
        assert!(raw.contains(r#""max_tokens":1000"#));
        assert!(raw.contains(r#""role":"user""#));
    }

    #[tokio::test]
    async fn auth_failure_is_not_retried() {
        let (url, handle) = serve(vec![(401, r#"{"error":"bad key"}"#.into())]).await;
        let provider = OpenRouterProvider::new(&config(url)).unwrap();
        let err = provider.complete(&request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Auth(_)));
        assert_eq!(handle.await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn client_error_is_api_error() {
        let (url, _handle) = serve(vec![(400, r#"{"error":"bad request"}"#.into())]).await;
        let provider = OpenRouterProvider::new(&config(url)).unwrap();
        match provider.complete(&request()).await {
            Err(ProviderError::Api { status, .. }) => assert_eq!(status, 400),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_key_fails_fast() {
        let provider = OpenRouterProvider::new(&OpenRouterConfig::default()).unwrap();
        assert!(matches!(provider.complete(&request()).await, Err(ProviderError::Auth(_))));
    }
}
