use async_trait::async_trait;
use tokio::time::{timeout, Duration};

use crate::{
    error::BotError,
    line::message::{ReplyMessage, ReplyRequest},
};

const REPLY_REQUEST_TIMEOUT_MS: u64 = 3000;
const REPLY_PATH: &str = "/v2/bot/message/reply";

/// Sends messages back to the chat that produced a reply token.
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn reply(&self, reply_token: &str, messages: &[ReplyMessage]) -> Result<(), BotError>;
}

pub struct LineClient {
    client: reqwest::Client,
    endpoint: String,
    channel_token: String,
}

impl LineClient {
    pub fn new(client: reqwest::Client, api_base: &str, channel_token: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: reply_endpoint(api_base),
            channel_token: channel_token.into(),
        }
    }
}

fn reply_endpoint(api_base: &str) -> String {
    format!("{}{REPLY_PATH}", api_base.trim_end_matches('/'))
}

#[async_trait]
impl ReplySender for LineClient {
    async fn reply(&self, reply_token: &str, messages: &[ReplyMessage]) -> Result<(), BotError> {
        let body = ReplyRequest {
            reply_token,
            messages,
        };
        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.channel_token)
            .json(&body)
            .send();

        let response = match timeout(Duration::from_millis(REPLY_REQUEST_TIMEOUT_MS), request).await
        {
            Ok(result) => result?,
            Err(_) => return Err(BotError::Upstream("reply request timed out".into())),
        };

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // LINE explains rejections (expired token, bad payload) in the body.
        let detail = response.text().await.unwrap_or_default();
        Err(BotError::Upstream(format!(
            "reply API returned {}: {detail}",
            status.as_u16()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    #[derive(Clone, Default)]
    struct Received(Arc<Mutex<Vec<(Option<String>, Value)>>>);

    async fn serve_reply_api(status: StatusCode, received: Received) -> String {
        let app = Router::new()
            .route(
                REPLY_PATH,
                post(
                    move |State(received): State<Received>,
                          headers: HeaderMap,
                          Json(body): Json<Value>| async move {
                        let authorization = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        received.0.lock().unwrap().push((authorization, body));
                        (status, Json(json!({"message": "Invalid reply token"})))
                    },
                ),
            )
            .with_state(received);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_reply_sends_bearer_token_and_reply_body() {
        let received = Received::default();
        let base = serve_reply_api(StatusCode::OK, received.clone()).await;
        let client = LineClient::new(reqwest::Client::new(), &base, "channel-token");

        client
            .reply("token-1", &[ReplyMessage::text("hello")])
            .await
            .unwrap();

        let received = received.0.lock().unwrap().clone();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].0.as_deref(), Some("Bearer channel-token"));
        assert_eq!(
            received[0].1,
            json!({
                "replyToken": "token-1",
                "messages": [{"type": "text", "text": "hello"}]
            })
        );
    }

    #[tokio::test]
    async fn test_reply_rejection_is_upstream_error_with_detail() {
        let received = Received::default();
        let base = serve_reply_api(StatusCode::BAD_REQUEST, received.clone()).await;
        let client = LineClient::new(reqwest::Client::new(), &base, "channel-token");

        let result = client
            .reply("expired-token", &[ReplyMessage::text("hello")])
            .await;

        match result {
            Err(BotError::Upstream(msg)) => {
                assert!(msg.starts_with("reply API returned 400"), "{msg}");
                assert!(msg.contains("Invalid reply token"), "{msg}");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }

        let received = received.0.lock().unwrap().clone();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].0.as_deref(), Some("Bearer channel-token"));
        assert_eq!(received[0].1["replyToken"], "expired-token");
    }

    #[test]
    fn test_reply_endpoint_joins_base_and_path() {
        assert_eq!(
            reply_endpoint("https://api.line.me"),
            "https://api.line.me/v2/bot/message/reply"
        );
        assert_eq!(
            reply_endpoint("http://localhost:8080/"),
            "http://localhost:8080/v2/bot/message/reply"
        );
    }
}
