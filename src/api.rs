//! HTTP server: liveness, health, the LINE webhook, and a query endpoint.
//!
//! Spawned as a background task in the gateway.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use stockbot_channels::line::LineChannel;
use stockbot_core::config::ApiConfig;
use stockbot_core::error::BotError;
use stockbot_core::traits::Channel;
use stockbot_search::Responder;
use tracing::{debug, error, info, warn};

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    channels: HashMap<String, Arc<dyn Channel>>,
    responder: Arc<Responder>,
    api_key: Option<String>,
    uptime: Instant,
}

/// `POST /api/query` request body.
#[derive(Debug, Deserialize)]
struct QueryRequest {
    text: String,
}

/// Constant-time string comparison to prevent timing attacks on API token validation.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Check bearer token auth. Returns `None` if authorized, `Some(response)` if rejected.
fn check_auth(headers: &HeaderMap, api_key: &Option<String>) -> Option<(StatusCode, Json<Value>)> {
    let key = match api_key {
        Some(k) => k,
        None => return None, // No auth configured: allow all.
    };

    let header = match headers.get("authorization") {
        Some(h) => h,
        None => {
            return Some((
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "missing Authorization header"})),
            ));
        }
    };

    let value = match header.to_str() {
        Ok(v) => v,
        Err(_) => {
            return Some((
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "invalid Authorization header"})),
            ));
        }
    };

    match value.strip_prefix("Bearer ") {
        Some(token) if constant_time_eq(token, key) => None,
        _ => Some((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid token"})),
        )),
    }
}

/// Downcast the LINE channel from shared state.
fn get_line(state: &ApiState) -> Option<&LineChannel> {
    state
        .channels
        .get("line")
        .and_then(|ch| ch.as_any().downcast_ref::<LineChannel>())
}

/// `GET /`: plain liveness text.
async fn home() -> &'static str {
    "📦 Stockbot is running!"
}

/// `GET /api/health`: uptime, data source, and channels.
async fn health(
    headers: HeaderMap,
    State(state): State<ApiState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if let Some(err) = check_auth(&headers, &state.api_key) {
        return Err(err);
    }

    let mut channels: Vec<&str> = state.channels.keys().map(String::as_str).collect();
    channels.sort_unstable();

    Ok(Json(json!({
        "status": "ok",
        "uptime_secs": state.uptime.elapsed().as_secs(),
        "source": state.responder.source().describe(),
        "channels": channels,
    })))
}

/// `POST /webhook`: LINE Messaging API webhook.
///
/// The signature is checked against the raw body before anything is parsed.
async fn line_webhook(
    headers: HeaderMap,
    State(state): State<ApiState>,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let Some(line) = get_line(&state) else {
        return (StatusCode::NOT_FOUND, "LINE channel not configured");
    };

    let Some(signature) = headers
        .get("x-line-signature")
        .and_then(|v| v.to_str().ok())
    else {
        warn!("line webhook: missing X-Line-Signature");
        return (StatusCode::BAD_REQUEST, "missing signature");
    };

    if !line.verify_signature(&body, signature) {
        warn!("line webhook: invalid signature");
        return (StatusCode::BAD_REQUEST, "invalid signature");
    }

    match line.ingest(&body).await {
        Ok(count) => {
            debug!("line webhook: forwarded {count} message(s)");
            (StatusCode::OK, "OK")
        }
        Err(BotError::Serialization(e)) => {
            warn!("line webhook: malformed body: {e}");
            (StatusCode::BAD_REQUEST, "malformed body")
        }
        Err(e) => {
            error!("line webhook: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

/// `POST /api/query`: run one query through the reply pipeline.
async fn query(
    headers: HeaderMap,
    State(state): State<ApiState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if let Some(err) = check_auth(&headers, &state.api_key) {
        return Err(err);
    }

    let reply = state.responder.reply(&req.text).await;
    Ok(Json(json!({ "reply": reply })))
}

/// Build the axum router with shared state.
fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/health", get(health))
        .route("/webhook", post(line_webhook))
        .route("/api/query", post(query))
        .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024)) // 1 MB max request body
        .with_state(state)
}

/// Start the API server. Called from `Gateway::run()`.
pub async fn serve(
    config: ApiConfig,
    channels: HashMap<String, Arc<dyn Channel>>,
    responder: Arc<Responder>,
    uptime: Instant,
) {
    let api_key = if config.api_key.is_empty() {
        None
    } else {
        Some(config.api_key.clone())
    };

    let state = ApiState {
        channels,
        responder,
        api_key,
        uptime,
    };

    let app = build_router(state);
    let addr = format!("{}:{}", config.host, config.port);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("API server failed to bind to {addr}: {e}");
            return;
        }
    };

    info!("API server listening on {addr}");

    if let Err(e) = axum::serve(listener, app).await {
        error!("API server error: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use stockbot_channels::line::webhook::sign;
    use stockbot_core::config::{Config, LineConfig};
    use stockbot_core::message::IncomingMessage;
    use stockbot_core::record::{Field, Record};
    use stockbot_core::traits::DataSource;
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    const SECRET: &str = "line-secret";

    struct MemorySource(Vec<Record>);

    #[async_trait]
    impl DataSource for MemorySource {
        fn describe(&self) -> String {
            "memory".to_string()
        }

        async fn load(&self) -> Result<Vec<Record>, BotError> {
            Ok(self.0.clone())
        }
    }

    fn responder() -> Arc<Responder> {
        let source = Arc::new(MemorySource(vec![Record::new()
            .with(Field::Code, "FS01")
            .with(Field::Name, "Flour Standard")
            .with(Field::Quantity, 12.5)]));
        Arc::new(Responder::new(&Config::default(), source))
    }

    /// Build a test router with no channels.
    fn test_router(api_key: Option<String>) -> Router {
        build_router(ApiState {
            channels: HashMap::new(),
            responder: responder(),
            api_key,
            uptime: Instant::now(),
        })
    }

    /// Build a router with a started LINE channel; returns its message receiver.
    async fn line_router() -> (Router, mpsc::Receiver<IncomingMessage>) {
        let line = Arc::new(LineChannel::new(LineConfig {
            enabled: true,
            channel_secret: SECRET.to_string(),
            access_token: "token".to_string(),
            ..Default::default()
        }));
        let rx = line.start().await.unwrap();
        let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();
        channels.insert("line".to_string(), line);
        let router = build_router(ApiState {
            channels,
            responder: responder(),
            api_key: None,
            uptime: Instant::now(),
        });
        (router, rx)
    }

    fn line_body(text: &str) -> String {
        json!({
            "destination": "U0",
            "events": [{
                "type": "message",
                "replyToken": "reply-1",
                "source": {"type": "user", "userId": "U42"},
                "message": {"type": "text", "id": "1", "text": text}
            }]
        })
        .to_string()
    }

    fn webhook_request(body: &str, signature: Option<&str>) -> Request<Body> {
        let mut req = Request::post("/webhook").header("Content-Type", "application/json");
        if let Some(sig) = signature {
            req = req.header("X-Line-Signature", sig);
        }
        req.body(Body::from(body.to_string())).unwrap()
    }

    fn query_request(body: &str, token: Option<&str>) -> Request<Body> {
        let mut req = Request::post("/api/query").header("Content-Type", "application/json");
        if let Some(t) = token {
            req = req.header("Authorization", format!("Bearer {t}"));
        }
        req.body(Body::from(body.to_string())).unwrap()
    }

    /// Parse response body as JSON.
    async fn body_json(resp: axum::http::Response<Body>) -> Value {
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("secret", "secret"));
        assert!(!constant_time_eq("secret", "secreT"));
        assert!(!constant_time_eq("secret", "secret2"));
    }

    #[tokio::test]
    async fn test_home() {
        let resp = test_router(None)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], "📦 Stockbot is running!".as_bytes());
    }

    #[tokio::test]
    async fn test_health_no_auth() {
        let resp = test_router(None)
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["source"], "memory");
        assert_eq!(json["channels"], json!([]));
    }

    #[tokio::test]
    async fn test_health_bad_auth() {
        let req = Request::get("/api/health")
            .header("Authorization", "Bearer wrong")
            .body(Body::empty())
            .unwrap();
        let resp = test_router(Some("secret".to_string()))
            .oneshot(req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_query_returns_reply() {
        let resp = test_router(None)
            .oneshot(query_request(r#"{"text": "fs01"}"#, None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        let reply = json["reply"].as_str().unwrap();
        assert!(reply.contains("Flour Standard"));
        assert!(reply.contains("12.50"));
    }

    #[tokio::test]
    async fn test_query_requires_auth_when_configured() {
        let app = test_router(Some("secret".to_string()));
        let resp = app
            .clone()
            .oneshot(query_request(r#"{"text": "fs01"}"#, None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = app
            .oneshot(query_request(r#"{"text": "fs01"}"#, Some("secret")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_query_rejects_malformed_json() {
        let resp = test_router(None)
            .oneshot(query_request("not json", None))
            .await
            .unwrap();
        assert!(resp.status().is_client_error());
    }

    #[tokio::test]
    async fn test_webhook_without_line_channel() {
        let resp = test_router(None)
            .oneshot(webhook_request(&line_body("fs01"), Some("x")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_webhook_missing_signature_returns_400() {
        let (app, _rx) = line_router().await;
        let resp = app
            .oneshot(webhook_request(&line_body("fs01"), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_webhook_bad_signature_returns_400() {
        let (app, mut rx) = line_router().await;
        let body = line_body("fs01");
        let wrong = sign("other-secret", body.as_bytes()).unwrap();
        let resp = app
            .oneshot(webhook_request(&body, Some(&wrong)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_webhook_valid_signature_forwards_message() {
        let (app, mut rx) = line_router().await;
        let body = line_body("fs01");
        let sig = sign(SECRET, body.as_bytes()).unwrap();
        let resp = app
            .oneshot(webhook_request(&body, Some(&sig)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.channel, "line");
        assert_eq!(msg.sender_id, "U42");
        assert_eq!(msg.text, "fs01");
        assert_eq!(msg.reply_target.as_deref(), Some("reply-1"));
    }

    #[tokio::test]
    async fn test_webhook_signed_malformed_body_returns_400() {
        let (app, _rx) = line_router().await;
        let body = "{not json";
        let sig = sign(SECRET, body.as_bytes()).unwrap();
        let resp = app.oneshot(webhook_request(body, Some(&sig))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
