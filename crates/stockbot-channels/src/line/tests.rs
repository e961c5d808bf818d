use super::types::{ReplyRequest, TextMessage};
use super::webhook::{parse_events, sign, verify_signature};
use super::*;

const SECRET: &str = "test-channel-secret";

fn channel() -> LineChannel {
    LineChannel::new(LineConfig {
        enabled: true,
        channel_secret: SECRET.to_string(),
        access_token: "token".to_string(),
        ..Default::default()
    })
}

fn text_event(text: &str) -> String {
    serde_json::json!({
        "destination": "Uxxxxxxxx",
        "events": [{
            "type": "message",
            "replyToken": "r-token-1",
            "timestamp": 1_700_000_000_000_i64,
            "source": {"type": "user", "userId": "U123"},
            "message": {"type": "text", "id": "1", "text": text}
        }]
    })
    .to_string()
}

#[test]
fn test_signature_accepts_own_signature() {
    let body = text_event("fs01");
    let sig = sign(SECRET, body.as_bytes()).unwrap();
    assert!(verify_signature(SECRET, body.as_bytes(), &sig));
}

#[test]
fn test_signature_rejects_tampering() {
    let body = text_event("fs01");
    let sig = sign(SECRET, body.as_bytes()).unwrap();
    let tampered = text_event("fs02");
    assert!(!verify_signature(SECRET, tampered.as_bytes(), &sig));
    assert!(!verify_signature("other-secret", body.as_bytes(), &sig));
}

#[test]
fn test_signature_rejects_garbage() {
    let body = b"{}";
    assert!(!verify_signature(SECRET, body, "not base64!!"));
    assert!(!verify_signature(SECRET, body, ""));
    let sig = sign(SECRET, body).unwrap();
    assert!(!verify_signature("", body, &sig));
}

#[test]
fn test_parse_text_event() {
    let events = parse_events(text_event("fs01").as_bytes()).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].channel, "line");
    assert_eq!(events[0].sender_id, "U123");
    assert_eq!(events[0].text, "fs01");
    assert_eq!(events[0].reply_target.as_deref(), Some("r-token-1"));
}

#[test]
fn test_parse_skips_non_text_events() {
    let body = serde_json::json!({
        "events": [
            {"type": "follow", "replyToken": "a", "source": {"type": "user", "userId": "U1"}},
            {"type": "message", "replyToken": "b", "source": {"type": "user", "userId": "U1"},
             "message": {"type": "sticker", "id": "2", "packageId": "1", "stickerId": "1"}},
            {"type": "message", "replyToken": "c", "source": {"type": "group", "groupId": "G9"},
             "message": {"type": "text", "id": "3", "text": "list"}}
        ]
    })
    .to_string();
    let events = parse_events(body.as_bytes()).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].sender_id, "G9");
    assert_eq!(events[0].text, "list");
}

#[test]
fn test_parse_empty_and_malformed() {
    assert!(parse_events(br#"{"destination": "U1", "events": []}"#)
        .unwrap()
        .is_empty());
    assert!(matches!(
        parse_events(b"not json"),
        Err(BotError::Serialization(_))
    ));
}

#[test]
fn test_reply_request_shape() {
    let request = ReplyRequest {
        reply_token: "r",
        messages: vec![TextMessage {
            message_type: "text",
            text: "hello",
        }],
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        serde_json::json!({"replyToken": "r", "messages": [{"type": "text", "text": "hello"}]})
    );
}

#[tokio::test]
async fn test_ingest_before_start_fails() {
    let err = channel()
        .ingest(text_event("fs01").as_bytes())
        .await
        .unwrap_err();
    assert!(matches!(err, BotError::Channel(_)));
}

#[tokio::test]
async fn test_ingest_forwards_messages() {
    let channel = channel();
    let mut rx = channel.start().await.unwrap();

    let count = channel.ingest(text_event("rbf").as_bytes()).await.unwrap();
    assert_eq!(count, 1);
    let msg = rx.recv().await.unwrap();
    assert_eq!(msg.text, "rbf");
    assert_eq!(msg.reply_target.as_deref(), Some("r-token-1"));
}

#[tokio::test]
async fn test_start_requires_secret() {
    let channel = LineChannel::new(LineConfig::default());
    assert!(matches!(channel.start().await, Err(BotError::Config(_))));
}

#[tokio::test]
async fn test_send_requires_reply_token() {
    let err = channel()
        .send(OutgoingMessage {
            text: "hi".to_string(),
            reply_target: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BotError::Channel(_)));
}
