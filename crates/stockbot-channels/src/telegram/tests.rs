//! Tests for the Telegram channel module.

use super::polling::to_incoming;
use super::types::*;
use super::TelegramChannel;
use stockbot_core::config::TelegramConfig;

fn message(json: &str) -> TgMessage {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_base_url_uses_configured_api() {
    let channel = TelegramChannel::new(TelegramConfig {
        bot_token: "123:abc".to_string(),
        api_base: "http://localhost:8081/".to_string(),
        ..Default::default()
    });
    assert_eq!(channel.base_url, "http://localhost:8081/bot123:abc");
}

#[test]
fn test_text_message_becomes_incoming() {
    let msg = message(
        r#"{
            "message_id": 1,
            "from": {"id": 42, "first_name": "Lan", "username": "lan_kho"},
            "chat": {"id": -100123, "type": "group"},
            "text": "fs01"
        }"#,
    );
    let incoming = to_incoming(msg, &[]).unwrap();
    assert_eq!(incoming.channel, "telegram");
    assert_eq!(incoming.sender_id, "42");
    assert_eq!(incoming.sender_name.as_deref(), Some("@lan_kho"));
    assert_eq!(incoming.text, "fs01");
    assert_eq!(incoming.reply_target.as_deref(), Some("-100123"));
}

#[test]
fn test_sender_name_without_username() {
    let msg = message(
        r#"{
            "message_id": 2,
            "from": {"id": 7, "first_name": "Minh", "last_name": "Tran"},
            "chat": {"id": 7, "type": "private"},
            "text": "help"
        }"#,
    );
    let incoming = to_incoming(msg, &[]).unwrap();
    assert_eq!(incoming.sender_name.as_deref(), Some("Minh Tran"));
}

#[test]
fn test_non_text_message_skipped() {
    let msg = message(
        r#"{
            "message_id": 3,
            "from": {"id": 7, "first_name": "Minh"},
            "chat": {"id": 7, "type": "private"},
            "photo": [{"file_id": "x", "width": 90, "height": 90}]
        }"#,
    );
    assert!(to_incoming(msg, &[]).is_none());
}

#[test]
fn test_allowed_users_filter() {
    let json = r#"{
        "message_id": 4,
        "from": {"id": 7, "first_name": "Minh"},
        "chat": {"id": 7, "type": "private"},
        "text": "list"
    }"#;
    assert!(to_incoming(message(json), &[1, 2]).is_none());
    assert!(to_incoming(message(json), &[7]).is_some());
}

#[test]
fn test_updates_response_parses() {
    let json = r#"{
        "ok": true,
        "result": [
            {"update_id": 10, "message": {"message_id": 1, "chat": {"id": 5}, "text": "hi"}},
            {"update_id": 11, "edited_message": {"message_id": 1, "chat": {"id": 5}}}
        ]
    }"#;
    let resp: TgResponse<Vec<TgUpdate>> = serde_json::from_str(json).unwrap();
    assert!(resp.ok);
    let updates = resp.result.unwrap();
    assert_eq!(updates.len(), 2);
    assert!(updates[0].message.is_some());
    assert!(updates[1].message.is_none());
}
