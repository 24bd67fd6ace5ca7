//! Status sync integration tests
//!
//! Runs the status service against an in-process fake chat server.
//!
//! Run with: cargo test -p integration-tests --test status_sync_tests

use std::sync::Arc;
use std::time::Duration;

use integration_tests::{
    emoji_catalog, registration_snapshot, FakeChatServer, ScriptedResponse,
};
use reqwest::StatusCode;
use serde_json::json;
use status_core::{
    Emojiset, ReactionType, ServerEvent, ServerUpdateRequest, SetStatusTextRequest,
    TransportError, UserId, UserSettings, UserStatusEvent,
};
use status_service::{ServiceContext, ServiceContextBuilder, ServiceError, StatusService};
use tokio::sync::oneshot;

fn context_for(server: &FakeChatServer) -> ServiceContext {
    ServiceContextBuilder::new()
        .transport(Arc::new(server.transport().unwrap()))
        .emoji_lookup(Arc::new(emoji_catalog()))
        .display(Arc::new(UserSettings::new(Emojiset::Google)))
        .build()
        .unwrap()
}

// ============================================================================
// Outbound updates
// ============================================================================

#[tokio::test]
async fn test_server_set_away_sends_single_away_field() {
    let server = FakeChatServer::start().await.unwrap();
    let ctx = context_for(&server);

    StatusService::new(&ctx).server_set_away().await.unwrap();

    let received = server.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].form.len(), 1);
    assert_eq!(received[0].form.get("away").map(String::as_str), Some("true"));
}

#[tokio::test]
async fn test_server_revoke_away() {
    let server = FakeChatServer::start().await.unwrap();
    let ctx = context_for(&server);

    StatusService::new(&ctx).server_revoke_away().await.unwrap();

    let received = server.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].form.get("away").map(String::as_str), Some("false"));
}

#[tokio::test]
async fn test_request_is_authenticated_form_post() {
    let server = FakeChatServer::start().await.unwrap();
    let ctx = context_for(&server);

    StatusService::new(&ctx).server_set_away().await.unwrap();

    let request = &server.received()[0];
    assert!(request
        .authorization
        .as_deref()
        .is_some_and(|v| v.starts_with("Basic ")));
    assert!(request
        .content_type
        .as_deref()
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded")));
}

#[tokio::test]
async fn test_full_update_payload() {
    let server = FakeChatServer::start().await.unwrap();
    let ctx = context_for(&server);

    StatusService::new(&ctx)
        .server_update(
            ServerUpdateRequest::default()
                .with_status_text("in a meeting")
                .with_emoji("calendar", "1f4c6", ReactionType::UnicodeEmoji),
        )
        .await
        .unwrap();

    let form = &server.received()[0].form;
    assert_eq!(form.len(), 4);
    assert!(!form.contains_key("away"));
    assert_eq!(form["status_text"], "in a meeting");
    assert_eq!(form["emoji_name"], "calendar");
    assert_eq!(form["emoji_code"], "1f4c6");
    assert_eq!(form["reaction_type"], "unicode_emoji");
}

#[tokio::test]
async fn test_update_does_not_change_local_store() {
    let server = FakeChatServer::start().await.unwrap();
    let ctx = context_for(&server);

    StatusService::new(&ctx).server_set_away().await.unwrap();
    assert_eq!(ctx.store().read().away_count(), 0);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = FakeChatServer::start_with_script(vec![ScriptedResponse::error(
        StatusCode::BAD_REQUEST,
        "Invalid emoji name",
        "BAD_REQUEST",
    )])
    .await
    .unwrap();
    let ctx = context_for(&server);

    let err = StatusService::new(&ctx)
        .server_update(ServerUpdateRequest::default().with_emoji(
            "not_an_emoji",
            "0",
            ReactionType::UnicodeEmoji,
        ))
        .await
        .unwrap_err();

    match err {
        ServiceError::Transport(TransportError::Status {
            status,
            code,
            message,
        }) => {
            assert_eq!(status, 400);
            assert_eq!(code.as_deref(), Some("BAD_REQUEST"));
            assert_eq!(message, "Invalid emoji name");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(server.received().len(), 1);
}

#[tokio::test]
async fn test_bad_gateway_is_retried_once() {
    let server = FakeChatServer::start_with_script(vec![ScriptedResponse::error(
        StatusCode::BAD_GATEWAY,
        "Bad gateway",
        "BAD_GATEWAY",
    )])
    .await
    .unwrap();
    let ctx = context_for(&server);

    StatusService::new(&ctx).server_set_away().await.unwrap();

    let received = server.received();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].form, received[1].form);
}

#[tokio::test]
async fn test_repeated_bad_gateway_gives_up() {
    let bad_gateway =
        ScriptedResponse::error(StatusCode::BAD_GATEWAY, "Bad gateway", "BAD_GATEWAY");
    let server = FakeChatServer::start_with_script(vec![bad_gateway.clone(), bad_gateway])
        .await
        .unwrap();
    let ctx = context_for(&server);

    let err = StatusService::new(&ctx).server_set_away().await.unwrap_err();
    assert_eq!(err.status_code(), 502);
    assert_eq!(server.received().len(), 2);
}

#[tokio::test]
async fn test_timeout() {
    let server = FakeChatServer::start_with_script(vec![
        ScriptedResponse::success().delayed(Duration::from_secs(2))
    ])
    .await
    .unwrap();
    let transport = server
        .transport_with_timeout(Duration::from_millis(200))
        .unwrap();
    let ctx = ServiceContextBuilder::new()
        .transport(Arc::new(transport))
        .build()
        .unwrap();

    let err = StatusService::new(&ctx).server_set_away().await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport(TransportError::Timeout)));
}

#[tokio::test]
async fn test_unreachable_server() {
    let server = FakeChatServer::start().await.unwrap();
    let mut config = server.config().unwrap();
    // Nothing listens on the discard port
    config.server.base_url = "http://127.0.0.1:9".to_string();

    let ctx = ServiceContext::from_config(&config, Arc::new(emoji_catalog())).unwrap();
    let err = StatusService::new(&ctx).server_set_away().await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport(TransportError::Network(_))));
}

// ============================================================================
// Fire-and-forget
// ============================================================================

#[tokio::test]
async fn test_spawned_update_calls_back_after_server_accepts() {
    let server = FakeChatServer::start().await.unwrap();
    let ctx = context_for(&server);
    let (tx, rx) = oneshot::channel();

    let handle = StatusService::new(&ctx).spawn_server_update(
        ServerUpdateRequest::away(true),
        Some(Box::new(move || {
            let _ = tx.send(());
        })),
    );

    rx.await.unwrap();
    handle.await.unwrap();
    assert_eq!(server.received().len(), 1);
}

#[tokio::test]
async fn test_spawned_update_failure_skips_callback() {
    let server = FakeChatServer::start_with_script(vec![ScriptedResponse::error(
        StatusCode::BAD_REQUEST,
        "Client did not pass any new values.",
        "BAD_REQUEST",
    )])
    .await
    .unwrap();
    let ctx = context_for(&server);
    let (tx, rx) = oneshot::channel::<()>();

    StatusService::new(&ctx)
        .spawn_server_update(
            ServerUpdateRequest::default(),
            Some(Box::new(move || {
                let _ = tx.send(());
            })),
        )
        .await
        .unwrap();

    // Sender dropped without sending
    assert!(rx.await.is_err());
}

// ============================================================================
// Local store flow
// ============================================================================

#[tokio::test]
async fn test_snapshot_then_events() {
    let server = FakeChatServer::start().await.unwrap();
    let ctx = ServiceContext::from_config(&server.config().unwrap(), Arc::new(emoji_catalog()))
        .unwrap();
    let service = StatusService::new(&ctx);

    service.initialize(&registration_snapshot());
    {
        let store = ctx.store().read();
        assert!(store.is_away(UserId::new(5)));
        assert_eq!(store.get_status_text(UserId::new(5)), Some("brb"));
        assert_eq!(store.get_status_emoji(UserId::new(6)).unwrap().emoji_name, "coffee");
        assert!(!store.is_away(UserId::new(6)));

        let octopus = store.get_status_emoji(UserId::new(8)).unwrap();
        assert_eq!(octopus.reaction_type, Some(ReactionType::RealmEmoji));
        assert_eq!(octopus.url.as_deref(), Some("/user_avatars/2/emoji/images/1.png"));
    }

    let events: Vec<ServerEvent> = serde_json::from_value(json!([
        { "type": "user_status", "user_id": 5, "away": false },
        { "type": "user_status", "user_id": 7, "status_text": "" },
        { "type": "presence", "user_id": 7 },
        { "type": "user_status", "user_id": 9, "emoji_name": "tada", "emoji_code": "1f389", "reaction_type": "unicode_emoji" }
    ]))
    .unwrap();
    for event in &events {
        service.handle_event(event);
    }

    let store = ctx.store().read();
    assert!(!store.is_away(UserId::new(5)));
    assert_eq!(store.get_status_text(UserId::new(5)), Some("brb"));
    assert!(store.get_status_text(UserId::new(7)).is_none());
    assert_eq!(store.get_status_emoji(UserId::new(7)).unwrap().emoji_name, "palm_tree");
    assert_eq!(store.get_status_emoji(UserId::new(9)).unwrap().emoji_code.as_deref(), Some("1f389"));
    assert!(server.received().is_empty());
}

#[tokio::test]
async fn test_display_setting_changes_after_startup() {
    let server = FakeChatServer::start().await.unwrap();
    let config = server.config().unwrap();
    let settings = Arc::new(UserSettings::new(config.display.emojiset));
    let ctx = ServiceContext::from_config_with_settings(
        &config,
        Arc::new(emoji_catalog()),
        settings.clone(),
    )
    .unwrap();
    let service = StatusService::new(&ctx);

    service.handle_event(&ServerEvent::UserStatus(
        UserStatusEvent::for_user(5).with_emoji("tada", "1f389", ReactionType::UnicodeEmoji),
    ));
    settings.set_emojiset(Emojiset::Text);
    service.handle_event(&ServerEvent::UserStatus(
        UserStatusEvent::for_user(6).with_emoji("coffee", "2615", ReactionType::UnicodeEmoji),
    ));

    let store = ctx.store().read();
    assert!(!store.get_status_emoji(UserId::new(5)).unwrap().emoji_alt_code);
    assert!(store.get_status_emoji(UserId::new(6)).unwrap().emoji_alt_code);
}

#[tokio::test]
async fn test_reinitialize_keeps_emoji_only() {
    let server = FakeChatServer::start().await.unwrap();
    let ctx = context_for(&server);
    let service = StatusService::new(&ctx);

    service.initialize(&registration_snapshot());
    ctx.store()
        .write()
        .set_status_text(SetStatusTextRequest::new(UserId::new(20), "local only"));

    service.initialize(&status_core::UserStatusSnapshot::default());

    let store = ctx.store().read();
    assert_eq!(store.away_count(), 0);
    assert_eq!(store.status_text_count(), 0);
    assert_eq!(store.status_emoji_count(), 3);
}
