//! Success message auto-clear timing (paused clock)

use std::sync::Arc;
use std::time::Duration;

use cp_shared::MessagingConfig;

use crate::domain::SendCodeResponse;
use crate::services::portal::PortalSession;

use super::mocks::{new_session, session_at_code_entry, MockGateway};

#[tokio::test(start_paused = true)]
async fn test_success_message_clears_after_three_seconds() {
    let gateway = Arc::new(MockGateway::new());
    gateway.push_request_code(Ok(SendCodeResponse::sent("Code sent")));
    let session = new_session(&gateway);
    session.handle_email_change("a@b.com");
    session.submit_email().await;

    assert_eq!(session.snapshot().success_message.as_deref(), Some("Code sent"));

    tokio::time::sleep(Duration::from_millis(2_900)).await;
    assert_eq!(session.snapshot().success_message.as_deref(), Some("Code sent"));

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(session.snapshot().success_message.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_stale_timer_does_not_clear_newer_message() {
    let gateway = Arc::new(MockGateway::new());
    let session = session_at_code_entry(&gateway).await;

    tokio::time::sleep(Duration::from_secs(2)).await;
    gateway.push_request_code(Ok(SendCodeResponse::sent("A new code was sent")));
    session.resend_code().await;

    tokio::time::sleep(Duration::from_millis(1_100)).await;
    assert_eq!(
        session.snapshot().success_message.as_deref(),
        Some("A new code was sent")
    );

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(session.snapshot().success_message.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_timer_never_clears_error_message() {
    let gateway = Arc::new(MockGateway::new());
    let session = session_at_code_entry(&gateway).await;

    session.handle_code_change("12");
    session.submit_code().await;
    let error = session.snapshot().error_message;
    assert!(error.is_some());

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(session.snapshot().error_message, error);
}

#[tokio::test(start_paused = true)]
async fn test_auto_clear_delay_is_configurable() {
    let gateway = Arc::new(MockGateway::new());
    let session = PortalSession::new(
        gateway.clone(),
        MessagingConfig {
            success_message_ttl_ms: 500,
        },
    );
    session.handle_email_change("a@b.com");
    session.submit_email().await;

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(session.snapshot().has_success());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!session.snapshot().has_success());
}

#[tokio::test(start_paused = true)]
async fn test_timer_outliving_session_is_harmless() {
    let gateway = Arc::new(MockGateway::new());
    let session = session_at_code_entry(&gateway).await;
    let mut updates = session.subscribe();
    drop(session);

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert!(updates.changed().await.is_err());
}
