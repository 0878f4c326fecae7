//! Walks one portal session through the in-memory backend.
//!
//! ```bash
//! cargo run -p cp_infra --example portal_flow_demo
//! ```

use std::sync::Arc;

use cp_core::{PortalSession, Step, SubmitOutcome};
use cp_infra::{init_tracing, InMemoryVerificationBackend};
use cp_shared::{Environment, LoggingConfig, MessagingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(&LoggingConfig::for_environment(Environment::Development))?;

    let backend = Arc::new(InMemoryVerificationBackend::with_sample_contacts());
    let session = PortalSession::new(backend.clone(), MessagingConfig::default());
    let mut updates = session.subscribe();

    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            println!(
                "[{}] loading={} error={:?} success={:?}",
                state.step, state.is_loading, state.error_message, state.success_message
            );
        }
    });

    session.handle_email_change("not-an-email");
    session.submit_email().await;

    session.handle_email_change("jane.doe@example.com");
    if session.submit_email().await != SubmitOutcome::Advanced(Step::CodeEntry) {
        anyhow::bail!("code request failed: {:?}", session.snapshot().error_message);
    }

    let code = backend
        .last_code_for("jane.doe@example.com")
        .await
        .ok_or_else(|| anyhow::anyhow!("no code issued"))?;
    println!("Code delivered to outbox: {}", code);

    session.handle_code_change(code);
    session.submit_code().await;

    if let Some(contact) = session.snapshot().contact {
        for (field, value) in contact.fields() {
            println!("  {}: {}", field, value);
        }
    }

    tokio::time::sleep(MessagingConfig::default().success_message_ttl()).await;
    println!("After auto-clear: {:?}", session.snapshot().success_message);
    Ok(())
}
