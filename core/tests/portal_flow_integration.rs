//! Integration tests for the portal session against a stateful backend double

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use cp_core::{
        Contact, GatewayError, GatewayResult, PortalSession, SendCodeRequest, SendCodeResponse,
        Step, SubmitOutcome, VerificationGateway, VerifyCodeRequest, VerifyCodeResponse,
    };
    use cp_shared::MessagingConfig;

    // Backend double that issues sequential codes and remembers the latest per email
    struct FakeBackend {
        issued: RwLock<HashMap<String, String>>,
        contacts: HashMap<String, Contact>,
        next_code: RwLock<u32>,
    }

    impl FakeBackend {
        fn new() -> Self {
            let mut contacts = HashMap::new();
            contacts.insert(
                "jane@example.com".to_string(),
                Contact::new()
                    .with_field("Name", "Jane Doe")
                    .with_field("Email", "jane@example.com"),
            );
            Self {
                issued: RwLock::new(HashMap::new()),
                contacts,
                next_code: RwLock::new(100_000),
            }
        }

        async fn latest_code(&self, email: &str) -> Option<String> {
            self.issued.read().await.get(email).cloned()
        }
    }

    #[async_trait]
    impl VerificationGateway for FakeBackend {
        async fn request_code(&self, request: &SendCodeRequest) -> GatewayResult<SendCodeResponse> {
            if !self.contacts.contains_key(&request.email) {
                return Err(GatewayError::with_body_message(
                    "No contact found for this email address",
                ));
            }
            let mut next = self.next_code.write().await;
            *next += 1;
            self.issued
                .write()
                .await
                .insert(request.email.clone(), next.to_string());
            Ok(SendCodeResponse::sent(format!(
                "Verification code sent to {}",
                request.email
            )))
        }

        async fn verify_code(&self, request: &VerifyCodeRequest) -> GatewayResult<VerifyCodeResponse> {
            let mut issued = self.issued.write().await;
            let matched = issued.get(&request.email).map(|code| *code == request.code);
            match matched {
                Some(true) => {
                    issued.remove(&request.email);
                    let contact = self.contacts.get(&request.email).cloned().unwrap_or_default();
                    Ok(VerifyCodeResponse::verified(contact))
                }
                Some(false) => Err(GatewayError::with_body_message("Invalid verification code")),
                None => Err(GatewayError::with_body_message(
                    "Verification code expired. Please request a new one.",
                )),
            }
        }
    }

    fn session(backend: &Arc<FakeBackend>) -> PortalSession<FakeBackend> {
        PortalSession::new(backend.clone(), MessagingConfig::default())
    }

    #[tokio::test]
    async fn test_round_trip_to_contact_display() {
        let backend = Arc::new(FakeBackend::new());
        let session = session(&backend);

        session.handle_email_change("jane@example.com");
        assert_eq!(session.submit_email().await, SubmitOutcome::Advanced(Step::CodeEntry));
        assert_eq!(
            session.snapshot().success_message.as_deref(),
            Some("Verification code sent to jane@example.com")
        );

        let code = backend.latest_code("jane@example.com").await.unwrap();
        session.handle_code_change(code);
        assert_eq!(
            session.submit_code().await,
            SubmitOutcome::Advanced(Step::ContactDisplay)
        );

        let contact = session.snapshot().contact.unwrap();
        assert_eq!(contact.get_str("Name"), Some("Jane Doe"));
    }

    #[tokio::test]
    async fn test_unknown_email_stays_at_email_entry() {
        let backend = Arc::new(FakeBackend::new());
        let session = session(&backend);

        session.handle_email_change("nobody@example.com");
        session.submit_email().await;

        let state = session.snapshot();
        assert_eq!(state.step, Step::EmailEntry);
        assert_eq!(
            state.error_message.as_deref(),
            Some("No contact found for this email address")
        );
    }

    #[tokio::test]
    async fn test_resend_invalidates_previous_code() {
        let backend = Arc::new(FakeBackend::new());
        let session = session(&backend);

        session.handle_email_change("jane@example.com");
        session.submit_email().await;
        let first = backend.latest_code("jane@example.com").await.unwrap();

        session.resend_code().await;
        let second = backend.latest_code("jane@example.com").await.unwrap();
        assert_ne!(first, second);

        session.handle_code_change(first);
        session.submit_code().await;
        assert_eq!(
            session.snapshot().error_message.as_deref(),
            Some("Invalid verification code")
        );

        session.handle_code_change(second);
        session.submit_code().await;
        assert_eq!(session.step(), Step::ContactDisplay);
    }

    #[tokio::test]
    async fn test_wrong_code_then_retry_then_start_over() {
        let backend = Arc::new(FakeBackend::new());
        let session = session(&backend);

        session.handle_email_change("jane@example.com");
        session.submit_email().await;

        session.handle_code_change("000000");
        session.submit_code().await;
        assert_eq!(session.step(), Step::CodeEntry);
        assert!(session.snapshot().has_error());

        let code = backend.latest_code("jane@example.com").await.unwrap();
        session.handle_code_change(code);
        session.submit_code().await;
        assert_eq!(session.step(), Step::ContactDisplay);

        session.start_over();
        let state = session.snapshot();
        assert_eq!(state.step, Step::EmailEntry);
        assert!(state.email.is_empty());
        assert!(state.contact.is_none());
    }
}
